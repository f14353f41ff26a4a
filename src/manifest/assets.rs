use std::path::Path;

use super::lines::manifest_lines;
use crate::asset_paths::normalize_separators;

/// Asset map of a single module: its project source folder and relative asset entries.
///
/// Every entry has already been normalised to forward slashes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
  project_folder: Option<String>,
  entries: Vec<String>,
}

impl AssetManifest {
  /// Parse the raw asset map content. The first line names the project folder.
  pub fn parse(content: &str) -> Self {
    let mut lines = manifest_lines(content)
      .into_iter()
      .map(|line| normalize_separators(&line));
    let project_folder = lines.next();

    Self {
      project_folder,
      entries: lines.collect(),
    }
  }

  /// Project folder recorded at build time, if the manifest has one.
  pub fn project_folder(&self) -> Option<&Path> {
    self.project_folder.as_deref().map(Path::new)
  }

  /// Relative asset entries in manifest order.
  pub fn entries(&self) -> &[String] {
    &self.entries
  }

  /// Entries ending with `extension`.
  pub fn entries_with_extension<'a>(
    &'a self,
    extension: &'a str,
  ) -> impl Iterator<Item = &'a str> + 'a {
    self
      .entries
      .iter()
      .map(String::as_str)
      .filter(move |entry| crate::asset_paths::is_template_asset(entry, extension))
  }
}
