//! Resolver configuration loaded from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "asset-resolver.json";

/// Manifest names, template extension and polling settings used by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
  /// Name of the primary application module that carries the module list.
  pub application_name: String,
  /// Resource listing every participating module, one per line.
  pub module_names_resource: String,
  /// Per-module resource holding the project folder followed by asset paths.
  pub module_assets_resource: String,
  /// Leading folder under which module assets are listed in the asset map.
  pub modules_prefix: String,
  /// Extension an asset entry must end with to be mapped.
  pub template_extension: String,
  /// Minimum delay between two file stats performed by a change token.
  pub poll_interval_ms: u64,
  /// Directories searched, in order, when loading modules from disk.
  pub probe_dirs: Vec<PathBuf>,
}

impl Default for ResolverConfig {
  fn default() -> Self {
    Self {
      application_name: String::new(),
      module_names_resource: "module.names.map".into(),
      module_assets_resource: "module.assets.map".into(),
      modules_prefix: "Modules".into(),
      template_extension: ".liquid".into(),
      poll_interval_ms: 4_000,
      probe_dirs: Vec::new(),
    }
  }
}

impl ResolverConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing or unparsable file yields the defaults so a development host can start without
  /// any configuration beyond the application name.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    Self::from_path(&candidate).unwrap_or_default()
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
  }

  /// Override the application name, keeping every other setting.
  pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
    self.application_name = name.into();
    self
  }

  /// Polling interval as a [`Duration`].
  pub fn poll_interval(&self) -> Duration {
    Duration::from_millis(self.poll_interval_ms)
  }

  /// Prefix stripped from an asset entry of `module`, e.g. `Modules/Foo.Templates`.
  pub fn module_prefix_for(&self, module: &str) -> String {
    let base = self.modules_prefix.trim_matches('/');
    if base.is_empty() {
      module.to_string()
    } else {
      format!("{base}/{module}")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn discover_falls_back_to_defaults() {
    let temp = tempdir().unwrap();
    let config = ResolverConfig::discover(temp.path());
    assert_eq!(config, ResolverConfig::default());
    assert_eq!(config.template_extension, ".liquid");
    assert_eq!(config.poll_interval(), Duration::from_secs(4));
  }

  #[test]
  fn discover_ignores_malformed_files() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();
    assert_eq!(
      ResolverConfig::discover(temp.path()),
      ResolverConfig::default()
    );
  }

  #[test]
  fn partial_files_keep_remaining_defaults() {
    let temp = tempdir().unwrap();
    fs::write(
      temp.path().join(DEFAULT_CONFIG_FILE),
      r#"{"application_name":"Site.Web","template_extension":".tpl","probe_dirs":["bin"]}"#,
    )
    .unwrap();

    let config = ResolverConfig::discover(temp.path());
    assert_eq!(config.application_name, "Site.Web");
    assert_eq!(config.template_extension, ".tpl");
    assert_eq!(config.probe_dirs, vec![PathBuf::from("bin")]);
    assert_eq!(config.module_names_resource, "module.names.map");
  }

  #[test]
  fn module_prefix_tolerates_slashes_and_empty_base() {
    let mut config = ResolverConfig::default();
    assert_eq!(config.module_prefix_for("Foo"), "Modules/Foo");

    config.modules_prefix = "/Modules/".into();
    assert_eq!(config.module_prefix_for("Foo"), "Modules/Foo");

    config.modules_prefix = String::new();
    assert_eq!(config.module_prefix_for("Foo"), "Foo");
  }
}
