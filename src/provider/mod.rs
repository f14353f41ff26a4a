//! Query side: resolving virtual template paths against a built [`PathTable`].

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::asset_paths::normalize_separators;
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::host::{ModuleLoader, ResourceReader};
use crate::table::{PathTable, PathTableCell};

mod change_token;
mod file_info;

pub use change_token::{ChangeToken, PollingChangeToken};
pub use file_info::{FileInfo, NotFoundDirectoryContents, NotFoundFileInfo, PhysicalFileInfo};

/// Read-only file lookups offered to a template-loading layer.
///
/// Every query is total: unknown or absent paths produce "not found" values, never errors.
pub trait FileProvider {
  /// Resolve `subpath` to a file handle.
  fn file_info(&self, subpath: Option<&str>) -> FileInfo;

  /// Obtain a change token for the file behind `filter`.
  fn watch(&self, filter: Option<&str>) -> ChangeToken;

  /// List a directory.
  fn directory_contents(&self, subpath: Option<&str>) -> NotFoundDirectoryContents;
}

/// Resolves module template virtual paths to their project source files.
#[derive(Debug, Clone)]
pub struct AssetPathResolver {
  table: Arc<PathTable>,
  poll_interval: Duration,
}

impl AssetPathResolver {
  /// Create a resolver over an already built table.
  pub fn new(table: Arc<PathTable>, poll_interval: Duration) -> Self {
    Self {
      table,
      poll_interval,
    }
  }

  /// Create a resolver sharing the table held by `cell`, building it on first use.
  ///
  /// Build failures propagate and leave `cell` empty.
  pub fn initialize<L, R>(
    cell: &PathTableCell,
    config: &ResolverConfig,
    loader: &L,
    resources: &R,
  ) -> Result<Self>
  where
    L: ModuleLoader + ?Sized,
    R: ResourceReader + ?Sized,
  {
    let table = cell.get_or_try_init(|| PathTable::build(config, loader, resources))?;
    Ok(Self::new(table, config.poll_interval()))
  }

  /// Table backing this resolver.
  pub fn table(&self) -> &PathTable {
    &self.table
  }

  fn lookup(&self, subpath: &str) -> Option<&Path> {
    self.table.get(subpath)
  }
}

impl FileProvider for AssetPathResolver {
  fn file_info(&self, subpath: Option<&str>) -> FileInfo {
    let Some(subpath) = subpath else {
      return FileInfo::NotFound(NotFoundFileInfo::default());
    };

    match self.lookup(subpath) {
      Some(path) => FileInfo::Physical(PhysicalFileInfo::new(path)),
      None => FileInfo::NotFound(NotFoundFileInfo::new(normalize_separators(subpath))),
    }
  }

  fn watch(&self, filter: Option<&str>) -> ChangeToken {
    filter
      .and_then(|filter| self.lookup(filter))
      .map_or(ChangeToken::Null, |path| {
        ChangeToken::Polling(PollingChangeToken::new(path, self.poll_interval))
      })
  }

  fn directory_contents(&self, _subpath: Option<&str>) -> NotFoundDirectoryContents {
    NotFoundDirectoryContents
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::host::FsModuleHost;
  use crate::table::tests::{config, templates_host};
  use std::fs;
  use tempfile::tempdir;

  const HOME: &str = "/Modules/Foo.Templates/wwwroot/Views/Home.liquid";

  fn resolver(root: &Path) -> AssetPathResolver {
    let host = templates_host(root);
    let table = PathTable::build(&config(), &host, &host).unwrap();
    AssetPathResolver::new(Arc::new(table), Duration::ZERO)
  }

  #[test]
  fn unknown_and_absent_paths_are_not_found() {
    let temp = tempdir().unwrap();
    let resolver = resolver(temp.path());

    for query in [None, Some(""), Some("/Views/Unknown.liquid"), Some("Modules/Foo.Templates/wwwroot/Views/Home.liquid")] {
      assert!(matches!(resolver.file_info(query), FileInfo::NotFound(_)), "{query:?}");
      let token = resolver.watch(query);
      assert!(matches!(token, ChangeToken::Null), "{query:?}");
      assert!(!token.has_changed());
    }
  }

  #[test]
  fn hits_return_physical_files_even_when_deleted() {
    let temp = tempdir().unwrap();
    let resolver = resolver(temp.path());

    let info = resolver.file_info(Some(HOME));
    let expected = temp
      .path()
      .join("Foo.Templates")
      .join("wwwroot")
      .join("Views")
      .join("Home.liquid");
    assert_eq!(info.physical_path(), Some(expected.as_path()));
    assert_eq!(info.name(), "Home.liquid");
    assert!(!info.exists());

    fs::create_dir_all(expected.parent().unwrap()).unwrap();
    fs::write(&expected, "<h1>{{ Model.Title }}</h1>").unwrap();
    assert!(resolver.file_info(Some(HOME)).exists());
  }

  #[test]
  fn backslash_queries_resolve_like_forward_slashes() {
    let temp = tempdir().unwrap();
    let resolver = resolver(temp.path());

    let forward = resolver.file_info(Some(HOME));
    let backward = resolver.file_info(Some("\\Modules\\Foo.Templates\\wwwroot\\Views\\Home.liquid"));
    assert_eq!(forward, backward);

    let token = resolver.watch(Some("\\Modules\\Foo.Templates\\wwwroot\\Views\\Home.liquid"));
    assert_eq!(token.watched_path(), forward.physical_path());
  }

  #[test]
  fn watch_fires_when_the_source_file_changes() {
    let temp = tempdir().unwrap();
    let resolver = resolver(temp.path());
    let item = temp.path().join("Foo.Templates").join("Views").join("Item.liquid");
    fs::create_dir_all(item.parent().unwrap()).unwrap();
    fs::write(&item, "v1").unwrap();

    let token = resolver.watch(Some("/Modules/Foo.Templates/Views/Item.liquid"));
    assert!(matches!(token, ChangeToken::Polling(_)));
    assert!(!token.has_changed());

    fs::remove_file(&item).unwrap();
    assert!(token.has_changed());
  }

  #[test]
  fn directory_listing_is_never_supported() {
    let temp = tempdir().unwrap();
    let resolver = resolver(temp.path());
    assert!(!resolver.directory_contents(Some("/Modules/Foo.Templates")).exists());
    assert!(!resolver.directory_contents(None).exists());
  }

  #[test]
  fn initialize_shares_one_table_and_propagates_failures() {
    let temp = tempdir().unwrap();
    let bin = temp.path().join("bin");
    let project = temp.path().join("src").join("Foo.Templates");
    fs::create_dir_all(bin.join("Site.Web")).unwrap();
    fs::create_dir_all(bin.join("Foo.Templates")).unwrap();
    fs::create_dir_all(&project).unwrap();
    fs::write(
      bin.join("Foo.Templates").join("module.assets.map"),
      format!(
        "{}\nModules/Foo.Templates/Views/Home.liquid\n",
        project.display()
      ),
    )
    .unwrap();

    let host = FsModuleHost::new([&bin]);
    let cell = PathTableCell::new();
    assert!(AssetPathResolver::initialize(&cell, &config(), &host, &host).is_err());
    assert!(cell.get().is_none());

    fs::write(bin.join("Site.Web").join("module.names.map"), "Foo.Templates\n").unwrap();
    let first = AssetPathResolver::initialize(&cell, &config(), &host, &host).unwrap();
    let second = AssetPathResolver::initialize(&cell, &config(), &host, &host).unwrap();

    assert!(std::ptr::eq(first.table(), second.table()));
    assert_eq!(
      first
        .file_info(Some("/Modules/Foo.Templates/Views/Home.liquid"))
        .physical_path(),
      Some(project.join("Views").join("Home.liquid").as_path())
    );
  }
}
