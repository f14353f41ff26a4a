//! Construction of the virtual-path table from module manifests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::asset_paths::{map_asset_entry, normalize_separators};
use crate::config::ResolverConfig;
use crate::error::{ResolveError, Result};
use crate::host::{ModuleHandle, ModuleLoader, ResourceReader};
use crate::manifest::{AssetManifest, ModuleNames};

/// Why a module listed in the names map contributed no entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// The module was loaded from a directory other than the application's.
  NotColocated,
  /// The project folder named by the asset map is absent on this machine.
  MissingProjectFolder,
}

/// A module excluded from the table and the reason it was excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedModule {
  /// Module name.
  pub module: String,
  /// Reason the module was skipped.
  pub reason: SkipReason,
}

/// Summary of a table build, kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
  /// Modules whose asset maps were read.
  pub scanned_modules: Vec<String>,
  /// Modules excluded from the table.
  pub skipped_modules: Vec<SkippedModule>,
  /// Template entries that could not be mapped into their project folder.
  pub unmapped_entries: Vec<String>,
  /// Keys contributed more than once; the last module listed wins.
  pub collisions: Vec<String>,
}

/// Immutable mapping from virtual template paths to physical source files.
#[derive(Debug, Clone, Default)]
pub struct PathTable {
  paths: BTreeMap<String, PathBuf>,
  report: BuildReport,
}

impl PathTable {
  /// Scan the application's module manifests and build the table.
  ///
  /// Any module that cannot be loaded and any missing manifest aborts the build. Modules
  /// living outside the application directory, or whose project folder does not exist here,
  /// are skipped without error.
  pub fn build<L, R>(config: &ResolverConfig, loader: &L, resources: &R) -> Result<Self>
  where
    L: ModuleLoader + ?Sized,
    R: ResourceReader + ?Sized,
  {
    let application = load_module(loader, &config.application_name)?;
    let names = ModuleNames::parse(&read_resource(
      resources,
      &application,
      &config.module_names_resource,
    )?);

    let mut table = Self::default();

    for name in names.iter() {
      let module = load_module(loader, name)?;

      if !module.is_colocated_with(&application) {
        log::debug!(
          "skipping module `{}`: loaded from {} instead of the application directory",
          name,
          module.location.display()
        );
        table.skip(name, SkipReason::NotColocated);
        continue;
      }

      let manifest = AssetManifest::parse(&read_resource(
        resources,
        &module,
        &config.module_assets_resource,
      )?);
      table.report.scanned_modules.push(name.to_string());

      let Some(project_folder) = manifest.project_folder().filter(|folder| folder.is_dir()) else {
        log::debug!("skipping module `{name}`: project folder is not available");
        table.skip(name, SkipReason::MissingProjectFolder);
        continue;
      };

      let prefix = config.module_prefix_for(name);
      for entry in manifest.entries_with_extension(&config.template_extension) {
        match map_asset_entry(project_folder, &prefix, entry) {
          Some(mapped) => table.insert(mapped.key, mapped.physical),
          None => {
            log::warn!("asset `{entry}` of module `{name}` is not under `{prefix}`, ignoring it");
            table.report.unmapped_entries.push(entry.to_string());
          }
        }
      }
    }

    log::info!(
      "mapped {} template files from {} of {} modules",
      table.paths.len(),
      table.report.scanned_modules.len(),
      names.len()
    );

    Ok(table)
  }

  /// Physical path registered for `virtual_path`, after separator normalisation.
  pub fn get(&self, virtual_path: &str) -> Option<&Path> {
    self
      .paths
      .get(&normalize_separators(virtual_path))
      .map(PathBuf::as_path)
  }

  /// Returns `true` when `virtual_path` has an entry.
  pub fn contains(&self, virtual_path: &str) -> bool {
    self.get(virtual_path).is_some()
  }

  /// Number of mapped templates.
  pub fn len(&self) -> usize {
    self.paths.len()
  }

  /// Returns `true` when no template was mapped.
  pub fn is_empty(&self) -> bool {
    self.paths.is_empty()
  }

  /// Iterate over `(virtual key, physical path)` pairs in key order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
    self
      .paths
      .iter()
      .map(|(key, path)| (key.as_str(), path.as_path()))
  }

  /// Diagnostics gathered while building the table.
  pub fn report(&self) -> &BuildReport {
    &self.report
  }

  fn insert(&mut self, key: String, physical: PathBuf) {
    if let Some(previous) = self.paths.insert(key.clone(), physical) {
      log::warn!(
        "virtual path `{key}` registered twice, replacing {}",
        previous.display()
      );
      self.report.collisions.push(key);
    }
  }

  fn skip(&mut self, module: &str, reason: SkipReason) {
    self.report.skipped_modules.push(SkippedModule {
      module: module.to_string(),
      reason,
    });
  }
}

impl FromIterator<(String, PathBuf)> for PathTable {
  fn from_iter<I: IntoIterator<Item = (String, PathBuf)>>(iter: I) -> Self {
    let mut table = Self::default();
    for (key, physical) in iter {
      table.insert(normalize_separators(&key), physical);
    }
    table
  }
}

fn load_module<L: ModuleLoader + ?Sized>(loader: &L, name: &str) -> Result<ModuleHandle> {
  loader
    .load_module(name)
    .map_err(|source| ResolveError::ModuleLoad {
      module: name.to_string(),
      source,
    })
}

fn read_resource<R: ResourceReader + ?Sized>(
  resources: &R,
  module: &ModuleHandle,
  resource: &str,
) -> Result<String> {
  resources
    .read_resource(module, resource)
    .map_err(|err| ResolveError::from_resource_io(&module.name, resource, err))
}

/// One-time initialisation cell sharing a [`PathTable`] between resolvers.
///
/// Concurrent first calls collapse into a single build; the other callers block until it
/// finishes and then share the same table. A failed build leaves the cell empty.
#[derive(Debug, Default)]
pub struct PathTableCell {
  table: OnceLock<Arc<PathTable>>,
  init: Mutex<()>,
}

impl PathTableCell {
  /// Create an empty cell; usable in a `static`.
  pub const fn new() -> Self {
    Self {
      table: OnceLock::new(),
      init: Mutex::new(()),
    }
  }

  /// The table, if it has been built.
  pub fn get(&self) -> Option<Arc<PathTable>> {
    self.table.get().cloned()
  }

  /// Return the table, running `build` first if no table exists yet.
  pub fn get_or_try_init<F>(&self, build: F) -> Result<Arc<PathTable>>
  where
    F: FnOnce() -> Result<PathTable>,
  {
    if let Some(table) = self.table.get() {
      return Ok(Arc::clone(table));
    }

    let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(table) = self.table.get() {
      return Ok(Arc::clone(table));
    }

    let table = Arc::new(build()?);
    Ok(Arc::clone(self.table.get_or_init(|| table)))
  }
}
