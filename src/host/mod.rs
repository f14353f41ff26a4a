//! Seams to the host that loads modules and exposes their embedded resources.

use std::io;
use std::path::{Path, PathBuf};

use same_file::is_same_file;

mod disk;

pub use disk::FsModuleHost;

/// A loaded module and the on-disk location it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHandle {
  /// Module identity as listed in the names map.
  pub name: String,
  /// Path of the loaded unit.
  pub location: PathBuf,
}

impl ModuleHandle {
  /// Create a handle for `name` loaded from `location`.
  pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
    Self {
      name: name.into(),
      location: location.into(),
    }
  }

  /// Directory the module was loaded from.
  pub fn containing_dir(&self) -> Option<&Path> {
    self.location.parent()
  }

  /// Returns `true` when both modules were loaded from the same output directory.
  pub fn is_colocated_with(&self, other: &ModuleHandle) -> bool {
    match (self.containing_dir(), other.containing_dir()) {
      (Some(a), Some(b)) => same_directory(a, b),
      (None, None) => true,
      _ => false,
    }
  }
}

/// Resolves module names to loaded modules.
pub trait ModuleLoader {
  /// Load the module called `name`.
  fn load_module(&self, name: &str) -> io::Result<ModuleHandle>;
}

/// Reads resources embedded in a loaded module.
pub trait ResourceReader {
  /// Read the full text of `resource` from `module`.
  ///
  /// An absent resource must be reported with [`io::ErrorKind::NotFound`].
  fn read_resource(&self, module: &ModuleHandle, resource: &str) -> io::Result<String>;
}

/// Compare two directories by filesystem identity, falling back to lexical equality when
/// either one cannot be opened.
fn same_directory(a: &Path, b: &Path) -> bool {
  match is_same_file(a, b) {
    Ok(same) => same,
    Err(_) => a == b,
  }
}
