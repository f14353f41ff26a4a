//! Filesystem-backed module host: modules are directories found under probe directories and
//! their embedded resources are plain files inside them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{ModuleHandle, ModuleLoader, ResourceReader};

/// Loads modules from an ordered list of probe directories.
#[derive(Debug, Clone, Default)]
pub struct FsModuleHost {
  probe_dirs: Vec<PathBuf>,
}

impl FsModuleHost {
  /// Create a host searching `probe_dirs` in order.
  pub fn new<I, P>(probe_dirs: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    Self {
      probe_dirs: probe_dirs.into_iter().map(Into::into).collect(),
    }
  }

  /// Probe directories in search order.
  pub fn probe_dirs(&self) -> &[PathBuf] {
    &self.probe_dirs
  }
}

impl ModuleLoader for FsModuleHost {
  fn load_module(&self, name: &str) -> io::Result<ModuleHandle> {
    if !is_plain_name(name) {
      return Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("`{name}` is not a valid module name"),
      ));
    }

    self
      .probe_dirs
      .iter()
      .map(|dir| dir.join(name))
      .find(|candidate| candidate.is_dir())
      .map(|location| ModuleHandle::new(name, location))
      .ok_or_else(|| {
        io::Error::new(
          io::ErrorKind::NotFound,
          format!("module `{name}` not found in any probe directory"),
        )
      })
  }
}

impl ResourceReader for FsModuleHost {
  fn read_resource(&self, module: &ModuleHandle, resource: &str) -> io::Result<String> {
    fs::read_to_string(module.location.join(resource))
  }
}

fn is_plain_name(name: &str) -> bool {
  !name.is_empty()
    && name != "."
    && name != ".."
    && !name.contains(['/', '\\'])
    && Path::new(name).is_relative()
}
