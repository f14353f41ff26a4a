//! Errors raised while building the path table.

use std::io;

use thiserror::Error;

/// Fatal failures of a path table build.
///
/// Soft skips (a module living outside the application directory, a project folder missing on
/// this machine) are not errors and never surface here.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// A module named by the application could not be loaded.
  #[error("failed to load module `{module}`")]
  ModuleLoad {
    /// Name of the module that failed to load.
    module: String,
    /// Underlying I/O error reported by the loader.
    #[source]
    source: io::Error,
  },
  /// A required manifest resource is absent from a module.
  #[error("module `{module}` has no `{resource}` resource")]
  MissingResource {
    /// Module that was expected to carry the resource.
    module: String,
    /// Name of the missing resource.
    resource: String,
  },
  /// A manifest resource exists but could not be read.
  #[error("failed to read `{resource}` from module `{module}`")]
  ResourceRead {
    /// Module owning the resource.
    module: String,
    /// Name of the resource.
    resource: String,
    /// Underlying I/O error.
    #[source]
    source: io::Error,
  },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ResolveError>;

impl ResolveError {
  /// Classify a resource read failure, treating `NotFound` as a missing resource.
  pub(crate) fn from_resource_io(module: &str, resource: &str, err: io::Error) -> Self {
    if err.kind() == io::ErrorKind::NotFound {
      Self::MissingResource {
        module: module.to_string(),
        resource: resource.to_string(),
      }
    } else {
      Self::ResourceRead {
        module: module.to_string(),
        resource: resource.to_string(),
        source: err,
      }
    }
  }
}
