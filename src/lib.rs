#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod error;
pub mod host;
pub mod manifest;
pub mod provider;
pub mod table;

pub use config::ResolverConfig;
pub use error::{ResolveError, Result};
pub use host::{FsModuleHost, ModuleHandle, ModuleLoader, ResourceReader};
pub use provider::{AssetPathResolver, ChangeToken, FileInfo, FileProvider};
pub use table::{BuildReport, PathTable, PathTableCell};
