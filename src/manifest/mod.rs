//! Parsing of the two line-oriented manifests shipped inside module builds.

mod assets;
mod lines;
mod names;

pub use assets::AssetManifest;
pub use lines::manifest_lines;
pub use names::ModuleNames;
