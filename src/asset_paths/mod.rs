//! Helpers turning asset map entries into virtual keys and physical paths.
//!
//! Separator normalisation, template filtering and entry mapping live in separate submodules
//! so the table builder and the query side share exactly the same key rules.

mod entry;
mod normalize;

pub use entry::{MappedAsset, is_template_asset, map_asset_entry};
pub use normalize::{normalize_separators, virtual_key};
