use std::path::{Path, PathBuf};

use super::normalize::{normalize_separators, virtual_key};

/// A single asset entry resolved against its module's project folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedAsset {
    /// Forward-slash virtual key, e.g. `/Modules/Foo/Views/Home.liquid`.
    pub key: String,
    /// Absolute path of the source file inside the project folder.
    pub physical: PathBuf,
}

/// Returns `true` when the entry names a template file.
pub fn is_template_asset(entry: &str, template_extension: &str) -> bool {
    !template_extension.is_empty() && entry.ends_with(template_extension)
}

/// Map a relative asset entry of a module onto its project source folder.
///
/// `module_prefix` is the leading `Modules/<module>` part of the entry; the remainder is joined
/// onto `project_folder` one segment at a time so the physical path uses host separators.
/// Returns `None` when the entry does not live under `module_prefix`.
pub fn map_asset_entry(
    project_folder: &Path,
    module_prefix: &str,
    entry: &str,
) -> Option<MappedAsset> {
    let normalized = normalize_separators(entry);
    let relative = normalized.trim_start_matches('/');
    let prefix = module_prefix.trim_matches('/');

    let remainder = relative.strip_prefix(prefix)?;
    if !remainder.is_empty() && !remainder.starts_with('/') {
        return None;
    }

    let mut physical = project_folder.to_path_buf();
    for segment in remainder.split('/').filter(|segment| !segment.is_empty()) {
        physical.push(segment);
    }

    Some(MappedAsset {
        key: virtual_key(relative),
        physical,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_template_extension() {
        assert!(is_template_asset("Modules/Foo/Views/Home.liquid", ".liquid"));
        assert!(!is_template_asset("Modules/Foo/wwwroot/site.css", ".liquid"));
        assert!(!is_template_asset("Modules/Foo/Views/Home.liquid.bak", ".liquid"));
        assert!(!is_template_asset("Modules/Foo/Views/Home.liquid", ""));
    }

    #[test]
    fn strips_module_prefix_into_project_folder() {
        let mapped = map_asset_entry(
            Path::new("/src/Foo.Templates"),
            "Modules/Foo.Templates",
            "Modules/Foo.Templates/wwwroot/Views/Home.liquid",
        )
        .unwrap();

        assert_eq!(mapped.key, "/Modules/Foo.Templates/wwwroot/Views/Home.liquid");
        assert_eq!(
            mapped.physical,
            Path::new("/src/Foo.Templates")
                .join("wwwroot")
                .join("Views")
                .join("Home.liquid")
        );
    }

    #[test]
    fn accepts_backslash_entries() {
        let mapped = map_asset_entry(
            Path::new("/src/Foo"),
            "Modules/Foo",
            "Modules\\Foo\\Views\\Item.liquid",
        )
        .unwrap();

        assert_eq!(mapped.key, "/Modules/Foo/Views/Item.liquid");
        assert_eq!(mapped.physical, Path::new("/src/Foo").join("Views").join("Item.liquid"));
    }

    #[test]
    fn rejects_entries_of_other_modules() {
        assert!(map_asset_entry(Path::new("/src/Foo"), "Modules/Foo", "Modules/Bar/a.liquid").is_none());
        assert!(
            map_asset_entry(Path::new("/src/Foo"), "Modules/Foo", "Modules/FooBar/a.liquid").is_none()
        );
    }
}
