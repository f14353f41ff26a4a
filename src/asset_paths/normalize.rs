/// Replace every backslash with a forward slash.
///
/// Asset maps written on Windows and queries issued by a template engine on any platform are
/// compared through this form, so both `Views\Home.liquid` and `Views/Home.liquid` address the
/// same entry.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Build the lookup key for a relative asset entry: a single leading slash followed by the
/// normalised entry.
pub fn virtual_key(relative: &str) -> String {
    let normalized = normalize_separators(relative);
    format!("/{}", normalized.trim_start_matches('/'))
}
