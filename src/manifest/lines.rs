/// Split manifest content into its non-blank lines.
///
/// Both `\n` and `\r\n` endings are accepted and surrounding whitespace is trimmed, so a
/// manifest generated on Windows parses the same as one generated elsewhere.
pub fn manifest_lines(content: &str) -> Vec<String> {
  content
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(str::to_string)
    .collect()
}
