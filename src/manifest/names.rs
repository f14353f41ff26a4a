use super::lines::manifest_lines;

/// Ordered list of module names taken from the application's names map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleNames {
  names: Vec<String>,
}

impl ModuleNames {
  /// Parse the raw names map content.
  pub fn parse(content: &str) -> Self {
    Self {
      names: manifest_lines(content),
    }
  }

  /// Module names in manifest order.
  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.names.iter().map(String::as_str)
  }

  /// Number of listed modules.
  pub fn len(&self) -> usize {
    self.names.len()
  }

  /// Returns `true` when the manifest lists no module.
  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}
