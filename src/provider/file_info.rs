use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Result of a file lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileInfo {
  /// The virtual path is mapped to a physical file.
  Physical(PhysicalFileInfo),
  /// The virtual path is unknown.
  NotFound(NotFoundFileInfo),
}

impl FileInfo {
  /// Returns `true` when the lookup hit and the file currently exists on disk.
  pub fn exists(&self) -> bool {
    match self {
      Self::Physical(file) => file.exists(),
      Self::NotFound(_) => false,
    }
  }

  /// File name, or the requested path for a miss.
  pub fn name(&self) -> &str {
    match self {
      Self::Physical(file) => file.name(),
      Self::NotFound(missing) => missing.name(),
    }
  }

  /// Physical location of a hit.
  pub fn physical_path(&self) -> Option<&Path> {
    match self {
      Self::Physical(file) => Some(file.path()),
      Self::NotFound(_) => None,
    }
  }

  /// Always `false`: only single files are ever resolved.
  pub fn is_directory(&self) -> bool {
    false
  }
}

/// Handle to a source file on disk.
///
/// Metadata is read on every call; the file may have been deleted since the table was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalFileInfo {
  path: PathBuf,
}

impl PhysicalFileInfo {
  /// Wrap `path`.
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Absolute path of the file.
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Final path component.
  pub fn name(&self) -> &str {
    self
      .path
      .file_name()
      .and_then(|name| name.to_str())
      .unwrap_or_default()
  }

  /// Returns `true` when a regular file currently exists at the path.
  pub fn exists(&self) -> bool {
    self.path.is_file()
  }

  /// Size in bytes, `0` when the file is missing.
  pub fn len(&self) -> u64 {
    fs::metadata(&self.path).map(|meta| meta.len()).unwrap_or(0)
  }

  /// Returns `true` when the file is empty or missing.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Last modification time, `None` when the file is missing.
  pub fn last_modified(&self) -> Option<SystemTime> {
    last_write_time(&self.path)
  }

  /// Open the file for reading.
  pub fn open(&self) -> io::Result<File> {
    File::open(&self.path)
  }

  /// Read the whole file as UTF-8 text.
  pub fn read_to_string(&self) -> io::Result<String> {
    fs::read_to_string(&self.path)
  }
}

/// Lookup miss carrying the requested path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotFoundFileInfo {
  name: String,
}

impl NotFoundFileInfo {
  /// Miss for `name`.
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }

  /// Requested path, empty when no path was given.
  pub fn name(&self) -> &str {
    &self.name
  }
}

/// Directory listing result; listings are never supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotFoundDirectoryContents;

impl NotFoundDirectoryContents {
  /// Always `false`.
  pub fn exists(&self) -> bool {
    false
  }

  /// No entries.
  pub fn iter(&self) -> std::iter::Empty<FileInfo> {
    std::iter::empty()
  }
}

pub(crate) fn last_write_time(path: &Path) -> Option<SystemTime> {
  path.metadata().and_then(|meta| meta.modified()).ok()
}
