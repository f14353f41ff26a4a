use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant, SystemTime};

use super::file_info::last_write_time;

/// Change notification handle returned by a watch.
#[derive(Debug)]
pub enum ChangeToken {
  /// Token that never reports a change.
  Null,
  /// Token polling a physical file for timestamp changes.
  Polling(PollingChangeToken),
}

impl ChangeToken {
  /// Returns `true` once the watched file has changed.
  pub fn has_changed(&self) -> bool {
    match self {
      Self::Null => false,
      Self::Polling(token) => token.has_changed(),
    }
  }

  /// Always `false`: consumers poll [`ChangeToken::has_changed`].
  pub fn active_change_callbacks(&self) -> bool {
    false
  }

  /// Watched file, if any.
  pub fn watched_path(&self) -> Option<&Path> {
    match self {
      Self::Null => None,
      Self::Polling(token) => Some(token.path()),
    }
  }
}

/// Detects changes to a file by comparing its last write time against the value captured
/// when the token was created.
///
/// The file is stat'ed at most once per polling interval; once a change is seen the token
/// stays changed.
#[derive(Debug)]
pub struct PollingChangeToken {
  path: PathBuf,
  interval: Duration,
  state: Mutex<PollState>,
}

#[derive(Debug)]
struct PollState {
  baseline: Option<SystemTime>,
  last_checked: Option<Instant>,
  changed: bool,
}

impl PollingChangeToken {
  /// Start watching `path`, re-checking at most once per `interval`.
  pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
    let path = path.into();
    let baseline = last_write_time(&path);
    Self {
      path,
      interval,
      state: Mutex::new(PollState {
        baseline,
        last_checked: None,
        changed: false,
      }),
    }
  }

  /// Watched file.
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Returns `true` once the file's last write time differs from the captured one,
  /// including creation or deletion of the file.
  pub fn has_changed(&self) -> bool {
    let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
    if state.changed {
      return true;
    }

    let now = Instant::now();
    if state
      .last_checked
      .is_some_and(|checked| now.duration_since(checked) < self.interval)
    {
      return false;
    }

    state.last_checked = Some(now);
    if last_write_time(&self.path) != state.baseline {
      state.changed = true;
    }
    state.changed
  }
}
