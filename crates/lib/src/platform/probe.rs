//! Read-only view of the process environment.
//!
//! Path resolution goes through [`Probe`] instead of reading `std::env`
//! directly so tests can supply a fake environment.

use std::path::{Path, PathBuf};

use super::Os;

pub trait Probe: Send + Sync {
  /// Value of an environment variable, `None` when unset or not unicode.
  fn var(&self, name: &str) -> Option<String>;

  /// The user's home directory.
  fn home_dir(&self) -> Option<PathBuf>;

  fn os(&self) -> Os;

  /// Working directory used to absolutize relative paths.
  fn current_dir(&self) -> Option<PathBuf>;

  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }

  /// Like [`Probe::var`] but treats an empty value as unset.
  fn non_empty_var(&self, name: &str) -> Option<String> {
    self.var(name).filter(|v| !v.is_empty())
  }
}

/// [`Probe`] backed by the real process environment and filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl Probe for SystemProbe {
  fn var(&self, name: &str) -> Option<String> {
    std::env::var(name).ok()
  }

  #[cfg(windows)]
  fn home_dir(&self) -> Option<PathBuf> {
    self.non_empty_var("USERPROFILE").map(PathBuf::from)
  }

  #[cfg(not(windows))]
  fn home_dir(&self) -> Option<PathBuf> {
    self.non_empty_var("HOME").map(PathBuf::from)
  }

  fn os(&self) -> Os {
    Os::current()
  }

  fn current_dir(&self) -> Option<PathBuf> {
    std::env::current_dir().ok()
  }
}
