//! Global install root of the package tool.
//!
//! The prefix is looked up in a fixed order, first match wins:
//! 1. `PREFIX`, returned verbatim without an existence check
//! 2. `%LOCALAPPDATA%/Pika` (Windows only)
//! 3. `~/.config/pika`
//! 4. `~/.pika-config`
//!
//! No location found is a normal outcome, reported as `None`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::consts::{APP_NAME, LOCAL_APP_DATA_VAR, NODE_MODULES, PREFIX_VAR};
use crate::platform::Probe;

/// Which rule produced a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixSource {
  Override,
  LocalAppData,
  XdgConfig,
  HomeConfig,
}

impl fmt::Display for PrefixSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      PrefixSource::Override => "$PREFIX",
      PrefixSource::LocalAppData => "%LOCALAPPDATA%",
      PrefixSource::XdgConfig => "~/.config",
      PrefixSource::HomeConfig => "~/.pika-config",
    };
    f.write_str(label)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prefix {
  pub path: PathBuf,
  pub source: PrefixSource,
}

/// Find the global prefix along with the rule that matched.
pub fn find_prefix(probe: &dyn Probe) -> Option<Prefix> {
  if let Some(prefix) = probe.non_empty_var(PREFIX_VAR) {
    return Some(Prefix {
      path: PathBuf::from(prefix),
      source: PrefixSource::Override,
    });
  }

  if probe.os().is_windows()
    && let Some(local) = probe.non_empty_var(LOCAL_APP_DATA_VAR)
  {
    let path = PathBuf::from(local).join("Pika");
    if probe.exists(&path) {
      return Some(Prefix {
        path,
        source: PrefixSource::LocalAppData,
      });
    }
  }

  let home = probe.home_dir()?;

  let config = home.join(".config").join(APP_NAME);
  if probe.exists(&config) {
    return Some(Prefix {
      path: config,
      source: PrefixSource::XdgConfig,
    });
  }

  let dotfile = home.join(format!(".{}-config", APP_NAME));
  if probe.exists(&dotfile) {
    return Some(Prefix {
      path: dotfile,
      source: PrefixSource::HomeConfig,
    });
  }

  debug!(home = ?home, "no global prefix found");
  None
}

/// Resolve the global prefix directory.
pub fn resolve_prefix(probe: &dyn Probe) -> Option<PathBuf> {
  find_prefix(probe).map(|p| p.path)
}

/// Resolve the directory globally installed packages live in.
///
/// This is the absolute prefix joined with `config/global/node_modules` on
/// Windows and `global/node_modules` elsewhere.
pub fn resolve_global_modules_dir(probe: &dyn Probe) -> Option<PathBuf> {
  let prefix = resolve_prefix(probe)?;
  let base = absolutize(&prefix, probe);

  let dir = if probe.os().is_windows() {
    base.join("config").join("global").join(NODE_MODULES)
  } else {
    base.join("global").join(NODE_MODULES)
  };
  Some(dir)
}

fn absolutize(path: &Path, probe: &dyn Probe) -> PathBuf {
  if path.is_absolute() {
    return path.to_path_buf();
  }
  match probe.current_dir() {
    Some(cwd) => cwd.join(path),
    None => path.to_path_buf(),
  }
}
