//! Compiler toolchain discovery.
//!
//! Every lookup here is silent: a location without the toolchain is not an
//! error, the search just moves on to the next candidate.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::consts::{APP_DATA_VAR, LOCAL_APP_DATA_VAR, MANIFEST_FILE, NODE_MODULES, NPM_PREFIX_VARS, TOOLCHAIN_PACKAGE};
use crate::global::resolve_global_modules_dir;
use crate::platform::Probe;

/// Where a toolchain was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolchainSource {
  /// Resolvable from the package directory.
  Local,
  /// Installed under the package tool's global prefix.
  GlobalPrefix,
  /// Installed globally by npm or Yarn.
  Ambient,
}

impl fmt::Display for ToolchainSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      ToolchainSource::Local => "local",
      ToolchainSource::GlobalPrefix => "global prefix",
      ToolchainSource::Ambient => "global",
    };
    f.write_str(label)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toolchain {
  /// Package directory, e.g. `.../node_modules/typescript`.
  pub dir: PathBuf,
  pub version: Option<String>,
  pub source: ToolchainSource,
}

impl Toolchain {
  fn at(dir: PathBuf, source: ToolchainSource) -> Self {
    let dir = dunce::canonicalize(&dir).unwrap_or(dir);
    let version = read_version(&dir);
    Self { dir, version, source }
  }
}

/// Every installed toolchain, in lookup order: the package directory, the
/// global prefix, then npm/Yarn global installs.
///
/// Being on disk does not mean a toolchain loads; callers try each in turn.
pub fn candidates(cwd: &Path, probe: &dyn Probe) -> Vec<Toolchain> {
  let mut found = Vec::new();

  if let Some(dir) = resolve_package(cwd, TOOLCHAIN_PACKAGE, probe) {
    found.push(Toolchain::at(dir, ToolchainSource::Local));
  }

  if let Some(global) = resolve_global_modules_dir(probe)
    && let Some(dir) = resolve_package(&global, TOOLCHAIN_PACKAGE, probe)
  {
    found.push(Toolchain::at(dir, ToolchainSource::GlobalPrefix));
  }

  for global in ambient_global_dirs(probe) {
    let dir = global.join(TOOLCHAIN_PACKAGE);
    if is_package_dir(&dir, probe) {
      found.push(Toolchain::at(dir, ToolchainSource::Ambient));
    }
  }

  if found.is_empty() {
    debug!(cwd = ?cwd, "no toolchain found");
  }
  found
}

/// The first toolchain [`candidates`] would try.
pub fn locate(cwd: &Path, probe: &dyn Probe) -> Option<Toolchain> {
  candidates(cwd, probe).into_iter().next()
}

/// Resolve `package` the way a `require` issued from `from` would.
///
/// Walks `from` and its ancestors checking `<dir>/node_modules/<package>`,
/// skipping ancestors that are themselves `node_modules` directories.
pub fn resolve_package(from: &Path, package: &str, probe: &dyn Probe) -> Option<PathBuf> {
  from
    .ancestors()
    .filter(|dir| dir.file_name().is_none_or(|name| name != NODE_MODULES))
    .map(|dir| dir.join(NODE_MODULES).join(package))
    .find(|candidate| is_package_dir(candidate, probe))
}

/// Global module directories of npm and Yarn, in lookup order.
pub fn ambient_global_dirs(probe: &dyn Probe) -> Vec<PathBuf> {
  let windows = probe.os().is_windows();
  let mut dirs = Vec::new();

  let npm_prefix = NPM_PREFIX_VARS
    .iter()
    .find_map(|var| probe.non_empty_var(var))
    .map(PathBuf::from)
    .or_else(|| {
      if windows {
        probe.non_empty_var(APP_DATA_VAR).map(|p| PathBuf::from(p).join("npm"))
      } else {
        Some(PathBuf::from("/usr/local"))
      }
    });
  if let Some(prefix) = npm_prefix {
    dirs.push(if windows {
      prefix.join(NODE_MODULES)
    } else {
      prefix.join("lib").join(NODE_MODULES)
    });
  }

  let yarn = if windows {
    probe
      .non_empty_var(LOCAL_APP_DATA_VAR)
      .map(|p| PathBuf::from(p).join("Yarn").join("Data"))
  } else {
    probe.home_dir().map(|h| h.join(".config").join("yarn"))
  };
  if let Some(yarn) = yarn {
    dirs.push(yarn.join("global").join(NODE_MODULES));
  }

  dirs
}

fn is_package_dir(dir: &Path, probe: &dyn Probe) -> bool {
  probe.exists(&dir.join(MANIFEST_FILE)) || probe.exists(&dir.join("index.js"))
}

fn read_version(dir: &Path) -> Option<String> {
  let content = std::fs::read_to_string(dir.join(MANIFEST_FILE)).ok()?;
  let value: serde_json::Value = serde_json::from_str(&content).ok()?;
  value.get("version")?.as_str().map(str::to_string)
}
