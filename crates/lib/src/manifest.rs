//! Package manifest (`package.json`) handling.
//!
//! The manifest is kept as an ordered JSON object so fields this crate does
//! not know about survive a load/save cycle untouched.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::consts::TYPES_ENTRY;

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse manifest {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to write manifest {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("manifest must be a JSON object, found {0}")]
  NotAnObject(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageManifest(Map<String, Value>);

impl PackageManifest {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_value(value: Value) -> Result<Self, ManifestError> {
    match value {
      Value::Object(map) => Ok(Self(map)),
      other => Err(ManifestError::NotAnObject(json_kind(&other))),
    }
  }

  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_value(value)
  }

  /// Write the manifest pretty-printed with a trailing newline.
  pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
    let json = serde_json::to_string_pretty(&self.0).map_err(|source| ManifestError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    std::fs::write(path, format!("{}\n", json)).map_err(|source| ManifestError::Write {
      path: path.to_path_buf(),
      source,
    })
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  pub fn set(&mut self, key: &str, value: impl Into<Value>) {
    self.0.insert(key.to_string(), value.into());
  }

  /// Package name, when present and a string.
  pub fn name(&self) -> Option<&str> {
    self.0.get("name").and_then(Value::as_str)
  }

  pub fn types(&self) -> Option<&Value> {
    self.0.get("types")
  }

  /// Advertise the declaration artifact unless `types` already has a truthy value.
  ///
  /// Returns whether the manifest changed.
  pub fn contribute_defaults(&mut self) -> bool {
    if self.types().is_some_and(is_truthy) {
      return false;
    }
    debug!(types = TYPES_ENTRY, "setting manifest types");
    self.set("types", TYPES_ENTRY);
    true
  }
}

/// Manifest hook run by the host before building.
pub fn contribute_manifest_defaults(manifest: &mut PackageManifest) -> bool {
  manifest.contribute_defaults()
}

/// JavaScript truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
