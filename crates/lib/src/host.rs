//! Evaluation of the inference toolchain.
//!
//! The toolchain and the compiled package are JavaScript, so they are loaded
//! in a JavaScript runtime started as a child process. [`ModuleHost`] is the
//! seam the builder talks to.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::build::BuildError;
use crate::consts::{DEFAULT_NODE_BINARY, INFERENCE_EXPORT, NODE_BINARY_VAR};
use crate::platform::Probe;
use crate::toolchain::Toolchain;

/// Outcome of loading a toolchain and looking up one of its exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportCheck {
  /// Loaded, and the export is a function.
  Exported,
  /// Loaded, but the export is missing.
  Missing,
  /// The toolchain (or the runtime) could not be loaded.
  LoadFailed,
}

#[async_trait]
pub trait ModuleHost: Send + Sync {
  /// Load the toolchain and check it exports a function named `export`.
  async fn check_export(&self, toolchain: &Toolchain, export: &str) -> ExportCheck;

  /// Load `entry` and run the toolchain's inference export on it.
  async fn generate(
    &self,
    toolchain: &Toolchain,
    module_name: &str,
    entry: &Path,
    options: &Value,
  ) -> Result<String, BuildError>;
}

/// Exits 0 when `require(dir)[name]` is a function, 1 when it is not and 2
/// when `require` throws.
const HAS_EXPORT_SCRIPT: &str = r#"
const [dir, name] = process.argv.slice(1);
let mod;
try { mod = require(dir); } catch (_) { process.exit(2); }
process.exit(mod && typeof mod[name] === 'function' ? 0 : 1);
"#;

/// Imports the entry and prints the inferred declarations on stdout.
const GENERATE_SCRIPT: &str = r#"
const [dir, name, entry, moduleName, options] = process.argv.slice(1);
const toolchain = require(dir);
import(require('url').pathToFileURL(entry).href).then(
  (mod) => process.stdout.write(String(toolchain[name](moduleName, mod, JSON.parse(options)))),
  (err) => { process.stderr.write(String((err && err.stack) || err)); process.exit(1); }
);
"#;

/// [`ModuleHost`] that runs scripts through a `node` binary.
#[derive(Debug, Clone)]
pub struct NodeHost {
  program: PathBuf,
}

impl NodeHost {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self { program: program.into() }
  }

  /// Use `$PACKTYPES_NODE`, or `node` from `PATH`.
  pub fn from_probe(probe: &dyn Probe) -> Self {
    Self::new(
      probe
        .non_empty_var(NODE_BINARY_VAR)
        .unwrap_or_else(|| DEFAULT_NODE_BINARY.to_string()),
    )
  }

  pub fn program(&self) -> &Path {
    &self.program
  }

  fn script(&self, script: &str) -> Command {
    let mut command = Command::new(&self.program);
    command.arg("-e").arg(script).arg("--");
    command
  }
}

#[async_trait]
impl ModuleHost for NodeHost {
  async fn check_export(&self, toolchain: &Toolchain, export: &str) -> ExportCheck {
    let status = self
      .script(HAS_EXPORT_SCRIPT)
      .arg(&toolchain.dir)
      .arg(export)
      .output()
      .await;

    match status {
      Ok(output) => {
        debug!(toolchain = ?toolchain.dir, export, code = ?output.status.code(), "checked toolchain export");
        match output.status.code() {
          Some(0) => ExportCheck::Exported,
          Some(1) => ExportCheck::Missing,
          _ => ExportCheck::LoadFailed,
        }
      }
      Err(e) => {
        warn!(program = ?self.program, error = %e, "could not start javascript runtime");
        ExportCheck::LoadFailed
      }
    }
  }

  async fn generate(
    &self,
    toolchain: &Toolchain,
    module_name: &str,
    entry: &Path,
    options: &Value,
  ) -> Result<String, BuildError> {
    let output = self
      .script(GENERATE_SCRIPT)
      .arg(&toolchain.dir)
      .arg(INFERENCE_EXPORT)
      .arg(entry)
      .arg(module_name)
      .arg(options.to_string())
      .output()
      .await
      .map_err(|e| BuildError::ModuleLoad {
        entry: entry.to_path_buf(),
        message: format!("could not start {}: {}", self.program.display(), e),
      })?;

    if !output.status.success() {
      return Err(BuildError::ModuleLoad {
        entry: entry.to_path_buf(),
        message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }
}
