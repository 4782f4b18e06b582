//! Declaration-only compiler runs.

use std::ffi::OsString;
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};

use crate::build::BuildError;
use crate::consts::{NODE_MODULES, TYPES_DIR};

/// Project-local compiler binary.
pub fn compiler_bin(cwd: &Path) -> PathBuf {
  cwd.join(NODE_MODULES).join(".bin").join("tsc")
}

/// Arguments asking the compiler for declarations only, written to
/// `<out>/dist-types/`.
pub fn declaration_args(out: &Path) -> Vec<OsString> {
  let mut dir = out.join(TYPES_DIR).into_os_string();
  dir.push(MAIN_SEPARATOR_STR);

  vec![
    "-d".into(),
    "--emitDeclarationOnly".into(),
    "--declarationMap".into(),
    "false".into(),
    "--declarationDir".into(),
    dir,
  ]
}

/// Run the compiler in `cwd` and wait for it to exit.
///
/// A non-zero exit is returned as [`BuildError::ToolchainInvocation`] carrying
/// the compiler's output.
pub async fn emit_declarations(program: &Path, cwd: &Path, out: &Path) -> Result<(), BuildError> {
  let program = launcher(program);
  let args = declaration_args(out);
  info!(program = ?program, cwd = ?cwd, "emitting declarations");

  let output = Command::new(&program)
    .args(&args)
    .current_dir(cwd)
    .output()
    .await
    .map_err(|source| BuildError::ToolchainSpawn {
      program: program.clone(),
      source,
    })?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);

  if !output.status.success() {
    // The compiler reports diagnostics on stdout.
    let combined = [stdout.trim(), stderr.trim()]
      .into_iter()
      .filter(|s| !s.is_empty())
      .collect::<Vec<_>>()
      .join("\n");
    return Err(BuildError::ToolchainInvocation {
      program,
      code: output.status.code(),
      output: combined,
    });
  }

  if !stdout.trim().is_empty() {
    debug!(stdout = %stdout.trim(), "compiler output");
  }

  Ok(())
}

/// On Windows the `.bin` entry is a shell script; its `.cmd` shim is the
/// runnable one.
#[cfg(windows)]
fn launcher(program: &Path) -> PathBuf {
  let shim = program.with_extension("cmd");
  if shim.exists() { shim } else { program.to_path_buf() }
}

#[cfg(not(windows))]
fn launcher(program: &Path) -> PathBuf {
  program.to_path_buf()
}
