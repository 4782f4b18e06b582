//! Filesystem helpers that attach the offending path to errors.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("{action} {}: {source}", path.display())]
pub struct FsError {
  pub action: &'static str,
  pub path: PathBuf,
  #[source]
  pub source: std::io::Error,
}

impl FsError {
  pub fn new(action: &'static str, path: &Path, source: std::io::Error) -> Self {
    Self {
      action,
      path: path.to_path_buf(),
      source,
    }
  }
}

/// Create the parent directories of `path`.
pub async fn ensure_parent(path: &Path) -> Result<(), FsError> {
  if let Some(parent) = path.parent() {
    tokio::fs::create_dir_all(parent)
      .await
      .map_err(|e| FsError::new("failed to create directory", parent, e))?;
  }
  Ok(())
}

/// Copy a file, creating the destination's parent directories first.
pub async fn copy_file(from: &Path, to: &Path) -> Result<u64, FsError> {
  ensure_parent(to).await?;
  tokio::fs::copy(from, to)
    .await
    .map_err(|e| FsError::new("failed to copy", from, e))
}

/// Write `contents` to `path` through a temporary file in the same directory.
///
/// The destination either keeps its previous state or holds the full contents.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), FsError> {
  ensure_parent(path).await?;
  let dir = path.parent().unwrap_or(Path::new("."));

  let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| FsError::new("failed to create temp file in", dir, e))?;
  file
    .write_all(contents)
    .map_err(|e| FsError::new("failed to write", file.path(), e))?;
  file
    .persist(path)
    .map_err(|e| FsError::new("failed to persist", path, e.error))?;
  Ok(())
}
