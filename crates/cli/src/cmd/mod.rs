mod build;
mod info;
mod manifest;
mod plan;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use packtypes_lib::consts::MANIFEST_FILE;
use packtypes_lib::manifest::PackageManifest;

use crate::PackageArgs;

pub use build::cmd_build;
pub use info::cmd_info;
pub use manifest::cmd_manifest;
pub use plan::cmd_plan;

/// Resolved package locations plus its manifest with defaults applied.
struct Package {
  cwd: PathBuf,
  out: PathBuf,
  manifest: PackageManifest,
}

impl PackageArgs {
  fn load(&self) -> Result<Package> {
    let cwd = absolute(&self.cwd)?;
    let out = match &self.out {
      Some(out) => absolute(out)?,
      None => cwd.join("pkg"),
    };

    let manifest_path = cwd.join(MANIFEST_FILE);
    let mut manifest =
      PackageManifest::load(&manifest_path).with_context(|| format!("Failed to load {}", manifest_path.display()))?;
    manifest.contribute_defaults();

    Ok(Package { cwd, out, manifest })
  }
}

fn absolute(path: &Path) -> Result<PathBuf> {
  std::path::absolute(path).with_context(|| format!("Failed to resolve {}", path.display()))
}

fn runtime() -> Result<tokio::runtime::Runtime> {
  tokio::runtime::Runtime::new().context("Failed to create async runtime")
}
