//! Implementation of the `packtypes manifest` command.

use std::path::Path;

use anyhow::{Context, Result};

use packtypes_lib::consts::MANIFEST_FILE;
use packtypes_lib::manifest::PackageManifest;

use super::absolute;
use crate::output::{OutputFormat, print_info, print_json, print_success};

/// Persist the manifest defaults, leaving the file untouched when nothing changes.
pub fn cmd_manifest(cwd: &Path, format: OutputFormat) -> Result<()> {
  let path = absolute(cwd)?.join(MANIFEST_FILE);
  let mut manifest = PackageManifest::load(&path).with_context(|| format!("Failed to load {}", path.display()))?;

  let changed = manifest.contribute_defaults();
  if changed {
    manifest.save(&path).context("Failed to update manifest")?;
  }

  if format.is_json() {
    return print_json(&serde_json::json!({ "changed": changed, "types": manifest.types() }));
  }

  let types = manifest
    .types()
    .map(|t| t.as_str().map(str::to_string).unwrap_or_else(|| t.to_string()))
    .unwrap_or_default();
  if changed {
    print_success(&format!("Set types to {}", types));
  } else {
    print_info(&format!("types already set to {}", types));
  }

  Ok(())
}
