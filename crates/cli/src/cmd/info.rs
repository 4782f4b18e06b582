use std::path::Path;

use anyhow::Result;

use packtypes_lib::global::{find_prefix, resolve_global_modules_dir};
use packtypes_lib::platform::{Probe, SystemProbe};
use packtypes_lib::toolchain;

use super::absolute;
use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_info(cwd: &Path, format: OutputFormat) -> Result<()> {
  let probe = SystemProbe;
  let cwd = absolute(cwd)?;

  let prefix = find_prefix(&probe);
  let global_dir = resolve_global_modules_dir(&probe);
  let toolchain = toolchain::locate(&cwd, &probe);

  if format.is_json() {
    return print_json(&serde_json::json!({
      "os": probe.os(),
      "prefix": prefix,
      "global_modules_dir": global_dir,
      "toolchain": toolchain,
    }));
  }

  println!("System:");
  print_stat("Platform", probe.os().as_str());
  match &prefix {
    Some(prefix) => print_stat("Prefix", &format!("{} ({})", prefix.path.display(), prefix.source)),
    None => print_stat("Prefix", "not found"),
  }
  if let Some(dir) = &global_dir {
    print_stat("Global modules", &dir.display().to_string());
  }
  match &toolchain {
    Some(tc) => print_stat(
      "Toolchain",
      &format!(
        "{} {} ({})",
        tc.dir.display(),
        tc.version.as_deref().unwrap_or("unknown version"),
        tc.source
      ),
    ),
    None => print_stat("Toolchain", "not found"),
  }

  Ok(())
}
