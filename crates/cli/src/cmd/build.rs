//! Implementation of the `packtypes build` command.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use packtypes_lib::build::{BuildContext, DeclarationBuilder};
use packtypes_lib::host::NodeHost;
use packtypes_lib::platform::SystemProbe;

use super::runtime;
use crate::PackageArgs;
use crate::output::{ConsoleReporter, OutputFormat, format_duration, print_json, print_stat, print_success};

/// Execute the build command.
///
/// Loads `<cwd>/package.json`, applies the manifest defaults in memory and
/// runs the declaration build against the real environment.
pub fn cmd_build(args: &PackageArgs, format: OutputFormat) -> Result<()> {
  let package = args.load()?;
  let probe = SystemProbe;
  let host = NodeHost::from_probe(&probe);
  let reporter = ConsoleReporter::new(format);

  let cx = BuildContext::new(&package.cwd, &package.out, &package.manifest)
    .with_reporter(&reporter)
    .full(args.full);

  let start = Instant::now();
  let report = runtime()?
    .block_on(DeclarationBuilder::new(&probe, &host).build(&cx))
    .context("Declaration build failed")?;
  let elapsed = start.elapsed();
  info!(output = %report.output.display(), "declarations written");

  if format.is_json() {
    print_json(&report)?;
  } else {
    print_success(&format!("dist-types/index.d.ts built in {}", format_duration(elapsed)));
    print_stat("Strategy", report.strategy.as_str());
    print_stat("Output", &report.output.display().to_string());
  }

  Ok(())
}
