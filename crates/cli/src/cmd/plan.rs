//! Implementation of the `packtypes plan` command.

use anyhow::Result;

use packtypes_lib::build::{BuildContext, DeclarationBuilder, DeclarationSource};
use packtypes_lib::host::NodeHost;
use packtypes_lib::platform::SystemProbe;

use super::runtime;
use crate::PackageArgs;
use crate::output::{ConsoleReporter, OutputFormat, print_info, print_json, print_stat, print_warning};

pub fn cmd_plan(args: &PackageArgs, format: OutputFormat) -> Result<()> {
  let package = args.load()?;
  let probe = SystemProbe;
  let host = NodeHost::from_probe(&probe);
  let reporter = ConsoleReporter::new(format);

  let cx = BuildContext::new(&package.cwd, &package.out, &package.manifest)
    .with_reporter(&reporter)
    .full(args.full);
  let planned = runtime()?.block_on(DeclarationBuilder::new(&probe, &host).plan(&cx));

  if format.is_json() {
    return print_json(&planned);
  }

  let Some(planned) = planned else {
    print_warning("No declaration source found; a build would fail");
    return Ok(());
  };

  print_info(&format!("Would use {}", planned.strategy));
  match &planned.source {
    DeclarationSource::HandWritten { path } => print_stat("Copy", &path.display().to_string()),
    DeclarationSource::Compiler { program, project } => {
      print_stat("Compiler", &program.display().to_string());
      print_stat("Project", &project.display().to_string());
    }
    DeclarationSource::Published { dir, entry } => {
      print_stat("Package", &dir.display().to_string());
      match entry {
        Some(entry) => print_stat("Copy", &entry.display().to_string()),
        None => print_warning("No declaration entry in published types package"),
      }
    }
    DeclarationSource::Inferred { toolchain, entry } => {
      print_stat("Toolchain", &toolchain.dir.display().to_string());
      print_stat("Found", &toolchain.source.to_string());
      if let Some(version) = &toolchain.version {
        print_stat("Version", version);
      }
      print_stat("Entry", &entry.display().to_string());
    }
  }
  print_stat("Output", &cx.target().display().to_string());

  Ok(())
}
