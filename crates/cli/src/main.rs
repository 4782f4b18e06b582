mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// packtypes - build the type-declaration artifact of a package
#[derive(Parser)]
#[command(name = "packtypes")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

/// Package directories shared by the build commands.
#[derive(Args, Debug, Clone)]
pub struct PackageArgs {
  /// Package source directory
  #[arg(long, default_value = ".")]
  cwd: PathBuf,

  /// Package output directory (default: <cwd>/pkg)
  #[arg(long)]
  out: Option<PathBuf>,

  /// Mark the build as a full build
  #[arg(long)]
  full: bool,
}

#[derive(Subcommand)]
enum Commands {
  /// Write <out>/dist-types/index.d.ts
  Build {
    #[command(flatten)]
    package: PackageArgs,
  },

  /// Show which declaration source a build would use
  Plan {
    #[command(flatten)]
    package: PackageArgs,
  },

  /// Add the default `types` field to package.json
  Manifest {
    /// Package source directory
    #[arg(long, default_value = ".")]
    cwd: PathBuf,
  },

  /// Show platform and global install locations
  Info {
    /// Package source directory used for toolchain lookup
    #[arg(long, default_value = ".")]
    cwd: PathBuf,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Build { package } => cmd::cmd_build(&package, cli.format),
    Commands::Plan { package } => cmd::cmd_plan(&package, cli.format),
    Commands::Manifest { cwd } => cmd::cmd_manifest(&cwd, cli.format),
    Commands::Info { cwd } => cmd::cmd_info(&cwd, cli.format),
  }
}
