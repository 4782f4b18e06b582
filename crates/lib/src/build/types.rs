//! Types for declaration builds.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::toolchain::Toolchain;
use crate::util::fs::FsError;

/// Errors that can occur while building declarations.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The compiler exited unsuccessfully.
  #[error("{} {}{}", program.display(), fmt_status(*code), fmt_output(output))]
  ToolchainInvocation {
    program: PathBuf,
    code: Option<i32>,
    output: String,
  },

  /// The compiler could not be started.
  #[error("failed to run {}: {source}", program.display())]
  ToolchainSpawn {
    program: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The compiled entry or the toolchain failed to load during inference.
  #[error("failed to load {}: {message}", entry.display())]
  ModuleLoad { entry: PathBuf, message: String },

  /// `@types/<name>` exists but holds no declaration entry.
  #[error("no declaration entry found in {}", dir.display())]
  PublishedTypesEntry { dir: PathBuf },

  /// Every source was tried and none applied.
  #[error("Failed to build: dist-types/")]
  NoToolchainFound,

  #[error(transparent)]
  Fs(#[from] FsError),
}

fn fmt_status(code: Option<i32>) -> String {
  match code {
    Some(code) => format!("exited with code {}", code),
    None => "terminated by signal".to_string(),
  }
}

fn fmt_output(output: &str) -> String {
  if output.is_empty() {
    String::new()
  } else {
    format!("\n{}", output)
  }
}

/// The declaration sources, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
  /// `<cwd>/index.d.ts`
  RootDeclaration,
  /// `<cwd>/src/index.d.ts`
  SrcDeclaration,
  /// `<cwd>/node_modules/.bin/tsc` with a `tsconfig.json`
  LocalCompiler,
  /// `<cwd>/node_modules/@types/<name>`
  PublishedTypes,
  /// Inference from the compiled node entry.
  Inference,
}

impl Strategy {
  pub const ORDER: [Strategy; 5] = [
    Strategy::RootDeclaration,
    Strategy::SrcDeclaration,
    Strategy::LocalCompiler,
    Strategy::PublishedTypes,
    Strategy::Inference,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Strategy::RootDeclaration => "root-declaration",
      Strategy::SrcDeclaration => "src-declaration",
      Strategy::LocalCompiler => "local-compiler",
      Strategy::PublishedTypes => "published-types",
      Strategy::Inference => "inference",
    }
  }
}

impl fmt::Display for Strategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// What a strategy found, enough to materialize the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationSource {
  HandWritten { path: PathBuf },
  Compiler { program: PathBuf, project: PathBuf },
  /// `entry` is `None` when the directory holds no declaration file.
  Published { dir: PathBuf, entry: Option<PathBuf> },
  Inferred { toolchain: Toolchain, entry: PathBuf },
}

/// The first applicable strategy and its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedSource {
  pub strategy: Strategy,
  pub source: DeclarationSource,
}

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
  pub strategy: Strategy,
  pub source: DeclarationSource,
  /// The declaration file written.
  pub output: PathBuf,
}
