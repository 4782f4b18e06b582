//! Declaration builds.
//!
//! A build walks [`Strategy::ORDER`] and stops at the first strategy whose
//! source exists. Each source is tried at most once and nothing is retried.
//! When no strategy applies the reporter gets a remediation hint and the
//! build fails with [`BuildError::NoToolchainFound`].

pub mod compiler;
mod strategy;
mod types;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use types::{BuildError, BuildReport, DeclarationSource, PlannedSource, Strategy};

use crate::consts::{NODE_ENTRY, TYPES_ENTRY};
use crate::host::{ModuleHost, NodeHost};
use crate::manifest::PackageManifest;
use crate::platform::{Probe, SystemProbe};
use crate::report::{Reporter, StderrReporter};

/// Printed when every strategy has been exhausted.
pub const NO_TOOLCHAIN_DIAGNOSTIC: &str = r#"
⚠️  dist-types/: Attempted to generate type definitions, but "typescript" package was not found.
                Please install either locally or globally and try again.
       $ pika add --dev typescript
[alt.] $ pika global add typescript
[alt.] *   Write your own type definition file to "index.d.ts"
"#;

/// Inputs of one build, supplied by the host.
pub struct BuildContext<'a> {
  /// Package source directory.
  pub cwd: PathBuf,
  /// Package output directory.
  pub out: PathBuf,
  pub reporter: &'a dyn Reporter,
  pub is_full: bool,
  pub manifest: &'a PackageManifest,
}

impl<'a> BuildContext<'a> {
  pub fn new(cwd: impl Into<PathBuf>, out: impl Into<PathBuf>, manifest: &'a PackageManifest) -> Self {
    Self {
      cwd: cwd.into(),
      out: out.into(),
      reporter: &StderrReporter,
      is_full: false,
      manifest,
    }
  }

  pub fn with_reporter(mut self, reporter: &'a dyn Reporter) -> Self {
    self.reporter = reporter;
    self
  }

  pub fn full(mut self, is_full: bool) -> Self {
    self.is_full = is_full;
    self
  }

  /// `<out>/dist-types/index.d.ts`
  pub fn target(&self) -> PathBuf {
    join_relative(&self.out, TYPES_ENTRY)
  }

  /// `<out>/dist-node/index.js`
  pub fn node_entry(&self) -> PathBuf {
    join_relative(&self.out, NODE_ENTRY)
  }
}

fn join_relative(base: &Path, relative: &str) -> PathBuf {
  relative.split('/').fold(base.to_path_buf(), |path, part| path.join(part))
}

/// Runs the strategy chain against injected environment and module host.
pub struct DeclarationBuilder<'a> {
  probe: &'a dyn Probe,
  host: &'a dyn ModuleHost,
}

impl<'a> DeclarationBuilder<'a> {
  pub fn new(probe: &'a dyn Probe, host: &'a dyn ModuleHost) -> Self {
    Self { probe, host }
  }

  /// Find the source a build would use, without writing anything.
  pub async fn plan(&self, cx: &BuildContext<'_>) -> Option<PlannedSource> {
    for strategy in Strategy::ORDER {
      match strategy.detect(cx, self.probe, self.host).await {
        Some(source) => {
          debug!(strategy = %strategy, "strategy matched");
          return Some(PlannedSource { strategy, source });
        }
        None => debug!(strategy = %strategy, "strategy not applicable"),
      }
    }
    None
  }

  /// Make sure `<out>/dist-types/index.d.ts` exists.
  pub async fn build(&self, cx: &BuildContext<'_>) -> Result<BuildReport, BuildError> {
    debug!(cwd = ?cx.cwd, out = ?cx.out, full = cx.is_full, "building declarations");

    let Some(PlannedSource { strategy, source }) = self.plan(cx).await else {
      cx.reporter.diagnostic(NO_TOOLCHAIN_DIAGNOSTIC);
      return Err(BuildError::NoToolchainFound);
    };

    info!(strategy = %strategy, "using declaration source");
    cx.reporter.info(&format!("dist-types/: using {}", strategy));
    source.materialize(cx, self.host).await?;

    Ok(BuildReport {
      strategy,
      source,
      output: cx.target(),
    })
  }
}

/// Build against the real process environment, inferring through `node`.
pub async fn build(cx: &BuildContext<'_>) -> Result<BuildReport, BuildError> {
  let probe = SystemProbe;
  let host = NodeHost::from_probe(&probe);
  DeclarationBuilder::new(&probe, &host).build(cx).await
}
