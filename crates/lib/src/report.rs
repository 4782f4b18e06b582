//! Reporting capability handed to a build by its host.

use tracing::{info, warn};

pub trait Reporter: Send + Sync {
  fn info(&self, message: &str);

  fn warning(&self, message: &str);

  /// Multi-line, user-facing text for the error stream.
  fn diagnostic(&self, message: &str);
}

/// Routes info and warnings through `tracing` and diagnostics to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter;

impl Reporter for StderrReporter {
  fn info(&self, message: &str) {
    info!("{}", message);
  }

  fn warning(&self, message: &str) {
    warn!("{}", message);
  }

  fn diagnostic(&self, message: &str) {
    eprintln!("{}", message);
  }
}
