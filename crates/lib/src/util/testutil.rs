//! Test utilities for packtypes-lib.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::build::BuildError;
use crate::host::{ExportCheck, ModuleHost};
use crate::platform::{Os, Probe};
use crate::report::Reporter;
use crate::toolchain::{Toolchain, ToolchainSource};

/// In-memory environment.
///
/// `exists` consults the set of fake paths first and then the real
/// filesystem, so tests can mix made-up home directories with temp trees.
#[derive(Debug, Clone)]
pub struct FakeProbe {
  pub vars: HashMap<String, String>,
  pub home: Option<PathBuf>,
  pub os: Os,
  pub cwd: Option<PathBuf>,
  pub existing: HashSet<PathBuf>,
}

impl FakeProbe {
  pub fn new(os: Os) -> Self {
    Self {
      vars: HashMap::new(),
      home: Some(PathBuf::from("/home/user")),
      os,
      cwd: Some(PathBuf::from("/work")),
      existing: HashSet::new(),
    }
  }

  /// An environment whose every global search location lives under `root`.
  pub fn isolated(root: &Path) -> Self {
    let mut probe = Self::new(Os::current());
    probe.home = Some(root.join("home"));
    probe.cwd = Some(root.to_path_buf());
    probe.set_var("npm_config_prefix", root.join("npm").to_str().unwrap());
    probe.set_var("APPDATA", root.join("appdata").to_str().unwrap());
    probe.set_var("LOCALAPPDATA", root.join("localappdata").to_str().unwrap());
    probe
  }

  pub fn set_var(&mut self, name: &str, value: &str) -> &mut Self {
    self.vars.insert(name.to_string(), value.to_string());
    self
  }

  pub fn touch(&mut self, path: impl Into<PathBuf>) -> &mut Self {
    self.existing.insert(path.into());
    self
  }
}

impl Probe for FakeProbe {
  fn var(&self, name: &str) -> Option<String> {
    self.vars.get(name).cloned()
  }

  fn home_dir(&self) -> Option<PathBuf> {
    self.home.clone()
  }

  fn os(&self) -> Os {
    self.os
  }

  fn current_dir(&self) -> Option<PathBuf> {
    self.cwd.clone()
  }

  fn exists(&self, path: &Path) -> bool {
    self.existing.contains(path) || path.exists()
  }
}

/// Module host that answers from fixed values and records its calls.
#[derive(Debug, Default)]
pub struct FakeHost {
  pub exports: bool,
  /// Toolchains from these locations fail to load.
  pub broken: Vec<ToolchainSource>,
  pub output: Option<String>,
  pub calls: Mutex<Vec<String>>,
}

impl FakeHost {
  pub fn with_inference(output: &str) -> Self {
    Self {
      exports: true,
      broken: Vec::new(),
      output: Some(output.to_string()),
      calls: Mutex::new(Vec::new()),
    }
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }
}

#[async_trait]
impl ModuleHost for FakeHost {
  async fn check_export(&self, toolchain: &Toolchain, export: &str) -> ExportCheck {
    self
      .calls
      .lock()
      .unwrap()
      .push(format!("check_export {} {}", toolchain.source, export));
    if self.broken.contains(&toolchain.source) {
      ExportCheck::LoadFailed
    } else if self.exports {
      ExportCheck::Exported
    } else {
      ExportCheck::Missing
    }
  }

  async fn generate(
    &self,
    _toolchain: &Toolchain,
    module_name: &str,
    entry: &Path,
    _options: &Value,
  ) -> Result<String, BuildError> {
    self
      .calls
      .lock()
      .unwrap()
      .push(format!("generate {} {}", module_name, entry.display()));
    self.output.clone().ok_or_else(|| BuildError::ModuleLoad {
      entry: entry.to_path_buf(),
      message: "Cannot find module".to_string(),
    })
  }
}

/// Reporter that keeps every message.
#[derive(Debug, Default)]
pub struct RecordingReporter {
  pub messages: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingReporter {
  pub fn of_kind(&self, kind: &str) -> Vec<String> {
    self
      .messages
      .lock()
      .unwrap()
      .iter()
      .filter(|(k, _)| *k == kind)
      .map(|(_, msg)| msg.clone())
      .collect()
  }

  pub fn diagnostics(&self) -> Vec<String> {
    self.of_kind("diagnostic")
  }
}

impl Reporter for RecordingReporter {
  fn info(&self, message: &str) {
    self.messages.lock().unwrap().push(("info", message.to_string()));
  }

  fn warning(&self, message: &str) {
    self.messages.lock().unwrap().push(("warning", message.to_string()));
  }

  fn diagnostic(&self, message: &str) {
    self.messages.lock().unwrap().push(("diagnostic", message.to_string()));
  }
}

/// Write a file, creating parent directories.
pub fn write_file(path: &Path, contents: &str) {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(path, contents).unwrap();
}

/// Lay out a resolvable toolchain package under `<dir>/node_modules`.
pub fn install_toolchain(dir: &Path, version: &str) -> PathBuf {
  let pkg = dir.join("node_modules").join("typescript");
  write_file(
    &pkg.join("package.json"),
    &format!(r#"{{ "name": "typescript", "version": "{}", "main": "lib/typescript.js" }}"#, version),
  );
  write_file(&pkg.join("lib/typescript.js"), "module.exports = {};\n");
  pkg
}
