//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets a package directory plus its own home, prefix and npm
/// locations, so no toolchain installed on the machine is picked up.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// A package with a minimal `package.json`.
  pub fn package(name: &str) -> Self {
    let env = Self::empty();
    env.write_file("pkg/package.json", &format!("{{\n  \"name\": \"{}\",\n  \"version\": \"1.0.0\"\n}}\n", name));
    env
  }

  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("pkg")).unwrap();
    Self { temp }
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.temp.path().join(relative_path)).unwrap()
  }

  fn dir(&self, name: &str) -> PathBuf {
    let p = self.temp.path().join(name);
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Package source directory.
  pub fn cwd(&self) -> PathBuf {
    self.dir("pkg")
  }

  /// Declaration output of a build with the default `--out`.
  pub fn output(&self) -> PathBuf {
    self.cwd().join("pkg").join("dist-types").join("index.d.ts")
  }

  /// Get a pre-configured Command for the packtypes binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `HOME` / `USERPROFILE`: isolated home directory
  /// - `PREFIX`: isolated global prefix
  /// - `npm_config_prefix`, `APPDATA`, `LOCALAPPDATA`: isolated global installs
  /// - `PACKTYPES_NODE`: a runtime that does not exist
  pub fn packtypes_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("packtypes");
    cmd.env("HOME", self.dir("home"));
    cmd.env("USERPROFILE", self.dir("home"));
    cmd.env("PREFIX", self.dir("prefix"));
    cmd.env("npm_config_prefix", self.dir("npm"));
    cmd.env_remove("NPM_CONFIG_PREFIX");
    cmd.env("APPDATA", self.dir("appdata"));
    cmd.env("LOCALAPPDATA", self.dir("localappdata"));
    cmd.env("PACKTYPES_NODE", self.temp.path().join("no-such-node"));
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
