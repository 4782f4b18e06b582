//! Build and plan command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn build_copies_root_declaration() {
  let env = TestEnv::package("left-pad");
  env.write_file("pkg/index.d.ts", "export declare function leftPad(s: string): string;\n");

  env
    .packtypes_cmd()
    .arg("build")
    .arg("--cwd")
    .arg(env.cwd())
    .assert()
    .success()
    .stdout(predicate::str::contains("dist-types/: using root-declaration"));

  assert_eq!(
    std::fs::read_to_string(env.output()).unwrap(),
    "export declare function leftPad(s: string): string;\n"
  );
}

#[test]
fn build_honours_out_flag() {
  let env = TestEnv::package("left-pad");
  env.write_file("pkg/src/index.d.ts", "export {};\n");
  let out = env.temp.path().join("custom-out");

  env
    .packtypes_cmd()
    .args(["build", "--full", "--cwd"])
    .arg(env.cwd())
    .arg("--out")
    .arg(&out)
    .assert()
    .success();

  assert_eq!(env.read_file("custom-out/dist-types/index.d.ts"), "export {};\n");
}

#[test]
fn build_uses_published_types() {
  let env = TestEnv::package("left-pad");
  env.write_file("pkg/node_modules/@types/left-pad/index.d.ts", "declare const x: 1;\n");

  env
    .packtypes_cmd()
    .arg("build")
    .arg("--cwd")
    .arg(env.cwd())
    .arg("--format")
    .arg("json")
    .assert()
    .success()
    .stdout(predicate::str::contains("\"strategy\": \"published_types\""))
    .stdout(predicate::str::starts_with("{"));

  assert_eq!(std::fs::read_to_string(env.output()).unwrap(), "declare const x: 1;\n");
}

#[test]
fn build_without_any_source_fails_with_hint() {
  let env = TestEnv::package("left-pad");

  env
    .packtypes_cmd()
    .arg("build")
    .arg("--cwd")
    .arg(env.cwd())
    .assert()
    .failure()
    .stderr(predicate::str::contains("\"typescript\" package was not found"))
    .stderr(predicate::str::contains("Failed to build: dist-types/"));

  assert!(!env.cwd().join("pkg").join("dist-types").exists());
}

#[cfg(unix)]
#[test]
fn build_propagates_compiler_failure() {
  use std::os::unix::fs::PermissionsExt;

  let env = TestEnv::package("left-pad");
  env.write_file("pkg/tsconfig.json", "{}");
  env.write_file("pkg/node_modules/.bin/tsc", "#!/bin/sh\necho 'error TS6053: missing file'\nexit 1\n");
  std::fs::set_permissions(
    env.cwd().join("node_modules/.bin/tsc"),
    std::fs::Permissions::from_mode(0o755),
  )
  .unwrap();

  env
    .packtypes_cmd()
    .arg("build")
    .arg("--cwd")
    .arg(env.cwd())
    .assert()
    .failure()
    .stderr(predicate::str::contains("error TS6053"));
}

#[test]
fn plan_reports_source_without_writing() {
  let env = TestEnv::package("left-pad");
  env.write_file("pkg/src/index.d.ts", "export {};\n");

  env
    .packtypes_cmd()
    .arg("plan")
    .arg("--cwd")
    .arg(env.cwd())
    .assert()
    .success()
    .stdout(predicate::str::contains("src-declaration"));

  assert!(!env.output().exists());
}

#[test]
fn plan_with_nothing_available_succeeds() {
  let env = TestEnv::package("left-pad");

  env
    .packtypes_cmd()
    .arg("plan")
    .arg("--cwd")
    .arg(env.cwd())
    .arg("--format")
    .arg("json")
    .assert()
    .success()
    .stdout(predicate::str::contains("null"));
}
