//! Manifest command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn manifest_adds_types_field() {
  let env = TestEnv::package("left-pad");

  env
    .packtypes_cmd()
    .arg("manifest")
    .arg("--cwd")
    .arg(env.cwd())
    .assert()
    .success()
    .stdout(predicate::str::contains("dist-types/index.d.ts"));

  let written = env.read_file("pkg/package.json");
  assert_eq!(
    written,
    "{\n  \"name\": \"left-pad\",\n  \"version\": \"1.0.0\",\n  \"types\": \"dist-types/index.d.ts\"\n}\n"
  );
}

#[test]
fn manifest_keeps_existing_types() {
  let env = TestEnv::empty();
  let original = "{\"name\":\"left-pad\",\"types\":\"lib/index.d.ts\"}";
  env.write_file("pkg/package.json", original);

  env
    .packtypes_cmd()
    .arg("manifest")
    .arg("--cwd")
    .arg(env.cwd())
    .arg("--format")
    .arg("json")
    .assert()
    .success()
    .stdout(predicate::str::contains("\"changed\": false"));

  assert_eq!(env.read_file("pkg/package.json"), original);
}
