//! Integration tests for the `validate` command.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_validate_valid_file() {
    let env = TestEnv::new();
    env.write("base.yaml", "parameters:\n  HOST: localhost\n");
    env.write("app.yaml", "_imports: [base.yaml]\nurl: \"http://%HOST%\"\n");

    env.command()
        .args(["validate", "app.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_uses_process_environment() {
    let env = TestEnv::new();
    env.write("app.yaml", "url: \"http://%STRATUM_TEST_HOST%\"\n");

    env.command()
        .env("STRATUM_TEST_HOST", "example.com")
        .args(["validate", "app.yaml"])
        .assert()
        .success();
}

#[test]
fn test_validate_missing_parameter() {
    let env = TestEnv::new();
    env.write("app.yaml", "url: \"http://%STRATUM_UNSET_PARAMETER%\"\n");

    env.command()
        .env_remove("STRATUM_UNSET_PARAMETER")
        .args(["validate", "app.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("STRATUM_UNSET_PARAMETER"))
        .stderr(predicate::str::contains("Configuration validation failed"));
}

#[test]
fn test_validate_broken_yaml() {
    let env = TestEnv::new();
    env.write("app.yaml", "a: [1, 2\n");

    env.command()
        .args(["validate", "app.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn test_validate_missing_import() {
    let env = TestEnv::new();
    env.write("app.yaml", "_imports: [gone.yaml]\n");

    env.command()
        .args(["validate", "app.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("gone.yaml"));
}

#[test]
fn test_validate_invalid_pattern() {
    let env = TestEnv::new();
    env.write("app.yaml", "matcher: !regex '(unclosed'\n");

    env.command()
        .args(["validate", "app.yaml"])
        .assert()
        .failure()
        .code(1);
}
