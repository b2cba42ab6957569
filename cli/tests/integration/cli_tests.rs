//! Integration tests for the `instllr` command line.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn instllr() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("instllr"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// An `instllr` whose config points at a missing file and whose GitHub API
/// points at a closed local port, so nothing real is read or fetched.
fn offline(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = instllr();
    cmd.env("INSTLLR_CONFIG", config_dir.path().join("absent.yaml"))
        .env("INSTLLR_GITHUB_API_URL", "http://127.0.0.1:9")
        .env_remove("GITHUB_TOKEN");
    cmd
}

#[test]
fn test_help_lists_flags() {
    instllr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--app-env"));
}

#[test]
fn test_version_flag_shows_version() {
    instllr()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_args_is_usage_error() {
    instllr().assert().code(2).stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_missing_host_is_usage_error() {
    instllr()
        .args(["acme/widget", "--port", "8080"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--host"));
}

#[test]
fn test_malformed_identity_exits_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    offline(&dir)
        .args(["acme-widget", "--host", "widget", "--port", "8080"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid argument: acme-widget"));
}

#[test]
fn test_two_tags_is_malformed() {
    let dir = tempfile::tempdir().expect("tempdir");
    offline(&dir)
        .args(["acme/widget:v1:v2", "--host", "widget", "--port", "8080"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid argument"));
}

#[test]
fn test_invalid_host_exits_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    offline(&dir)
        .args(["acme/widget", "--host", "../etc", "--port", "8080"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("../etc"));
}

#[test]
fn test_unreachable_api_exits_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    offline(&dir)
        .args(["acme/widget:v1", "--host", "widget", "--port", "8080"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Installing acme/widget:v1"))
        .stderr(predicate::str::contains("Cannot fetch release"));
}
