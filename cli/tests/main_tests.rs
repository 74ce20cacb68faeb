//! # scriptrun CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! Top-level behavior of the `scriptrun` binary: `--help`, `--version` and
//! argument errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_main_help_flag() {
    scriptrun_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_main_version_flag() {
    scriptrun_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_run_help_lists_runner_flags() {
    scriptrun_cmd()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--interpreter"))
        .stdout(predicate::str::contains("--workdir"))
        .stdout(predicate::str::contains("--timeout"));
}

#[test]
fn test_missing_subcommand_fails() {
    scriptrun_cmd().assert().failure();
}
