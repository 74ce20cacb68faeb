//! # scriptrun CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`run.rs`, `config.rs`, ...).
//! Each helper returns a command for the compiled `scriptrun` binary with the
//! environment scrubbed of `RUST_LOG` and `SCRIPTRUN_*` so a developer's shell
//! cannot change what the tests see.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// # Get scriptrun Command (`scriptrun_cmd`)
///
/// ## Panics
/// Panics if the `scriptrun` binary cannot be found via `Command::cargo_bin`.
pub fn scriptrun_cmd() -> Command {
    let mut cmd = Command::cargo_bin("scriptrun").expect("Failed to find scriptrun binary for testing");
    for var in [
        "RUST_LOG",
        "SCRIPTRUN_CONFIG",
        "SCRIPTRUN_INTERPRETER",
        "SCRIPTRUN_SCRIPT",
        "SCRIPTRUN_WORKDIR",
        "SCRIPTRUN_TIMEOUT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Writes an empty `[runner]` config file into `dir` and returns its path.
/// Passing it with `--config` keeps user and project config files out of the test.
pub fn write_empty_config(dir: &Path) -> PathBuf {
    let path = dir.join("scriptrun.toml");
    fs::write(&path, "[runner]\n").expect("Failed to write test config");
    path
}

/// Writes a shell script named `name` into `dir` and returns its path.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("Failed to write test script");
    path
}
