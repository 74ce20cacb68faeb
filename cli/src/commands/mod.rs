//! # scriptrun Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the scriptrun CLI and the
//! runner flags they share.
//!
//! ## Commands
//!
//! - `run`: Run the configured script against a project folder
//! - `config`: Print the resolved runner configuration
//!
//! Each command defines its own arguments structure and handler function.
//!
use crate::core::config::PartialRunnerConfig;
use clap::Args;
use std::path::PathBuf;

/// Print the resolved runner configuration.
pub mod config;
/// Run the configured script against a project folder and report its outcome.
pub mod run;

/// Flags that override the configured runner for one invocation.
#[derive(Args, Debug, Default, Clone)]
pub struct RunnerFlags {
    /// Program used to run the script (looked up on PATH).
    #[arg(long, env = "SCRIPTRUN_INTERPRETER")]
    interpreter: Option<String>,

    /// Script passed to the interpreter; relative paths resolve against the working directory.
    #[arg(long = "script", env = "SCRIPTRUN_SCRIPT")]
    script_path: Option<String>,

    /// Working directory of the script process (defaults to your home directory).
    #[arg(long = "workdir", short = 'w', env = "SCRIPTRUN_WORKDIR")]
    working_directory: Option<PathBuf>,

    /// Kill the script if it runs longer than this many seconds.
    #[arg(long = "timeout", env = "SCRIPTRUN_TIMEOUT")]
    timeout_secs: Option<u64>,
}

impl RunnerFlags {
    pub fn to_overrides(&self) -> PartialRunnerConfig {
        PartialRunnerConfig {
            interpreter: self.interpreter.clone(),
            script_path: self.script_path.clone(),
            working_directory: self.working_directory.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
