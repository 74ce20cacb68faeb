//! # scriptrun Script Runner
//!
//! File: cli/src/core/runner.rs
//!
//! ## Overview
//!
//! The capability "run an external computation given an input folder and an
//! output folder". `ScriptRunner` is the seam; `ProcessScriptRunner` is the
//! real implementation that launches
//!
//! ```text
//! <interpreter> <script_path> <input_folder> <output_folder>
//! ```
//!
//! in the configured working directory (the user's home directory unless
//! configured otherwise, never one of the supplied folders).
//!
//! ## Architecture
//!
//! - `InvocationRequest`: the two folder paths, taken verbatim. No
//!   normalization, existence check or escaping.
//! - `CapturedOutput` (from `common::process`): exit code plus the combined
//!   stdout/stderr text. The runner returns the process result unchanged.
//! - `ScriptRunner::execute`: async; it stays pending for the child's whole
//!   lifetime. Callers that must stay responsive should spawn it onto its own
//!   task.
//!
//! Tests substitute their own `ScriptRunner` so no interpreter is needed.
//!
use crate::common::process::{self, CapturedOutput};
use crate::core::config::RunnerConfig;
use crate::core::error::ScriptRunError;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// The pair of folders handed to the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub input_folder: String,
    pub output_folder: String,
}

impl InvocationRequest {
    /// Builds a request, rejecting absent or empty folders.
    pub fn from_parts(
        input_folder: Option<&str>,
        output_folder: Option<&str>,
    ) -> Result<Self, ScriptRunError> {
        let input_folder = input_folder
            .filter(|s| !s.is_empty())
            .ok_or(ScriptRunError::MissingInput("input"))?;
        let output_folder = output_folder
            .filter(|s| !s.is_empty())
            .ok_or(ScriptRunError::MissingInput("output"))?;
        Ok(Self {
            input_folder: input_folder.to_string(),
            output_folder: output_folder.to_string(),
        })
    }
}

/// Runs an external computation over an input and an output folder.
pub trait ScriptRunner {
    fn execute(
        &self,
        request: &InvocationRequest,
    ) -> impl Future<Output = Result<CapturedOutput, ScriptRunError>> + Send;
}

/// `ScriptRunner` backed by a real child process.
#[derive(Debug, Clone)]
pub struct ProcessScriptRunner {
    config: RunnerConfig,
}

impl ProcessScriptRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Full argv, interpreter first.
    pub fn command_line(&self, request: &InvocationRequest) -> Vec<String> {
        vec![
            self.config.interpreter.clone(),
            self.config.script_path.clone(),
            request.input_folder.clone(),
            request.output_folder.clone(),
        ]
    }

    pub fn working_directory(&self) -> &Path {
        &self.config.working_directory
    }

    fn timeout(&self) -> Option<Duration> {
        self.config.timeout_secs.map(Duration::from_secs)
    }
}

impl ScriptRunner for ProcessScriptRunner {
    async fn execute(
        &self,
        request: &InvocationRequest,
    ) -> Result<CapturedOutput, ScriptRunError> {
        let argv = self.command_line(request);
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| ScriptRunError::Config("empty command line".to_string()))?;
        info!(
            "Running {} {} in {}",
            program,
            args.join(" "),
            self.working_directory().display()
        );
        let captured =
            process::run_merged(program, args, self.working_directory(), self.timeout()).await?;
        debug!(
            "Script finished with exit code {} ({} bytes of output)",
            captured.exit_code,
            captured.output.len()
        );
        Ok(captured)
    }
}
