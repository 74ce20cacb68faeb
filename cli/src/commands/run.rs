//! # scriptrun Run Handler
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! This module implements `scriptrun run`, the invocation surface of the
//! script runner. It resolves the project folder, uses it as both the input
//! and the output folder unless either is given explicitly, and hands the pair
//! to a `ScriptRunner`.
//!
//! ## Architecture
//!
//! 1. Load configuration (`core::config`) with the command-line overrides applied.
//! 2. Resolve the project folder (`--project`, else the current directory).
//!    Relative `--project`/`--input`/`--output` values are made absolute
//!    against the current directory, since the script runs elsewhere.
//! 3. `ProjectService::run_script_task` checks that both folders are present.
//!    If one is missing it logs a fixed error and returns `TaskOutcome::Skipped`
//!    without spawning anything.
//! 4. Otherwise the runner executes the script and the report is printed:
//!
//! ```text
//! Process exited with code: <int>
//! Process output:
//! <combined stdout/stderr>
//! ```
//!
//! A nonzero script exit code is reported, not treated as a failure. Launch,
//! read and wait failures propagate as errors and make the CLI exit with 1.
//!
//! ## Usage
//!
//! ```bash
//! # Run against the current directory
//! scriptrun run
//!
//! # Explicit folders and interpreter
//! scriptrun run --input ./src --output ./graphs --interpreter python3
//! ```
//!
use crate::{
    commands::RunnerFlags,
    common::process::CapturedOutput,
    core::{
        config,
        error::{Result, ScriptRunError},
        runner::{InvocationRequest, ProcessScriptRunner, ScriptRunner},
    },
};
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Logged when no usable folder pair can be resolved.
pub const NO_OUTPUT_FOLDER_MESSAGE: &str =
    "No output folder is available for the project; skipping script run.";

/// # Run Arguments (`RunArgs`)
#[derive(Parser, Debug)]
#[command(
    about = "Run the configured script against a project folder",
    long_about = "Runs `<interpreter> <script> <input> <output>` in the configured working directory\n\
                  and prints the exit code followed by the combined stdout/stderr."
)]
pub struct RunArgs {
    /// Project folder (defaults to the current directory).
    #[arg(long, short = 'p')]
    project: Option<PathBuf>,

    /// Folder the script reads from (defaults to the project folder).
    #[arg(long, short = 'i')]
    input: Option<String>,

    /// Folder the script writes to (defaults to the project folder).
    #[arg(long, short = 'o')]
    output: Option<String>,

    #[command(flatten)]
    runner: RunnerFlags,
}

/// What happened to a requested script run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// A folder was missing; nothing was spawned.
    Skipped,
    Completed(CapturedOutput),
}

/// Project-scoped entry point that guards and delegates script runs.
pub struct ProjectService<R> {
    project_folder: Option<String>,
    runner: R,
}

impl<R: ScriptRunner> ProjectService<R> {
    pub fn new(project_folder: Option<String>, runner: R) -> Self {
        let name = project_folder
            .as_deref()
            .and_then(|folder| Path::new(folder).file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<unknown>".to_string());
        info!("Project service ready for '{}'", name);
        Self {
            project_folder,
            runner,
        }
    }

    pub fn project_folder(&self) -> Option<&str> {
        self.project_folder.as_deref()
    }

    /// Runs the script over `input`/`output`, or skips if either is absent or empty.
    pub async fn run_script_task(
        &self,
        input: Option<&str>,
        output: Option<&str>,
    ) -> std::result::Result<TaskOutcome, ScriptRunError> {
        let request = match InvocationRequest::from_parts(input, output) {
            Ok(request) => request,
            Err(e) => {
                debug!("Not running script: {e}");
                error!("{}", NO_OUTPUT_FOLDER_MESSAGE);
                return Ok(TaskOutcome::Skipped);
            }
        };
        let result = self.runner.execute(&request).await?;
        Ok(TaskOutcome::Completed(result))
    }
}

/// Renders the two console blocks for a finished run.
pub fn format_report(result: &CapturedOutput) -> String {
    format!(
        "Process exited with code: {}\nProcess output:\n{}",
        result.exit_code, result.output
    )
}

/// Makes a folder given on the command line absolute against `invoking_dir`.
/// The script runs in another directory, so relative values would otherwise
/// resolve there. Empty values stay empty for the missing-folder check;
/// non-UTF-8 paths count as absent.
fn anchor_folder(folder: &str, invoking_dir: &Path) -> Option<String> {
    if folder.is_empty() {
        return Some(String::new());
    }
    let anchored: PathBuf = invoking_dir.join(folder).components().collect();
    anchored.to_str().map(str::to_string)
}

/// Project folder from `--project`, else the invoking directory itself.
fn resolve_project_folder(project: Option<&Path>, invoking_dir: &Path) -> Option<String> {
    match project {
        Some(path) => anchor_folder(path.to_str()?, invoking_dir),
        None => invoking_dir.to_str().map(str::to_string),
    }
}

/// # Handle Run Command (`handle_run`)
///
/// Loads configuration, builds a `ProcessScriptRunner` and runs the script for
/// the resolved project folder.
///
/// ## Returns
///
/// * `Ok(())` when the script ran (any exit code) or the run was skipped.
/// * `Err` when configuration is invalid or the process could not be launched,
///   read or waited on.
pub async fn handle_run(args: RunArgs, config_path: Option<&Path>) -> Result<()> {
    info!("Handling run command...");
    debug!("Run args: {:?}", args);

    let cfg = config::load_config(config_path, &args.runner.to_overrides())
        .context("Failed to load scriptrun configuration")?;

    let invoking_dir = std::env::current_dir().context("Failed to get current directory")?;
    let project_folder = resolve_project_folder(args.project.as_deref(), &invoking_dir);
    let service = ProjectService::new(project_folder, ProcessScriptRunner::new(cfg.runner));

    let input = args
        .input
        .as_deref()
        .and_then(|folder| anchor_folder(folder, &invoking_dir));
    let output = args
        .output
        .as_deref()
        .and_then(|folder| anchor_folder(folder, &invoking_dir));
    let input = input.as_deref().or(service.project_folder());
    let output = output.as_deref().or(service.project_folder());

    let outcome = service
        .run_script_task(input, output)
        .await
        .context("Script run failed")?;

    if let TaskOutcome::Completed(result) = outcome {
        if !result.succeeded() {
            warn!("Script exited with non-zero code {}", result.exit_code);
        }
        println!("{}", format_report(&result));
    }
    Ok(())
}
