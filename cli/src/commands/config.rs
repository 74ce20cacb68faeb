//! # scriptrun Config Handler
//!
//! File: cli/src/commands/config.rs
//!
//! Implements `scriptrun config`: loads the configuration exactly as `run`
//! would (files, then flags and `SCRIPTRUN_*` variables) and prints the result,
//! including the command line a run in the current directory would use.
//!
use crate::{
    commands::RunnerFlags,
    core::{
        config::{self, RunnerConfig},
        error::Result,
    },
};
use anyhow::Context;
use clap::Parser;
use std::path::Path;
use tracing::info;

/// # Config Arguments (`ConfigArgs`)
#[derive(Parser, Debug)]
#[command(about = "Print the resolved runner configuration")]
pub struct ConfigArgs {
    #[command(flatten)]
    runner: RunnerFlags,
}

pub async fn handle_config(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    info!("Handling config command...");
    let cfg = config::load_config(config_path, &args.runner.to_overrides())
        .context("Failed to load scriptrun configuration")?;
    let project = std::env::current_dir().context("Failed to get current directory")?;
    println!("{}", describe(&cfg.runner, &project.to_string_lossy()));
    Ok(())
}

fn describe(runner: &RunnerConfig, project: &str) -> String {
    let timeout = runner
        .timeout_secs
        .map(|s| format!("{s}s"))
        .unwrap_or_else(|| "none".to_string());
    format!(
        "interpreter       = {}\n\
         script_path       = {}\n\
         working_directory = {}\n\
         timeout           = {}\n\
         command           = {} {} {} {}",
        runner.interpreter,
        runner.script_path,
        runner.working_directory.display(),
        timeout,
        runner.interpreter,
        runner.script_path,
        project,
        project
    )
}
