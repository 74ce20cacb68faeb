//! # scriptrun Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the scriptrun CLI, which runs a fixed external script
//! (by default `python idea-plugin-test/pyscr/test.py`) against a project
//! folder and reports the exit code and combined output. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Run the script with the current directory as input and output folder
//! scriptrun run
//!
//! # Show which interpreter, script and working directory would be used
//! scriptrun -v config
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to the command handler
//! 4. Format and display any errors that occur
//!
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (run, config)
mod common; // Shared utilities (process execution)
mod core; // Core infrastructure (config, errors, runner)

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "scriptrun",
    about = "Run an external script against a project folder and report its outcome",
    long_about = "Runs `<interpreter> <script> <input> <output>` in a fixed working directory,\n\
                  then prints the exit code and the combined stdout/stderr of the script.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Read configuration from this file instead of the user/project config files.
    #[arg(long, global = true, env = "SCRIPTRUN_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let config_path = cli.config.as_deref();
    let command_result = match cli.command {
        Commands::Run(args) => commands::run::handle_run(args, config_path).await,
        Commands::Config(args) => commands::config::handle_config(args, config_path).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
