//! # scriptrun Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout scriptrun.
//!
//! ## Architecture
//!
//! The error system has two parts:
//! - `ScriptRunError`: a `thiserror` enum describing why a script invocation
//!   did not produce a result. Runners return it directly so callers and tests
//!   can match on the failure kind.
//! - `Result<T>`: an alias for `anyhow::Result<T>` used by command handlers,
//!   where adding context matters more than the concrete type.
//!
//! A script that runs and exits with a nonzero code is **not** an error; the
//! exit code is part of the successful `CapturedOutput`.
//!
//! ## Examples
//!
//! ```rust
//! match runner.execute(&request).await {
//!     Ok(result) => println!("{}", format_report(&result)),
//!     Err(ScriptRunError::Launch { program, .. }) => {
//!         eprintln!("Could not start '{}'. Is it on PATH?", program);
//!     }
//!     Err(e) => return Err(e).context("Script run failed"),
//! }
//! ```
//!
use std::io;
use thiserror::Error;

/// Failure kinds of a single script invocation.
#[derive(Error, Debug)]
pub enum ScriptRunError {
    #[error("Missing required {0} folder")]
    MissingInput(&'static str),

    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read process output: {0}")]
    ReadOutput(#[source] io::Error),

    #[error("Failed while waiting for process to exit: {0}")]
    Wait(#[source] io::Error),

    #[error("Process did not exit within {secs}s and was killed")]
    TimedOut { secs: u64 },

    #[error("Process {0} pipe was not captured")]
    StreamUnavailable(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Result using anyhow::Error, used by command handlers.
pub type Result<T> = anyhow::Result<T>;
