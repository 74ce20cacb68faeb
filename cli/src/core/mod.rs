//! # scriptrun Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces used by the command handlers:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the handler `Result` alias
//! - `runner`: The `ScriptRunner` capability and its process-backed implementation
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{Result, ScriptRunError};
//! use crate::core::runner::{ProcessScriptRunner, ScriptRunner};
//! ```
//!
pub mod config;
pub mod error;
pub mod runner;
