//! # scriptrun Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! Shared, domain-independent utilities. Currently only process execution,
//! used by `core::runner` to launch the script and capture its output.
//!

/// Utilities for executing external processes and capturing their combined output.
pub mod process;
