//! # scriptrun Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges, expands and validates the configuration that a
//! script runner is constructed with. Nothing in the runner itself reads the
//! environment; every environment-derived value (home directory, interpreter
//! name) is resolved here once and handed over as an explicit `RunnerConfig`.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags and their `SCRIPTRUN_*` environment variables
//! 2. Project-specific `.scriptrun.toml` in the current directory or ancestors
//! 3. User-specific `~/.config/scriptrun/config.toml`
//! 4. Default values defined in the code
//!
//! An explicit `--config <FILE>` replaces sources 2 and 3.
//!
//! Each source is a `PartialRunnerConfig`; a field set in a higher source wins
//! even when it equals the built-in default.
//!
//! ## Examples
//!
//! ```toml
//! [runner]
//! interpreter = "python3"
//! script_path = "~/tools/callgraph/test.py"
//! working_directory = "~"
//! timeout_secs = 120
//! ```
//!
//! ```rust
//! let cfg = config::load_config(None, &PartialRunnerConfig::default())?;
//! let runner = ProcessScriptRunner::new(cfg.runner);
//! ```
//!
use crate::core::error::{Result, ScriptRunError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Resolved configuration handed to the rest of the application.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub runner: RunnerConfig,
}

/// Everything a `ProcessScriptRunner` needs to build its command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Program used to run the script. Looked up on `PATH` unless it is a path.
    pub interpreter: String,
    /// Script handed to the interpreter as its first argument (can use ~).
    /// Relative paths resolve against `working_directory`.
    pub script_path: String,
    /// Working directory of the child process (can use ~).
    pub working_directory: PathBuf,
    /// Kill the script if it has not exited after this many seconds.
    /// Unset means wait forever.
    pub timeout_secs: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            script_path: default_script_path(),
            working_directory: default_working_directory(),
            timeout_secs: None,
        }
    }
}

/// On-disk shape of a configuration file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub runner: PartialRunnerConfig,
}

/// One layer of runner settings: a config file's `[runner]` table or the
/// command-line flags. Unset fields fall through to the next layer.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PartialRunnerConfig {
    pub interpreter: Option<String>,
    pub script_path: Option<String>,
    pub working_directory: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl PartialRunnerConfig {
    /// Fields set in `self` win; the rest come from `lower`.
    pub fn or(self, lower: PartialRunnerConfig) -> PartialRunnerConfig {
        PartialRunnerConfig {
            interpreter: self.interpreter.or(lower.interpreter),
            script_path: self.script_path.or(lower.script_path),
            working_directory: self.working_directory.or(lower.working_directory),
            timeout_secs: self.timeout_secs.or(lower.timeout_secs),
        }
    }

    /// Fills whatever is still unset with the built-in defaults.
    pub fn resolve(self) -> RunnerConfig {
        RunnerConfig {
            interpreter: self.interpreter.unwrap_or_else(default_interpreter),
            script_path: self.script_path.unwrap_or_else(default_script_path),
            working_directory: self
                .working_directory
                .unwrap_or_else(default_working_directory),
            timeout_secs: self.timeout_secs,
        }
    }
}

fn default_interpreter() -> String {
    "python".to_string()
}
fn default_script_path() -> String {
    "idea-plugin-test/pyscr/test.py".to_string()
}
fn default_working_directory() -> PathBuf {
    PathBuf::from("~")
}

const PROJECT_CONFIG_FILENAME: &str = ".scriptrun.toml";

/// Loads the final configuration.
///
/// With `explicit` set, only that file is read; otherwise the user and
/// project files are discovered and merged. `overrides` (the command-line
/// layer) win over both.
pub fn load_config(explicit: Option<&Path>, overrides: &PartialRunnerConfig) -> Result<Config> {
    let from_files = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    let mut merged_config = Config {
        runner: overrides.clone().or(from_files.runner).resolve(),
    };
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "ScriptRun", "scriptrun") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigFile>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks up from `start` looking for `.scriptrun.toml`, stopping at the first
/// directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: ConfigFile, project: Option<ConfigFile>) -> ConfigFile {
    match project {
        Some(project) => ConfigFile {
            runner: project.runner.or(user.runner),
        },
        None => user,
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    let runner = &mut config.runner;
    runner.script_path = shellexpand::tilde(&runner.script_path).into_owned();
    debug!("Expanded script path: {}", runner.script_path);

    let workdir = runner.working_directory.to_string_lossy().into_owned();
    runner.working_directory = if workdir == "~" {
        dirs::home_dir().ok_or_else(|| {
            anyhow!(ScriptRunError::Config(
                "Could not determine the home directory for the working directory.".to_string()
            ))
        })?
    } else {
        PathBuf::from(shellexpand::tilde(&workdir).into_owned())
    };
    debug!(
        "Expanded working directory: {}",
        runner.working_directory.display()
    );
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    let runner = &config.runner;
    if runner.interpreter.trim().is_empty() {
        return Err(anyhow!(ScriptRunError::Config(
            "Interpreter cannot be empty.".to_string()
        )));
    }
    if runner.script_path.trim().is_empty() {
        return Err(anyhow!(ScriptRunError::Config(
            "Script path cannot be empty.".to_string()
        )));
    }
    let workdir = &runner.working_directory;
    if !workdir.exists() {
        warn!(
            "Configured working directory '{}' does not exist.",
            workdir.display()
        );
    } else if !workdir.is_dir() {
        return Err(anyhow!(ScriptRunError::Config(format!(
            "Configured working directory '{}' exists but is not a directory.",
            workdir.display()
        ))));
    }
    if runner.timeout_secs == Some(0) {
        return Err(anyhow!(ScriptRunError::Config(
            "Timeout must be at least 1 second; omit it to wait indefinitely.".to_string()
        )));
    }
    info!("Configuration validation successful.");
    Ok(())
}
