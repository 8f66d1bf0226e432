//! Jay configuration system
//!
//! Supports user-level and project-level configuration with merge semantics.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high -> low):
//! 1. CLI arguments
//! 2. Environment variables (JAY_LOG)
//! 3. Project-level (jay.toml)
//! 4. User-level (~/.config/jay/config.toml)
//! 5. Default values
//! ```
//!
//! CLI arguments are applied by the binary on top of what [`Config::load`]
//! returns.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::diagnostic::ErrorFormat;
use crate::util::logger::{LogLevel, LOG_ENV};

/// Project-level config file name
pub const PROJECT_CONFIG: &str = "jay.toml";

/// Merged configuration for Jay
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// REPL settings
    #[serde(default)]
    pub repl: ReplConfig,
    /// Diagnostic output settings
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// REPL configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplConfig {
    /// Prompt string
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Prompt shown while an expression is still open
    #[serde(default = "default_continuation_prompt")]
    pub continuation_prompt: String,
    /// History file path
    #[serde(default)]
    pub history_file: Option<PathBuf>,
    /// History size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// Print the generated code of every evaluation
    #[serde(default)]
    pub show_code: bool,
}

fn default_prompt() -> String {
    "jay> ".to_string()
}

fn default_continuation_prompt() -> String {
    "...  ".to_string()
}

fn default_history_size() -> usize {
    1000
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            continuation_prompt: default_continuation_prompt(),
            history_file: None,
            history_size: default_history_size(),
            show_code: false,
        }
    }
}

/// Diagnostic configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    /// Colored terminal output
    #[serde(default = "default_colors")]
    pub colors: bool,
    /// Output format
    #[serde(default)]
    pub format: ErrorFormat,
}

fn default_colors() -> bool {
    true
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            format: ErrorFormat::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogConfig {
    /// Configured level, falling back to WARN on garbage
    pub fn level(&self) -> LogLevel {
        self.level.parse().unwrap_or(LogLevel::Warn)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Config parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    /// Load user, project and environment configuration in priority order
    pub fn load() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mut config = Self::load_from(get_config_path().as_deref(), &cwd.join(PROJECT_CONFIG))?;
        config.apply_env();
        Ok(config)
    }

    /// Merge a user-level and a project-level file; missing files are skipped
    pub fn load_from(
        user: Option<&Path>,
        project: &Path,
    ) -> Result<Self, ConfigError> {
        let mut merged = toml::Table::new();
        for path in user.into_iter().chain(std::iter::once(project)) {
            if let Some(table) = read_table(path)? {
                merge_tables(&mut merged, table);
            }
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(|source| ConfigError::Parse {
                path: project.to_path_buf(),
                source,
            })
    }

    /// Parse a single TOML document
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn apply_env(&mut self) {
        if let Ok(level) = std::env::var(LOG_ENV) {
            if level.parse::<LogLevel>().is_ok() {
                self.log.level = level;
            } else {
                tracing::warn!("ignoring invalid {}={}", LOG_ENV, level);
            }
        }
    }
}

fn read_table(path: &Path) -> Result<Option<toml::Table>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = content
        .parse::<toml::Table>()
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(Some(table))
}

/// Deep-merge `overlay` into `base`; overlay wins on scalar conflicts
fn merge_tables(
    base: &mut toml::Table,
    overlay: toml::Table,
) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("jay"));
    }

    // Fallback to ~/.config/jay
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("jay"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("jay"));
    }

    None
}

/// Get the user config file path (~/.config/jay/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Default REPL history location (~/.config/jay/history)
pub fn default_history_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("history"))
}
