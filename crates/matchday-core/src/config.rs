// Configuration loading and parsing (matchday.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::DEFAULT_MAX_CONSECUTIVE_ROLLOVERS;
use crate::match_day::DEFAULT_TOP_N;
use crate::report::ReportFormat;

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "matchday.toml";

/// Upper bound accepted for `engine.max_consecutive_rollovers`.
pub const MAX_ROLLOVER_LIMIT: u32 = 16;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// The assembled configuration. Every section is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many lines in a row may each open a new match day before the
    /// input is rejected as pathological.
    pub max_consecutive_rollovers: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_consecutive_rollovers: DEFAULT_MAX_CONSECUTIVE_ROLLOVERS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Standings printed per match day.
    pub top_n: usize,
    pub format: ReportFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            top_n: DEFAULT_TOP_N,
            format: ReportFormat::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "matchday=info,warn".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from the TOML file at `path`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = read_file(path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Resolve the configuration for a run.
///
/// An explicit path must exist. Without one, `matchday.toml` in the current
/// directory is used when present, and the built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    let candidate = cwd.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        load_config_from(&candidate)
    } else {
        Ok(Config::default())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let limit = config.engine.max_consecutive_rollovers;
    if !(1..=MAX_ROLLOVER_LIMIT).contains(&limit) {
        return Err(ConfigError::ValidationError {
            field: "engine.max_consecutive_rollovers".into(),
            message: format!("must be between 1 and {MAX_ROLLOVER_LIMIT} inclusive, got {limit}"),
        });
    }

    if config.report.top_n == 0 {
        return Err(ConfigError::ValidationError {
            field: "report.top_n".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.filter".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
