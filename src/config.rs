// config.rs

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_MAX_HISTORY_SIZE: usize = 1000;
pub const DEFAULT_PRECISION: u32 = 10;
pub const MAX_PRECISION: u32 = 15;
pub const DEFAULT_MAX_INPUT_VALUE: f64 = 1e15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: cannot parse '{value}' as {expected}")]
    Parse {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("{key}: {reason}")]
    OutOfRange { key: &'static str, reason: String },
}

/// Runtime settings, read from `CALCULATOR_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    pub base_dir: PathBuf,
    pub history_dir: PathBuf,
    pub history_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_file: PathBuf,
    pub max_history_size: usize,
    pub auto_save: bool,
    pub precision: u32,
    pub max_input_value: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self::with_base_dir(".")
    }
}

impl CalculatorConfig {
    pub fn with_base_dir(base: impl Into<PathBuf>) -> Self {
        let base_dir = base.into();
        let history_dir = base_dir.join("history");
        let log_dir = base_dir.join("logs");
        Self {
            history_file: history_dir.join("calculator_history.json"),
            log_file: log_dir.join("calculator.log"),
            base_dir,
            history_dir,
            log_dir,
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            auto_save: true,
            precision: DEFAULT_PRECISION,
            max_input_value: DEFAULT_MAX_INPUT_VALUE,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank keys fall back to defaults;
    /// derived paths follow the directories they live in.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let base_dir = get("CALCULATOR_BASE_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
        let mut cfg = Self::with_base_dir(base_dir);

        if let Some(dir) = get("CALCULATOR_HISTORY_DIR") {
            cfg.history_dir = PathBuf::from(dir);
            cfg.history_file = cfg.history_dir.join("calculator_history.json");
        }
        if let Some(file) = get("CALCULATOR_HISTORY_FILE") {
            cfg.history_file = PathBuf::from(file);
        }
        if let Some(dir) = get("CALCULATOR_LOG_DIR") {
            cfg.log_dir = PathBuf::from(dir);
            cfg.log_file = cfg.log_dir.join("calculator.log");
        }
        if let Some(file) = get("CALCULATOR_LOG_FILE") {
            cfg.log_file = PathBuf::from(file);
        }
        if let Some(v) = get("CALCULATOR_MAX_HISTORY_SIZE") {
            cfg.max_history_size = parse_value("CALCULATOR_MAX_HISTORY_SIZE", &v, "a positive integer")?;
        }
        if let Some(v) = get("CALCULATOR_AUTO_SAVE") {
            cfg.auto_save = parse_bool("CALCULATOR_AUTO_SAVE", &v)?;
        }
        if let Some(v) = get("CALCULATOR_PRECISION") {
            cfg.precision = parse_value("CALCULATOR_PRECISION", &v, "a non-negative integer")?;
        }
        if let Some(v) = get("CALCULATOR_MAX_INPUT_VALUE") {
            cfg.max_input_value = parse_value("CALCULATOR_MAX_INPUT_VALUE", &v, "a number")?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history_size == 0 {
            return Err(ConfigError::OutOfRange {
                key: "CALCULATOR_MAX_HISTORY_SIZE",
                reason: "must be at least 1".into(),
            });
        }
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::OutOfRange {
                key: "CALCULATOR_PRECISION",
                reason: format!("must be at most {}", MAX_PRECISION),
            });
        }
        if !self.max_input_value.is_finite() || self.max_input_value <= 0.0 {
            return Err(ConfigError::OutOfRange {
                key: "CALCULATOR_MAX_INPUT_VALUE",
                reason: "must be a finite number greater than zero".into(),
            });
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str, expected: &'static str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Parse {
        key,
        value: value.to_string(),
        expected,
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Parse {
            key,
            value: value.to_string(),
            expected: "a boolean",
        }),
    }
}
