//! Configuration management
//!
//! Loads settings from defaults, a TOML file, `TABSIM_*` environment
//! variables and command-line overrides, in increasing priority.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use tabsim_sampling::ResampleConfig;

/// Default configuration file, read only if present.
pub const DEFAULT_CONFIG_FILE: &str = "tabsim.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidFormat(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr<Err = ConfigError>,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

/// `[table]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TableSection {
    /// Seed for the Park–Miller stream
    pub seed: i64,
}

impl Default for TableSection {
    fn default() -> Self {
        Self { seed: 12345 }
    }
}

/// `[resample]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResampleSection {
    /// Seed for the resampler stream
    pub seed: u64,
    /// Corrective-pass cap; absent means unbounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u64>,
}

impl Default for ResampleSection {
    fn default() -> Self {
        Self {
            seed: 12345,
            max_iterations: None,
        }
    }
}

impl ResampleSection {
    /// Library configuration for this section
    pub fn to_resample_config(&self) -> ResampleConfig {
        match self.max_iterations {
            Some(cap) => ResampleConfig::new().with_max_iterations(cap),
            None => ResampleConfig::new(),
        }
    }
}

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_from_str")]
    pub format: OutputFormat,
    /// Table sampling settings
    pub table: TableSection,
    /// Histogram resampling settings
    pub resample: ResampleSection,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `TABSIM_*` overrides read through `lookup`
    ///
    /// `TABSIM_SEED` sets both seeds.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("TABSIM_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(format) = lookup("TABSIM_FORMAT") {
            self.format = OutputFormat::from_str(&format)?;
        }
        if let Some(seed) = lookup("TABSIM_SEED") {
            let parsed: u32 = seed
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("TABSIM_SEED is not a seed: {}", seed)))?;
            self.table.seed = i64::from(parsed);
            self.resample.seed = u64::from(parsed);
        }
        if let Some(cap) = lookup("TABSIM_MAX_ITERATIONS") {
            let parsed: u64 = cap.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("TABSIM_MAX_ITERATIONS is not a count: {}", cap))
            })?;
            self.resample.max_iterations = Some(parsed);
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
    }
}

/// Global CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Force debug logging
    pub verbose: bool,
    /// Output format override
    pub format: Option<OutputFormat>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
///
/// A missing file is an error only when it was named explicitly.
pub fn build_config(cli: &CliArgs) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            AppConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => AppConfig::default(),
    };

    config.apply_env(|key| std::env::var(key).ok())?;
    config.merge_with_cli(cli);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.table.seed, 12345);
        assert_eq!(config.resample.seed, 12345);
        assert_eq!(config.resample.max_iterations, None);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Table);
        assert!(matches!(
            OutputFormat::from_str("xml"),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_from_toml() {
        let config = AppConfig::from_toml(
            r#"
            log_level = "INFO"
            format = "csv"

            [table]
            seed = 99

            [resample]
            seed = 7
            max_iterations = 5000
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.table.seed, 99);
        assert_eq!(config.resample.seed, 7);
        assert_eq!(config.resample.max_iterations, Some(5000));
        assert_eq!(
            config.resample.to_resample_config(),
            ResampleConfig::new().with_max_iterations(5000)
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml("[resample]\nseed = 3\n").unwrap();
        assert_eq!(config.table.seed, 12345);
        assert_eq!(config.resample.seed, 3);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_invalid_toml_value() {
        assert!(matches!(
            AppConfig::from_toml("format = \"xml\"\n"),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("TABSIM_SEED", "42"),
                ("TABSIM_FORMAT", "json"),
                ("TABSIM_MAX_ITERATIONS", "10"),
            ]))
            .unwrap();

        assert_eq!(config.table.seed, 42);
        assert_eq!(config.resample.seed, 42);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.resample.max_iterations, Some(10));
    }

    #[test]
    fn test_env_rejects_bad_values() {
        let mut config = AppConfig::default();
        assert!(matches!(
            config.apply_env(env(&[("TABSIM_SEED", "-4")])),
            Err(ConfigError::EnvError(_))
        ));
        assert!(matches!(
            config.apply_env(env(&[("TABSIM_LOG_LEVEL", "chatty")])),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("TABSIM_FORMAT", "csv")])).unwrap();
        config.merge_with_cli(&CliArgs {
            config_file: None,
            verbose: true,
            format: Some(OutputFormat::Json),
        });
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/tabsim-config.toml")),
            ..Default::default()
        };
        assert!(matches!(build_config(&cli), Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_serialises_back_to_toml() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("log_level = \"warn\""));
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }
}
