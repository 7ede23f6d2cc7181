//! Configuration management for milsym.
//!
//! This module provides a configuration system that supports:
//! - Loading from YAML files
//! - Environment variable overrides (`MILSYM__*`)
//! - Validation of all settings
//! - Data file locations, append behaviour, and logging configuration

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;

/// Main application configuration.
///
/// # Examples
///
/// ```no_run
/// use milsym_core::config::AppConfig;
///
/// let config = AppConfig::from_file("milsym.yaml").unwrap();
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Rule table, field mapping and symbol library locations
    #[serde(default)]
    pub data: DataConfig,

    /// Append behaviour
    #[serde(default)]
    pub append: AppendConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::load_failed(path.display().to_string(), e.to_string()))?;

        Self::from_yaml(&contents)
    }

    /// Loads configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            ConfigError::InvalidFormat {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Loads configuration using the `config` crate, layering
    /// `MILSYM__SECTION__KEY` environment variables over the file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or merged.
    pub fn from_config_builder<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let config = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(
                config::Environment::with_prefix("MILSYM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigError::load_failed(path.display().to_string(), e.to_string()))?;

        config.try_deserialize().map_err(|e| {
            ConfigError::InvalidFormat {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a required path or field name is empty, or the
    /// log level is not recognised.
    pub fn validate(&self) -> Result<()> {
        if self.data.rules_file.as_os_str().is_empty() {
            return Err(ConfigError::missing_field("data.rules_file").into());
        }

        if self
            .data
            .symbol_library
            .iter()
            .any(|p| p.as_os_str().is_empty())
        {
            return Err(
                ConfigError::invalid_value("data.symbol_library", "empty library path").into(),
            );
        }

        if self.append.sidc_field.trim().is_empty() {
            return Err(ConfigError::missing_field("append.sidc_field").into());
        }

        self.logging.parse_level()?;

        Ok(())
    }
}

/// Locations of the data files loaded once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Ordered routing rule table (XML or YAML)
    #[serde(default = "default_rules_file")]
    pub rules_file: PathBuf,

    /// Optional input to output field alias map
    #[serde(default = "default_field_mapping_file")]
    pub field_mapping_file: Option<PathBuf>,

    /// Ordered symbol library resources
    #[serde(default)]
    pub symbol_library: Vec<PathBuf>,
}

fn default_rules_file() -> PathBuf {
    PathBuf::from("Data/SIDCToFeatureClassRules.xml")
}

fn default_field_mapping_file() -> Option<PathBuf> {
    Some(PathBuf::from("Data/FieldMapping.xml"))
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            rules_file: default_rules_file(),
            field_mapping_file: default_field_mapping_file(),
            symbol_library: Vec::new(),
        }
    }
}

/// Append behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendConfig {
    /// Input field holding the SIDC
    #[serde(default = "default_sidc_field")]
    pub sidc_field: String,

    /// When derived attributes may overwrite an output field
    #[serde(default)]
    pub backfill: BackfillPolicy,
}

fn default_sidc_field() -> String {
    "Symbol_ID".to_string()
}

impl Default for AppendConfig {
    fn default() -> Self {
        Self {
            sidc_field: default_sidc_field(),
            backfill: BackfillPolicy::default(),
        }
    }
}

/// Policy for writing derived unique designation, echelon and country code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackfillPolicy {
    /// Write only when the target is empty
    #[default]
    EmptyOnly,
    /// Write when the target is empty or still holds the value written for
    /// the previous feature
    EmptyOrLastWritten,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// Whether to include file/line info
    #[serde(default)]
    pub file_line: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Text
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Text,
            file_line: false,
        }
    }
}

impl LoggingConfig {
    /// Parses the log level string to a tracing Level.
    pub fn parse_level(&self) -> Result<Level> {
        self.level.parse().map_err(|_| {
            ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Invalid log level: {}", self.level),
            }
            .into()
        })
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    Text,
    /// JSON format for structured logging
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.append.sidc_field, "Symbol_ID");
        assert_eq!(config.append.backfill, BackfillPolicy::EmptyOnly);
        assert_eq!(
            config.data.rules_file,
            PathBuf::from("Data/SIDCToFeatureClassRules.xml")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
data:
  rules_file: rules.yaml
  field_mapping_file: fields.yaml
  symbol_library:
    - symbols/units.yaml
    - symbols/graphics.yaml

append:
  sidc_field: SIDC
  backfill: empty_or_last_written

logging:
  level: debug
  format: json
"#;

        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.data.rules_file, PathBuf::from("rules.yaml"));
        assert_eq!(config.data.symbol_library.len(), 2);
        assert_eq!(config.append.sidc_field, "SIDC");
        assert_eq!(config.append.backfill, BackfillPolicy::EmptyOrLastWritten);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "append:\n  sidc_field: Code").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.append.sidc_field, "Code");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_validation_empty_sidc_field() {
        let mut config = AppConfig::default();
        config.append.sidc_field = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_library_path() {
        let mut config = AppConfig::default();
        config.data.symbol_library.push(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_parse_level() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            ..Default::default()
        };
        assert!(logging.parse_level().is_ok());

        let invalid = LoggingConfig {
            level: "invalid".to_string(),
            ..Default::default()
        };
        assert!(invalid.parse_level().is_err());
    }
}
