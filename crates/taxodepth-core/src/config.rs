//! `taxodepth` Configuration Module
//!
//! Provides configuration file support via `taxodepth.toml`, environment
//! variables, and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (CLI flags)
//! 2. Environment variables (`TAXODEPTH_*`)
//! 3. Configuration file (`taxodepth.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Defaults applied to depth filters that do not set their own options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Default hierarchy depth (any sign).
    pub default_depth: i32,
    /// Term column the membership condition attaches to.
    pub real_field: String,
    /// Where-group the condition is added to.
    pub group: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_depth: 0,
            real_field: "tid".to_string(),
            group: 1,
        }
    }
}

/// Table and column names used when rendering the relational subquery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Table linking content to terms.
    pub index_table: String,
    /// Content id column of the index table.
    pub index_content_column: String,
    /// Term id column of the index table.
    pub index_term_column: String,
    /// Table holding `(term, parent)` rows.
    pub hierarchy_table: String,
    /// Term id column of the hierarchy table.
    pub hierarchy_term_column: String,
    /// Parent id column of the hierarchy table.
    pub hierarchy_parent_column: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            index_table: "taxonomy_index".to_string(),
            index_content_column: "nid".to_string(),
            index_term_column: "tid".to_string(),
            hierarchy_table: "taxonomy_term_hierarchy".to_string(),
            hierarchy_term_column: "tid".to_string(),
            hierarchy_parent_column: "parent".to_string(),
        }
    }
}

impl SchemaConfig {
    fn identifiers(&self) -> [(&'static str, &str); 6] {
        [
            ("schema.index_table", &self.index_table),
            ("schema.index_content_column", &self.index_content_column),
            ("schema.index_term_column", &self.index_term_column),
            ("schema.hierarchy_table", &self.hierarchy_table),
            ("schema.hierarchy_term_column", &self.hierarchy_term_column),
            ("schema.hierarchy_parent_column", &self.hierarchy_parent_column),
        ]
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
    /// Log format: text or compact.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Main `taxodepth` configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TaxoConfig {
    /// Filter defaults.
    pub filter: FilterConfig,
    /// Relational schema names.
    pub schema: SchemaConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl TaxoConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("taxodepth.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    /// Nested keys use a double underscore in the environment, e.g.
    /// `TAXODEPTH_FILTER__DEFAULT_DEPTH=-1`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("TAXODEPTH_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.group == 0 {
            return Err(ConfigError::InvalidValue {
                key: "filter.group".to_string(),
                message: "value must be >= 1".to_string(),
            });
        }

        if !is_sql_identifier(&self.filter.real_field) {
            return Err(ConfigError::InvalidValue {
                key: "filter.real_field".to_string(),
                message: format!("'{}' is not a valid identifier", self.filter.real_field),
            });
        }

        for (key, ident) in self.schema.identifiers() {
            if !is_sql_identifier(ident) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("'{ident}' is not a valid identifier"),
                });
            }
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        let valid_formats = ["text", "compact"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.format".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        Ok(())
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// ASCII letters, digits and `_`, not starting with a digit.
pub(crate) fn is_sql_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
