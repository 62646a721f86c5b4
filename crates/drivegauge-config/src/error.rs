// DriveGauge - Google Drive inventory exporter
// Copyright (C) 2026 DriveGauge Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating the agent configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("IO error reading configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML syntax or schema error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// YAML syntax or schema error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    /// JSON syntax or schema error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonParseError(#[from] serde_json::error::Error),

    /// The file extension is not toml, yaml, yml or json
    #[error("Unsupported configuration format: {0}. Supported formats: toml, yaml, json")]
    UnsupportedFormat(String),

    /// The configuration file does not exist
    #[error("Configuration file not found at path: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The path has no extension to detect a format from
    #[error("Invalid configuration path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// An environment override could not be parsed
    #[error("Environment variable parsing error: {variable_name}={value}. {reason}")]
    EnvVarParsingError {
        /// Name of the offending variable
        variable_name: String,
        /// Raw value found in the environment
        value: String,
        /// What was expected instead
        reason: String,
    },

    /// A field holds a value outside its accepted range
    #[error("Invalid configuration value for field '{field}': {reason}")]
    InvalidValue {
        /// Dotted field path, e.g. `drive.page_size`
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A required field is empty
    #[error("Missing required configuration field: {0}")]
    MissingRequired(String),
}

impl ConfigError {
    /// Build an [`ConfigError::EnvVarParsingError`]
    pub fn env_var_parsing_error(
        variable_name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::EnvVarParsingError {
            variable_name: variable_name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`ConfigError::InvalidValue`]
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from validation rather than IO or parsing
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConfigError::InvalidValue { .. } | ConfigError::MissingRequired(_)
        )
    }
}

/// Result alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
