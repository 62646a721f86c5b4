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
use crate::error::{ConfigError, ConfigResult};
use crate::schema::AgentConfig;
use crate::validation::Validator;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "DRIVEGAUGE_";

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::InvalidPath(path.to_path_buf())),
        }
    }

    /// Get format name as string
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Configuration loader
pub struct ConfigLoader {
    validate: bool,
}

impl ConfigLoader {
    /// Create a loader that validates what it loads
    pub fn new() -> Self {
        ConfigLoader { validate: true }
    }

    /// Create a loader without validation
    pub fn without_validation() -> Self {
        ConfigLoader { validate: false }
    }

    /// Load configuration from a file
    pub async fn load_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<AgentConfig> {
        let path = path.as_ref();
        debug!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).await?;

        info!(
            "Loaded {} configuration file: {}",
            format.name(),
            path.display()
        );

        self.load_from_string(&content, format)
    }

    /// Load configuration from a string
    pub fn load_from_string(
        &self,
        content: &str,
        format: ConfigFormat,
    ) -> ConfigResult<AgentConfig> {
        let config: AgentConfig = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };

        if self.validate {
            config.validate()?;
        }

        Ok(config)
    }

    /// Full startup path: file if given (or defaults), then environment
    /// overrides, then validation.
    ///
    /// An explicitly named file that does not exist is an error; with no
    /// path the defaults are used.
    pub async fn load(&self, path: Option<&Path>) -> ConfigResult<AgentConfig> {
        let mut config = match path {
            Some(path) => ConfigLoader::without_validation().load_file(path).await?,
            None => {
                info!("No configuration file given, using defaults");
                AgentConfig::default()
            }
        };

        self.apply_env_overrides(&mut config)?;

        if self.validate {
            config.validate()?;
            debug!("Configuration validated successfully");
        }

        Ok(config)
    }

    /// Apply `DRIVEGAUGE_*` environment variable overrides
    pub fn apply_env_overrides(&self, config: &mut AgentConfig) -> ConfigResult<()> {
        if let Some(value) = env("SERVER_HOST") {
            config.server.host = value;
        }
        if let Some(value) = env("SERVER_PORT") {
            config.server.port = parse_env("SERVER_PORT", &value, "expected port number")?;
        }

        if let Some(value) = env("CLIENT_SECRET_PATH") {
            config.auth.client_secret_path = PathBuf::from(value);
        }
        if let Some(value) = env("TOKEN_PATH") {
            config.auth.token_path = PathBuf::from(value);
        }

        if let Some(value) = env("PAGE_SIZE") {
            config.drive.page_size = parse_env("PAGE_SIZE", &value, "expected integer")?;
        }
        if let Some(value) = env("REQUEST_TIMEOUT_SECS") {
            config.drive.request_timeout_secs =
                parse_env("REQUEST_TIMEOUT_SECS", &value, "expected seconds")?;
        }

        if let Some(value) = env("REFRESH_INTERVAL_SECS") {
            config.refresh.interval_secs =
                parse_env("REFRESH_INTERVAL_SECS", &value, "expected seconds")?;
        }
        if let Some(value) = env("ON_FAILURE") {
            config.refresh.on_failure = value.parse().map_err(|_| {
                ConfigError::env_var_parsing_error(
                    format!("{}ON_FAILURE", ENV_PREFIX),
                    &value,
                    "expected 'skip' or 'abort'",
                )
            })?;
        }

        if let Some(value) = env("LOG_LEVEL") {
            config.observability.log_level = value;
        }
        if let Some(value) = env("LOG_FORMAT") {
            config.observability.log_format = value;
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn env(suffix: &str) -> Option<String> {
    std::env::var(format!("{}{}", ENV_PREFIX, suffix)).ok()
}

fn parse_env<T: std::str::FromStr>(suffix: &str, value: &str, reason: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::env_var_parsing_error(format!("{}{}", ENV_PREFIX, suffix), value, reason)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path("agent.toml").unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path("agent.yaml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("agent.yml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("agent.json").unwrap(), ConfigFormat::Json);
    }

    #[test]
    fn test_format_detection_error() {
        assert!(ConfigFormat::from_path("agent.ini").is_err());
        assert!(ConfigFormat::from_path("agent").is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConfigLoader::new()
            .load_from_string("[drive]\npage_size = 100\n", ConfigFormat::Toml)
            .unwrap();
        assert_eq!(config.drive.page_size, 100);
        assert_eq!(config.server.port, 2349);
        assert_eq!(config.refresh.interval_secs, 600);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let result = ConfigLoader::new()
            .load_from_string("[refresh]\ninterval_secs = 0\n", ConfigFormat::Toml);
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_without_validation_accepts_out_of_range() {
        let config = ConfigLoader::without_validation()
            .load_from_string(r#"{"drive": {"page_size": 0}}"#, ConfigFormat::Json)
            .unwrap();
        assert_eq!(config.drive.page_size, 0);
    }

    #[test]
    fn test_parse_env_reports_variable() {
        let err = parse_env::<u16>("SERVER_PORT", "http", "expected port number").unwrap_err();
        assert!(err.to_string().contains("DRIVEGAUGE_SERVER_PORT"));
    }
}
