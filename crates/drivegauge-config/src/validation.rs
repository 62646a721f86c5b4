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
use crate::schema::{
    AgentConfig, AuthConfig, DriveConfig, ObservabilityConfig, RefreshConfig, ServerConfig,
};
use url::Url;

const VALID_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
const VALID_FORMATS: [&str; 3] = ["pretty", "compact", "json"];
const MAX_PAGE_SIZE: u32 = 1000;

/// Configuration validation trait
pub trait Validator {
    /// Check the section for out-of-range or missing values
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for AgentConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.drive.validate()?;
        self.refresh.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

impl Validator for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.host.is_empty() {
            return Err(ConfigError::MissingRequired("server.host".to_string()));
        }

        if self.port == 0 {
            return Err(ConfigError::invalid_value(
                "server.port",
                "port must be between 1 and 65535",
            ));
        }

        Ok(())
    }
}

impl Validator for AuthConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.client_secret_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired(
                "auth.client_secret_path".to_string(),
            ));
        }

        if self.token_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("auth.token_path".to_string()));
        }

        if self.scope.trim().is_empty() {
            return Err(ConfigError::MissingRequired("auth.scope".to_string()));
        }

        Ok(())
    }
}

impl Validator for DriveConfig {
    fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            ConfigError::invalid_value(
                "drive.api_base_url",
                format!("'{}' is not a valid URL: {}", self.api_base_url, e),
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
            return Err(ConfigError::invalid_value(
                "drive.api_base_url",
                format!("must be an http(s) URL with a host, got '{}'", self.api_base_url),
            ));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::invalid_value(
                "drive.page_size",
                format!(
                    "must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, self.page_size
                ),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "drive.request_timeout_secs",
                "timeout must be greater than zero",
            ));
        }

        Ok(())
    }
}

impl Validator for RefreshConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.interval_secs == 0 {
            return Err(ConfigError::invalid_value(
                "refresh.interval_secs",
                "interval must be greater than zero",
            ));
        }

        Ok(())
    }
}

impl Validator for ObservabilityConfig {
    fn validate(&self) -> ConfigResult<()> {
        // Each directive is either a bare level or `target=level`.
        for directive in self.log_level.split(',').map(str::trim) {
            let level = directive.rsplit('=').next().unwrap_or(directive);
            if !VALID_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ConfigError::invalid_value(
                    "observability.log_level",
                    format!(
                        "'{}' is not one of: {}",
                        directive,
                        VALID_LEVELS.join(", ")
                    ),
                ));
            }
        }

        if !VALID_FORMATS.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "observability.log_format",
                format!("must be one of: {}", VALID_FORMATS.join(", ")),
            ));
        }

        Ok(())
    }
}
