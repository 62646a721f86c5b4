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

//! Configuration schema
//!
//! Every section has serde defaults, so an empty file (or no file at all)
//! yields a runnable configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Read-only access to file metadata; the only scope the agent needs.
pub const DRIVE_METADATA_READONLY_SCOPE: &str =
    "https://www.googleapis.com/auth/drive.metadata.readonly";

/// Port the agent has always listened on.
pub const DEFAULT_PORT: u16 = 2349;

/// Root configuration for the agent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentConfig {
    /// Metrics listener
    pub server: ServerConfig,

    /// OAuth client identity and token storage
    pub auth: AuthConfig,

    /// Drive API access
    pub drive: DriveConfig,

    /// Refresh loop
    pub refresh: RefreshConfig,

    /// Logging
    pub observability: ObservabilityConfig,
}

/// Metrics listener settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// OAuth settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// Google OAuth client secret JSON downloaded from the cloud console
    pub client_secret_path: PathBuf,

    /// Where the access/refresh token pair is cached
    pub token_path: PathBuf,

    /// OAuth scope requested during consent
    pub scope: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_secret_path: PathBuf::from("credentials.json"),
            token_path: PathBuf::from("token.json"),
            scope: DRIVE_METADATA_READONLY_SCOPE.to_string(),
        }
    }
}

/// Drive API settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DriveConfig {
    /// API root, overridable for tests and proxies
    pub api_base_url: String,

    /// Entries requested per page (Drive accepts 1..=1000)
    pub page_size: u32,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.googleapis.com".to_string(),
            page_size: 10,
            request_timeout_secs: 60,
        }
    }
}

impl DriveConfig {
    /// Per-request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// What the refresh loop does when a scan fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log, keep the last good gauges, try again next interval
    #[default]
    Skip,

    /// Stop the loop and let the process exit with an error
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(FailurePolicy::Skip),
            "abort" => Ok(FailurePolicy::Abort),
            _ => Err(ConfigError::invalid_value(
                "refresh.on_failure",
                format!("expected 'skip' or 'abort', got '{}'", s),
            )),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Skip => write!(f, "skip"),
            FailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

/// Refresh loop settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RefreshConfig {
    /// Sleep between the end of one scan and the start of the next
    pub interval_secs: u64,

    /// Behaviour on scan failure
    pub on_failure: FailurePolicy,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 600,
            on_failure: FailurePolicy::Skip,
        }
    }
}

impl RefreshConfig {
    /// Sleep interval as a [`Duration`]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Level filter directive, e.g. `info` or `info,drivegauge_drive=debug`
    pub log_level: String,

    /// pretty, compact or json
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "compact".to_string(),
        }
    }
}
