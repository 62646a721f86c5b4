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

//! Logging configuration.
//!
//! Output format, level filter and decoration switches for the global
//! subscriber installed by [`crate::initialization`].

use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while configuring logging
#[derive(Error, Debug)]
pub enum LogError {
    /// The requested format name is not one of pretty, compact or json
    #[error("Unknown log format: {0}. Expected one of: pretty, compact, json")]
    UnknownFormat(String),

    /// The level filter could not be parsed or the subscriber failed to install
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Output format for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human-readable output
    Pretty,

    /// Single-line output, the default for a long-running agent
    #[default]
    Compact,

    /// JSON lines for log shippers
    Json,
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LogError::UnknownFormat(s.to_string())),
        }
    }
}

/// Log output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Write to standard error
    Stderr,

    /// Write to standard output
    Stdout,
}

/// Configuration for logging
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format for logs
    pub format: LogFormat,

    /// Level filter directive (e.g. "info", "drivegauge_drive=debug").
    /// If None, `RUST_LOG` is consulted.
    pub level: Option<String>,

    /// Whether to use ANSI colours (ignored for JSON)
    pub use_color: bool,

    /// Whether to include timestamps
    pub use_timestamps: bool,

    /// Whether to include target module names
    pub include_targets: bool,

    /// Output destination (stderr by default)
    pub output: LogOutput,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::default(),
            level: None,
            use_color: true,
            use_timestamps: true,
            include_targets: true,
            output: LogOutput::Stderr,
        }
    }
}

impl LogConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the level filter
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Enable or disable colour output
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Enable or disable timestamps
    pub fn with_timestamps(mut self, use_timestamps: bool) -> Self {
        self.use_timestamps = use_timestamps;
        self
    }

    /// Enable or disable target module names
    pub fn with_targets(mut self, include_targets: bool) -> Self {
        self.include_targets = include_targets;
        self
    }

    /// Set the output destination
    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Effective filter directive: explicit level, then `RUST_LOG`, then "info"
    pub fn effective_level(&self) -> String {
        self.level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(LogError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_default_is_compact_on_stderr() {
        let config = LogConfig::default();
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.output, LogOutput::Stderr);
    }

    #[test]
    fn test_effective_level_from_config() {
        let config = LogConfig::new().with_level("debug");
        assert_eq!(config.effective_level(), "debug");
    }
}
