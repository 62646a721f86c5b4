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

//! Global subscriber installation.

use crate::config::{LogConfig, LogError, LogFormat, LogOutput};
use std::io;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Initialize tracing with the specified format and optional level.
///
/// # Example
///
/// ```ignore
/// use drivegauge_observability::{init_tracing, LogFormat};
///
/// init_tracing(LogFormat::Compact, Some("debug")).unwrap();
/// tracing::info!("agent started");
/// ```
pub fn init_tracing(format: LogFormat, level: Option<&str>) -> Result<(), LogError> {
    let mut config = LogConfig::new().with_format(format);
    if let Some(level) = level {
        config = config.with_level(level);
    }
    init_tracing_with_config(config)
}

/// Initialize tracing from a full [`LogConfig`].
///
/// Fails if the level directive does not parse or a global subscriber is
/// already installed.
pub fn init_tracing_with_config(config: LogConfig) -> Result<(), LogError> {
    let env_filter = build_env_filter(&config)?;
    let layer = build_layer(&config, env_filter);

    Registry::default()
        .with(layer)
        .try_init()
        .map_err(|e| LogError::ConfigError(format!("Failed to install subscriber: {}", e)))
}

fn build_layer(config: &LogConfig, filter: EnvFilter) -> BoxedLayer {
    let writer = get_writer(&config.output);
    let base = fmt::layer()
        .with_writer(writer)
        .with_target(config.include_targets);

    match (config.format, config.use_timestamps) {
        (LogFormat::Pretty, true) => base
            .with_ansi(config.use_color)
            .pretty()
            .with_filter(filter)
            .boxed(),
        (LogFormat::Pretty, false) => base
            .with_ansi(config.use_color)
            .pretty()
            .without_time()
            .with_filter(filter)
            .boxed(),
        (LogFormat::Compact, true) => base
            .with_ansi(config.use_color)
            .compact()
            .with_filter(filter)
            .boxed(),
        (LogFormat::Compact, false) => base
            .with_ansi(config.use_color)
            .compact()
            .without_time()
            .with_filter(filter)
            .boxed(),
        (LogFormat::Json, true) => base.with_ansi(false).json().with_filter(filter).boxed(),
        (LogFormat::Json, false) => base
            .with_ansi(false)
            .json()
            .without_time()
            .with_filter(filter)
            .boxed(),
    }
}

/// Get the writer for the specified output
fn get_writer(output: &LogOutput) -> fn() -> Box<dyn io::Write + Send> {
    match output {
        LogOutput::Stderr => || Box::new(io::stderr()),
        LogOutput::Stdout => || Box::new(io::stdout()),
    }
}

/// Build an environment filter for the given configuration
fn build_env_filter(config: &LogConfig) -> Result<EnvFilter, LogError> {
    let level_str = config.effective_level();

    EnvFilter::try_new(&level_str).map_err(|e| {
        LogError::ConfigError(format!("Failed to parse log filter '{}': {}", level_str, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Installing the global subscriber is one-shot per process, so only the
    // filter construction is exercised here.

    #[test]
    fn test_env_filter_parsing() {
        let result = build_env_filter(&LogConfig::new().with_level("debug"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_per_crate_directive() {
        let result = build_env_filter(
            &LogConfig::new().with_level("info,drivegauge_drive=trace"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_directive_is_config_error() {
        let result = build_env_filter(&LogConfig::new().with_level("drivegauge=loud"));
        assert!(matches!(result, Err(LogError::ConfigError(_))));
    }
}
