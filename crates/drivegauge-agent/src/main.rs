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

use anyhow::{Context, Result};
use clap::Parser;
use drivegauge_config::{ConfigLoader, Validator};
use drivegauge_observability::{init_tracing_with_config, LogConfig, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "drivegauge")]
#[command(version, about = "Export Google Drive file and folder counts to Prometheus")]
#[command(author = "DriveGauge Contributors")]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level filter, overrides the configuration file
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::new()
        .load(cli.config.as_deref())
        .await
        .context("Invalid configuration")?;
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
        config.validate().context("Invalid --log-level")?;
    }

    let format: LogFormat = config.observability.log_format.parse()?;
    init_tracing_with_config(
        LogConfig::new()
            .with_format(format)
            .with_level(config.observability.log_level.as_str()),
    )?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.bind_addr(),
        "Starting drivegauge"
    );

    drivegauge_agent::run(config).await
}
