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

//! DriveGauge Observability
//!
//! Structured logging for the agent and its library crates.
//!
//! # Features
//!
//! - **Multiple Output Formats**: Pretty, compact, and JSON
//! - **Environment-based Filtering**: falls back to `RUST_LOG` when no level is configured
//! - **Structured Fields**: every component logs through `tracing` macros
//!
//! # Example
//!
//! ```ignore
//! use drivegauge_observability::{init_tracing_with_config, LogConfig, LogFormat};
//!
//! init_tracing_with_config(LogConfig::new().with_format(LogFormat::Json))?;
//! tracing::info!("agent started");
//! ```

pub mod config;
pub mod initialization;

pub use config::{LogConfig, LogError, LogFormat, LogOutput};
pub use initialization::{init_tracing, init_tracing_with_config};
