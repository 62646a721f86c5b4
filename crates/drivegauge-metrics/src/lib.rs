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

//! DriveGauge Metrics Module
//!
//! Prometheus gauges for the drive inventory and an HTTP endpoint to scrape
//! them.
//!
//! # Key Metrics
//!
//! - `GDRIVE_number_of_files`, `GDRIVE_number_of_directories`: totals from
//!   the last successful listing
//! - `drivegauge_scans_total{status}`: completed scans by outcome
//! - `drivegauge_scan_duration_seconds`: listing wall time
//! - `drivegauge_scan_pages`, `drivegauge_last_success_timestamp_seconds`
//! - `process_*` on Linux
//!
//! # Example
//!
//! ```no_run
//! use drivegauge_drive::InventoryCounts;
//! use drivegauge_metrics::{MetricsRegistry, MetricsServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = MetricsRegistry::new()?;
//!
//!     let server = MetricsServer::new(registry.clone(), 2349);
//!     let listener = server.bind().await?;
//!     tokio::spawn(server.serve_with_listener(listener));
//!
//!     registry.set(InventoryCounts { files: 7, directories: 2 });
//!     Ok(())
//! }
//! ```

pub mod registry;
pub mod server;
pub mod types;

pub use registry::{MetricsRegistry, INVENTORY_NAMESPACE};
pub use server::MetricsServer;
pub use types::{MetricsConfig, ScanStatus, DEFAULT_METRICS_PORT};
