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

//! Common types for metrics exposition

use serde::{Deserialize, Serialize};

/// Port the exporter has always listened on
pub const DEFAULT_METRICS_PORT: u16 = 2349;

/// Configuration for metrics server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Port for metrics HTTP server
    pub port: u16,

    /// Bind address (default: all interfaces)
    pub bind_address: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_METRICS_PORT,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create new config with port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get bind address with port
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Outcome label for scan counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanStatus {
    /// Listing completed and gauges were published
    Success,
    /// Listing failed; gauges kept their previous values
    Failure,
}

impl ScanStatus {
    /// Get string label for Prometheus
    pub fn as_label(&self) -> &'static str {
        match self {
            ScanStatus::Success => "success",
            ScanStatus::Failure => "failure",
        }
    }
}
