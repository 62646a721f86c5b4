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

//! Metrics registry for the inventory gauges and scan bookkeeping

use chrono::Utc;
use drivegauge_drive::InventoryCounts;
use prometheus::{
    CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};
use std::sync::{Arc, Once};
use std::time::Duration;
use tracing::{debug, warn};

use crate::types::ScanStatus;

/// Namespace of the inventory gauges.
pub const INVENTORY_NAMESPACE: &str = "GDRIVE";

/// Central metrics registry for the agent
///
/// Thread-safe registry that can be cloned and shared across async tasks.
/// Every gauge is an independent atomic, so a render racing [`set`] may
/// see the new file count next to the old directory count; it never sees a
/// partially written value.
///
/// The inventory gauges join the registry on the first [`set`], so until a
/// listing has succeeded they are absent from the exposition rather than
/// reported as zero.
///
/// [`set`]: MetricsRegistry::set
#[derive(Clone)]
pub struct MetricsRegistry {
    inner: Arc<MetricsRegistryInner>,
}

struct MetricsRegistryInner {
    /// Prometheus registry
    registry: Registry,

    // Inventory gauges
    /// Non-folder entries in the last successful listing
    files: Gauge,
    /// Folder entries in the last successful listing
    directories: Gauge,
    /// Guards the one-time registration of the inventory gauges
    inventory_registered: Once,

    // Scan bookkeeping
    /// Completed scans by outcome
    scans_total: CounterVec,
    /// Wall time of each scan
    scan_duration: Histogram,
    /// Pages fetched by the last successful scan
    scan_pages: Gauge,
    /// Unix time of the last successful scan
    last_success: Gauge,
}

impl MetricsRegistry {
    /// Create new metrics registry
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let files = Gauge::with_opts(
            Opts::new("number_of_files", "This is the number of files")
                .namespace(INVENTORY_NAMESPACE),
        )?;
        let directories = Gauge::with_opts(
            Opts::new("number_of_directories", "This is the number of directories")
                .namespace(INVENTORY_NAMESPACE),
        )?;

        let scans_total = CounterVec::new(
            Opts::new("drivegauge_scans_total", "Completed inventory scans by outcome"),
            &["status"],
        )?;
        registry.register(Box::new(scans_total.clone()))?;
        for status in [ScanStatus::Success, ScanStatus::Failure] {
            scans_total.with_label_values(&[status.as_label()]);
        }

        let scan_duration = Histogram::with_opts(
            HistogramOpts::new(
                "drivegauge_scan_duration_seconds",
                "Time spent listing the drive, in seconds",
            )
            .buckets(vec![
                0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0,
            ]),
        )?;
        registry.register(Box::new(scan_duration.clone()))?;

        let scan_pages = Gauge::with_opts(Opts::new(
            "drivegauge_scan_pages",
            "Pages fetched by the last successful scan",
        ))?;
        registry.register(Box::new(scan_pages.clone()))?;

        let last_success = Gauge::with_opts(Opts::new(
            "drivegauge_last_success_timestamp_seconds",
            "Unix time of the last successful scan",
        ))?;
        registry.register(Box::new(last_success.clone()))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            inner: Arc::new(MetricsRegistryInner {
                registry,
                files,
                directories,
                inventory_registered: Once::new(),
                scans_total,
                scan_duration,
                scan_pages,
                last_success,
            }),
        })
    }

    /// Get reference to Prometheus registry for gathering metrics
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    // Inventory gauges

    /// Overwrite both inventory gauges
    pub fn set(&self, counts: InventoryCounts) {
        self.inner.files.set(counts.files as f64);
        self.inner.directories.set(counts.directories as f64);
        self.ensure_inventory_registered();
    }

    /// Last published counts, or `None` if nothing was ever published
    pub fn inventory(&self) -> Option<InventoryCounts> {
        if !self.inner.inventory_registered.is_completed() {
            return None;
        }
        Some(InventoryCounts {
            files: self.inner.files.get() as u64,
            directories: self.inner.directories.get() as u64,
        })
    }

    fn ensure_inventory_registered(&self) {
        let inner = &self.inner;
        inner.inventory_registered.call_once(|| {
            for gauge in [&inner.files, &inner.directories] {
                if let Err(e) = inner.registry.register(Box::new(gauge.clone())) {
                    warn!("Failed to register inventory gauge: {}", e);
                }
            }
            debug!("Inventory gauges registered");
        });
    }

    // Scan bookkeeping

    /// Record a scan that published new counts
    pub fn record_scan_success(&self, duration: Duration, pages: usize) {
        self.inner
            .scans_total
            .with_label_values(&[ScanStatus::Success.as_label()])
            .inc();
        self.inner.scan_duration.observe(duration.as_secs_f64());
        self.inner.scan_pages.set(pages as f64);
        self.inner.last_success.set(Utc::now().timestamp() as f64);
    }

    /// Record a scan that failed before publishing
    pub fn record_scan_failure(&self, duration: Duration) {
        self.inner
            .scans_total
            .with_label_values(&[ScanStatus::Failure.as_label()])
            .inc();
        self.inner.scan_duration.observe(duration.as_secs_f64());
    }

    /// Number of scans recorded with `status`
    pub fn scans(&self, status: ScanStatus) -> u64 {
        self.inner
            .scans_total
            .with_label_values(&[status.as_label()])
            .get() as u64
    }

    // Exposition

    /// Content type of [`render`](MetricsRegistry::render) output
    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }

    /// Encode every registered family in the text exposition format
    pub fn render(&self) -> anyhow::Result<String> {
        let families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry")
            .field("inventory", &self.inventory())
            .finish()
    }
}
