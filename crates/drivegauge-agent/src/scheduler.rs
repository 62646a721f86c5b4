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

//! Background refresh loop
//!
//! Each cycle lists the whole drive, classifies the snapshot and publishes
//! the totals, then sleeps for the configured interval. Cycles never
//! overlap and a failed cycle is not retried before the next interval.

use drivegauge_config::{FailurePolicy, RefreshConfig};
use drivegauge_drive::{classify, DriveError, DriveResult, InventoryCounts, RemoteLister};
use drivegauge_metrics::MetricsRegistry;
use std::time::{Duration, Instant};
use tracing::{error, info, info_span, warn, Instrument};

/// Drives list, classify and publish on a fixed interval
#[derive(Debug)]
pub struct RefreshScheduler {
    lister: RemoteLister,
    registry: MetricsRegistry,
    interval: Duration,
    policy: FailurePolicy,
    cycle: u64,
}

impl RefreshScheduler {
    /// Create a scheduler publishing into `registry`
    pub fn new(lister: RemoteLister, registry: MetricsRegistry, config: &RefreshConfig) -> Self {
        Self {
            lister,
            registry,
            interval: config.interval(),
            policy: config.on_failure,
            cycle: 0,
        }
    }

    /// Cycles started so far
    pub fn cycles(&self) -> u64 {
        self.cycle
    }

    /// Run one list, classify, publish pass
    ///
    /// On failure nothing is published and the previous gauges stay as they
    /// were; only the failure counter moves.
    pub async fn run_cycle(&mut self) -> DriveResult<InventoryCounts> {
        self.cycle += 1;
        let span = info_span!("refresh_cycle", cycle = self.cycle);

        async {
            let started = Instant::now();
            let snapshot = match self.lister.list_all().await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    self.registry.record_scan_failure(started.elapsed());
                    return Err(e);
                }
            };

            if snapshot.is_empty() {
                info!("No files found.");
            }
            let counts = classify(snapshot.entries());
            self.registry.set(counts);

            let elapsed = started.elapsed();
            self.registry.record_scan_success(elapsed, snapshot.pages());
            info!(
                pages = snapshot.pages(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Files: {} Folders: {}",
                counts.files,
                counts.directories
            );
            Ok(counts)
        }
        .instrument(span)
        .await
    }

    /// Loop forever
    ///
    /// Returns only under [`FailurePolicy::Abort`], with the error of the
    /// first failed cycle.
    pub async fn run(mut self) -> DriveResult<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            policy = %self.policy,
            "Refresh loop started"
        );

        loop {
            if let Err(e) = self.run_cycle().await {
                self.handle_failure(e)?;
            }
            tokio::time::sleep(self.interval).await;
        }
    }

    fn handle_failure(&self, e: DriveError) -> DriveResult<()> {
        match self.policy {
            FailurePolicy::Skip => {
                warn!(
                    cycle = self.cycle,
                    kind = e.kind(),
                    error = %e,
                    "Unable to retrieve files, keeping previous values"
                );
                Ok(())
            }
            FailurePolicy::Abort => {
                error!(cycle = self.cycle, kind = e.kind(), error = %e, "Unable to retrieve files");
                Err(e)
            }
        }
    }
}
