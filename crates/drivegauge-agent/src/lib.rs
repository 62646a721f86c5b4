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

//! Library exports for the drivegauge agent
//!
//! Split from the binary so integration tests can drive the refresh loop and
//! the listener directly.

pub mod bootstrap;
pub mod scheduler;

pub use bootstrap::{connect_drive, connect_drive_with_prompt, metrics_config, run, serve};
pub use scheduler::RefreshScheduler;
