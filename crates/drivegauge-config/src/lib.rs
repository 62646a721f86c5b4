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

//! Configuration for the DriveGauge agent
//!
//! # Features
//!
//! - TOML, YAML and JSON files, detected by extension
//! - Environment variable overrides with the `DRIVEGAUGE_` prefix
//! - Validation with field-level error messages
//! - Zero-config defaults: port 2349, pages of 10, a 600 second refresh
//!   interval, `credentials.json` and `token.json` in the working directory
//!
//! # Example
//!
//! ```no_run
//! use drivegauge_config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new()
//!         .load(Some(std::path::Path::new("drivegauge.toml")))
//!         .await?;
//!     println!("Listening on {}", config.server.bind_addr());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader, ENV_PREFIX};
pub use schema::*;
pub use validation::Validator;
