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

//! Remote listing for the DriveGauge agent
//!
//! # Architecture
//!
//! The [`PageSource`] trait fetches a single page given a continuation
//! cursor. [`RemoteLister`] drives any page source to the end and returns a
//! [`Snapshot`], which [`classify`] reduces to [`InventoryCounts`].
//!
//! Implementations:
//! - [`DriveClient`]: Drive v3 `files.list` over HTTPS
//! - [`mock::MockDrive`]: scripted pages for tests
//!
//! # Error Handling
//!
//! Every operation returns [`DriveResult`]. A listing either completes or
//! fails as a whole; there are no partial snapshots.

pub mod client;
pub mod error;
pub mod inventory;
pub mod lister;
pub mod mock;
pub mod model;

pub use client::{DriveClient, DriveClientConfig, FILE_FIELDS};
pub use error::{DriveError, DriveResult};
pub use inventory::{classify, InventoryCounts};
pub use lister::{PageSource, RemoteLister};
pub use model::{Entry, Page, Snapshot, FOLDER_MIME_TYPE};
