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

//! File/folder totals

use serde::Serialize;

use crate::model::Entry;

/// Totals for one snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InventoryCounts {
    /// Entries that are not folders
    pub files: u64,
    /// Folder entries
    pub directories: u64,
}

impl InventoryCounts {
    /// Sum of both totals
    pub fn total(&self) -> u64 {
        self.files + self.directories
    }
}

/// Partition entries into files and folders.
///
/// Only the folder MIME type counts as a directory; anything else, including
/// unknown types and entries without size or checksum, is a file.
pub fn classify(entries: &[Entry]) -> InventoryCounts {
    entries
        .iter()
        .fold(InventoryCounts::default(), |mut counts, entry| {
            if entry.is_directory() {
                counts.directories += 1;
            } else {
                counts.files += 1;
            }
            counts
        })
}
