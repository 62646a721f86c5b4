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

//! Cursor-driven enumeration

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::error::DriveResult;
use crate::model::{Page, Snapshot};

/// Fetches one page of the listing.
///
/// `cursor` is `None` for the first page and the previous page's
/// `next_cursor` afterwards.
#[async_trait]
pub trait PageSource: Send + Sync + Debug {
    /// Fetch the page that starts at `cursor`
    async fn fetch_page(&self, cursor: Option<&str>) -> DriveResult<Page>;
}

/// Enumerates every entry by following cursors to the end
#[derive(Debug, Clone)]
pub struct RemoteLister {
    source: Arc<dyn PageSource>,
}

impl RemoteLister {
    /// Create a lister over `source`
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    /// Fetch every page and return the accumulated entries
    ///
    /// Any page failure fails the whole listing; entries gathered so far
    /// are dropped.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> DriveResult<Snapshot> {
        let mut entries = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = match self.source.fetch_page(cursor.as_deref()).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(page = pages + 1, error = %e, "Page fetch failed, discarding partial listing");
                    return Err(e);
                }
            };
            pages += 1;

            let more = page.has_more();
            debug!(page = pages, entries = page.entries.len(), more, "Fetched page");
            entries.extend(page.entries);

            if !more {
                break;
            }
            cursor = page.next_cursor;
        }

        debug!(pages, entries = entries.len(), "Listing complete");
        Ok(Snapshot::new(entries, pages))
    }
}
