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

//! Scripted in-memory page source for testing
//!
//! Serves a fixed list of pages, handing out cursors of the form `page-N`.
//! The script can be swapped between listings and a failure can be injected
//! at any page.
//!
//! # Examples
//!
//! ```rust,no_run
//! use drivegauge_drive::{mock::MockDrive, Entry, RemoteLister};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> drivegauge_drive::DriveResult<()> {
//!     let drive = MockDrive::with_pages(vec![
//!         vec![Entry::folder("d1", "Photos"), Entry::file("f1", "a.jpg")],
//!         vec![Entry::file("f2", "b.jpg")],
//!     ]);
//!
//!     let snapshot = RemoteLister::new(Arc::new(drive)).list_all().await?;
//!     assert_eq!(snapshot.len(), 3);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{DriveError, DriveResult};
use crate::lister::PageSource;
use crate::model::{Entry, Page};

#[derive(Default)]
struct Script {
    pages: Vec<Vec<Entry>>,
    fail_at: Option<usize>,
}

/// In-memory [`PageSource`]
///
/// Clones share the same script and request counter.
#[derive(Clone, Default)]
pub struct MockDrive {
    script: Arc<RwLock<Script>>,
    requests: Arc<AtomicUsize>,
}

impl MockDrive {
    /// An empty drive: one page, no entries
    pub fn new() -> Self {
        Self::default()
    }

    /// A drive served as the given pages
    pub fn with_pages(pages: Vec<Vec<Entry>>) -> Self {
        Self {
            script: Arc::new(RwLock::new(Script {
                pages,
                fail_at: None,
            })),
            requests: Arc::default(),
        }
    }

    /// Split `entries` into pages of `page_size`
    pub fn paged(entries: Vec<Entry>, page_size: usize) -> Self {
        let size = page_size.max(1);
        let mut pages = Vec::new();
        let mut iter = entries.into_iter().peekable();
        while iter.peek().is_some() {
            pages.push(iter.by_ref().take(size).collect());
        }
        Self::with_pages(pages)
    }

    /// Replace the served pages
    pub async fn set_pages(&self, pages: Vec<Vec<Entry>>) {
        self.script.write().await.pages = pages;
    }

    /// Fail the request for the zero-based page `index`; `None` clears it
    pub async fn fail_at(&self, index: Option<usize>) {
        self.script.write().await.fail_at = index;
    }

    /// Number of page requests served, including failed ones
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

fn cursor_for(index: usize) -> String {
    format!("page-{}", index)
}

fn index_of(cursor: Option<&str>) -> DriveResult<usize> {
    match cursor {
        None => Ok(0),
        Some(c) => c
            .strip_prefix("page-")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| DriveError::backend(format!("unknown cursor {:?}", c))),
    }
}

#[async_trait]
impl PageSource for MockDrive {
    async fn fetch_page(&self, cursor: Option<&str>) -> DriveResult<Page> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let index = index_of(cursor)?;
        let script = self.script.read().await;

        if script.fail_at == Some(index) {
            return Err(DriveError::backend(format!("injected failure at page {}", index)));
        }

        if script.pages.is_empty() && index == 0 {
            return Ok(Page::default());
        }

        let entries = script
            .pages
            .get(index)
            .cloned()
            .ok_or_else(|| DriveError::backend(format!("no page {}", index)))?;
        let next_cursor = (index + 1 < script.pages.len()).then(|| cursor_for(index + 1));

        Ok(Page {
            entries,
            next_cursor,
        })
    }
}

impl fmt::Debug for MockDrive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockDrive")
            .field("requests", &self.requests())
            .finish()
    }
}
