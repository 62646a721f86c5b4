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

//! Listing data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// MIME type Drive uses for folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// One file or folder as returned by the files.list call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Opaque file id
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Content fingerprint; absent for folders and native documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5_checksum: Option<String>,

    /// MIME type discriminator
    #[serde(default)]
    pub mime_type: String,

    /// Size in bytes; Drive encodes it as a decimal string
    #[serde(
        default,
        deserialize_with = "deserialize_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<u64>,

    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,

    /// Parent folder ids
    #[serde(default)]
    pub parents: Vec<String>,
}

impl Entry {
    /// A plain file entry
    pub fn file(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            md5_checksum: None,
            mime_type: "application/octet-stream".to_string(),
            size: None,
            created_time: None,
            parents: Vec::new(),
        }
    }

    /// A folder entry
    pub fn folder(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mime_type: FOLDER_MIME_TYPE.to_string(),
            ..Self::file(id, name)
        }
    }

    /// Whether this entry is a folder
    pub fn is_directory(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }
}

fn deserialize_size<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Text(String),
        Number(u64),
    }

    match Option::<Size>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Size::Number(n)) => Ok(Some(n)),
        Some(Size::Text(s)) => s
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid size {:?}", s))),
    }
}

/// One response page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Entries in response order
    pub entries: Vec<Entry>,
    /// Cursor for the following page; `None` or empty on the last page
    pub next_cursor: Option<String>,
}

impl Page {
    /// Whether another page follows
    pub fn has_more(&self) -> bool {
        self.next_cursor.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Result of one complete enumeration, in page-then-intra-page order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entries: Vec<Entry>,
    pages: usize,
}

impl Snapshot {
    /// Build from accumulated entries and the number of pages fetched
    pub fn new(entries: Vec<Entry>, pages: usize) -> Self {
        Self { entries, pages }
    }

    /// All entries
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of pages fetched to build this snapshot
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the drive was empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
