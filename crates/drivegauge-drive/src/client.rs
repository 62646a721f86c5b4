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

//! Drive v3 files.list client
//!
//! Issues `GET {api_base}/drive/v3/files` with a bearer token from a
//! [`TokenSource`] and decodes `{nextPageToken, files}` responses.
//!
//! # Examples
//!
//! ```rust,no_run
//! use drivegauge_auth::StaticToken;
//! use drivegauge_drive::{DriveClient, DriveClientConfig, RemoteLister};
//! use std::sync::Arc;
//!
//! # async fn example() -> drivegauge_drive::DriveResult<()> {
//! let client = DriveClient::new(
//!     DriveClientConfig::default(),
//!     Arc::new(StaticToken("ya29.token".into())),
//! )?;
//! let snapshot = RemoteLister::new(Arc::new(client)).list_all().await?;
//! println!("{} entries", snapshot.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use drivegauge_auth::TokenSource;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::{DriveError, DriveResult};
use crate::lister::PageSource;
use crate::model::{Entry, Page};

/// Field selection requested for every page.
pub const FILE_FIELDS: &str =
    "nextPageToken, files(id,name,md5Checksum,mimeType,size,createdTime,parents)";

/// Connection settings for [`DriveClient`]
#[derive(Debug, Clone)]
pub struct DriveClientConfig {
    /// Scheme and host of the API, without a trailing path
    pub api_base_url: String,
    /// Entries requested per page
    pub page_size: u32,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for DriveClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.googleapis.com".to_string(),
            page_size: 10,
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    files: Vec<Entry>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// Authenticated files.list client
#[derive(Clone)]
pub struct DriveClient {
    http: reqwest::Client,
    files_url: String,
    page_size: u32,
    tokens: Arc<dyn TokenSource>,
}

impl DriveClient {
    /// Build a client; the timeout applies to each page request
    pub fn new(config: DriveClientConfig, tokens: Arc<dyn TokenSource>) -> DriveResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            files_url: format!("{}/drive/v3/files", config.api_base_url.trim_end_matches('/')),
            page_size: config.page_size,
            tokens,
        })
    }

    /// Endpoint this client lists
    pub fn files_url(&self) -> &str {
        &self.files_url
    }
}

impl fmt::Debug for DriveClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriveClient")
            .field("files_url", &self.files_url)
            .field("page_size", &self.page_size)
            .finish()
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}

fn map_transport(e: reqwest::Error) -> DriveError {
    if e.is_timeout() {
        DriveError::timeout(e.to_string())
    } else {
        DriveError::Transport(e)
    }
}

#[async_trait]
impl PageSource for DriveClient {
    #[instrument(skip(self), fields(url = %self.files_url))]
    async fn fetch_page(&self, cursor: Option<&str>) -> DriveResult<Page> {
        let authorization = self.tokens.authorization().await?;

        let mut request = self
            .http
            .get(&self.files_url)
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, "application/json")
            .query(&[
                ("pageSize", self.page_size.to_string()),
                ("fields", FILE_FIELDS.to_string()),
            ]);
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            request = request.query(&[("pageToken", cursor)]);
        }

        let response = request.send().await.map_err(map_transport)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport)?;

        match status {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(DriveError::unauthorized(error_message(&body)));
            }
            s => return Err(DriveError::api(s.as_u16(), error_message(&body))),
        }

        let list: FileList = serde_json::from_str(&body)
            .map_err(|e| DriveError::malformed(format!("files.list page: {}", e)))?;

        debug!(entries = list.files.len(), "Decoded page");
        Ok(Page {
            entries: list.files,
            next_cursor: list.next_page_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_api_message() {
        let body = r#"{"error": {"code": 403, "message": "Rate Limit Exceeded", "errors": []}}"#;
        assert_eq!(error_message(body), "Rate Limit Exceeded");
        assert_eq!(error_message(" upstream connect error "), "upstream connect error");
    }

    #[test]
    fn test_files_url_trims_trailing_slash() {
        let config = DriveClientConfig {
            api_base_url: "http://127.0.0.1:9000/".into(),
            ..Default::default()
        };
        let client =
            DriveClient::new(config, Arc::new(drivegauge_auth::StaticToken("t".into()))).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(client.files_url(), "http://127.0.0.1:9000/drive/v3/files");
    }
}
