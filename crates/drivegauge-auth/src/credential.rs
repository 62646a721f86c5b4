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

//! Access/refresh token pair
//!
//! The on-disk JSON shape is `{access_token, token_type, refresh_token, expiry}`
//! with an RFC 3339 expiry, so token files written by earlier versions of the
//! agent load unchanged.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Tokens are treated as expired this many seconds before their actual expiry.
pub const EXPIRY_DELTA_SECS: i64 = 10;

/// An OAuth access credential
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// Bearer token sent with API calls
    #[serde(default)]
    pub access_token: String,

    /// Usually "Bearer"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token_type: String,

    /// Long-lived token used to mint new access tokens
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub refresh_token: String,

    /// Access token expiry; absent means it never expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl Credential {
    /// Build a credential from raw parts
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expiry: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            refresh_token: refresh_token.into(),
            expiry,
        }
    }

    /// Parse a stored record, rejecting JSON that carries no usable token
    pub fn from_json(json: &str) -> AuthResult<Self> {
        let credential: Credential = serde_json::from_str(json)
            .map_err(|e| AuthError::malformed(format!("invalid JSON: {}", e)))?;
        credential.check_well_formed()?;
        Ok(credential)
    }

    /// A record is usable if it has an access token or can mint one
    pub fn check_well_formed(&self) -> AuthResult<()> {
        if self.access_token.trim().is_empty() && self.refresh_token.trim().is_empty() {
            return Err(AuthError::malformed(
                "record has neither an access token nor a refresh token",
            ));
        }
        Ok(())
    }

    /// Expiry, ignoring the zero timestamp older token files use for "never"
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry.filter(|t| t.year() > 1)
    }

    /// Whether the access token must be refreshed before use at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        if self.access_token.is_empty() {
            return true;
        }
        match self.expires_at() {
            Some(expiry) => expiry - Duration::seconds(EXPIRY_DELTA_SECS) <= now,
            None => false,
        }
    }

    /// Whether the access token must be refreshed before use now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether a refresh exchange is possible
    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        let token_type = if self.token_type.is_empty() {
            "Bearer"
        } else {
            self.token_type.as_str()
        };
        format!("{} {}", token_type, self.access_token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("has_refresh_token", &self.can_refresh())
            .field("expiry", &self.expiry)
            .finish()
    }
}
