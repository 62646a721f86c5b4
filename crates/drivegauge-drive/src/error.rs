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

//! Listing error types and utilities

use drivegauge_auth::AuthError;
use thiserror::Error;

/// Result type alias for listing operations
pub type DriveResult<T> = Result<T, DriveError>;

/// Errors that can occur while enumerating the remote hierarchy
#[derive(Error, Debug)]
pub enum DriveError {
    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request did not finish within the configured timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The API rejected the credential (401 or 403)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-success status
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message reported by the API, or the raw body
        message: String,
    },

    /// A page could not be decoded
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// No bearer token could be produced
    #[error("authorization failed: {0}")]
    Auth(#[from] AuthError),

    /// Page source failure not tied to HTTP
    #[error("listing backend error: {0}")]
    Backend(String),
}

impl DriveError {
    /// Create a Timeout error with context
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        DriveError::Timeout(msg.into())
    }

    /// Create an Unauthorized error with context
    pub fn unauthorized<S: Into<String>>(msg: S) -> Self {
        DriveError::Unauthorized(msg.into())
    }

    /// Create an Api error for a status code
    pub fn api<S: Into<String>>(status: u16, message: S) -> Self {
        DriveError::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a MalformedResponse error with context
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        DriveError::MalformedResponse(msg.into())
    }

    /// Create a Backend error with context
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        DriveError::Backend(msg.into())
    }

    /// Check if the credential was rejected, locally or by the API
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, DriveError::Unauthorized(_) | DriveError::Auth(_))
    }

    /// Check if this is a MalformedResponse error
    pub fn is_malformed(&self) -> bool {
        matches!(self, DriveError::MalformedResponse(_))
    }

    /// Short label used for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            DriveError::Transport(_) => "transport",
            DriveError::Timeout(_) => "timeout",
            DriveError::Unauthorized(_) => "unauthorized",
            DriveError::Api { .. } => "api",
            DriveError::MalformedResponse(_) => "malformed",
            DriveError::Auth(_) => "auth",
            DriveError::Backend(_) => "backend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = DriveError::api(500, "backendError");
        assert_eq!(err.to_string(), "API error (HTTP 500): backendError");
        assert_eq!(err.kind(), "api");
    }

    #[test]
    fn test_auth_failures_count_as_unauthorized() {
        assert!(DriveError::unauthorized("invalid_token").is_unauthorized());
        assert!(DriveError::from(AuthError::Expired).is_unauthorized());
        assert!(!DriveError::malformed("eof").is_unauthorized());
    }
}
