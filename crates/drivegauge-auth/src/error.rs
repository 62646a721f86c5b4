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

//! Authentication error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur while obtaining or using a credential
#[derive(Error, Debug)]
pub enum AuthError {
    /// The OAuth client secret file does not exist
    #[error("client secret file not found: {}", .0.display())]
    ClientSecretNotFound(PathBuf),

    /// The client secret file exists but cannot be used
    #[error("invalid client secret: {0}")]
    InvalidClientSecret(String),

    /// The cached credential record is unreadable or incomplete
    #[error("malformed credential record: {0}")]
    MalformedCredential(String),

    /// No authorization code could be obtained from the operator
    #[error("authorization prompt failed: {0}")]
    Prompt(String),

    /// The token endpoint rejected a code or refresh exchange
    #[error("token exchange failed: {0}")]
    Exchange(String),

    /// The access token has expired and there is nothing to refresh it with
    #[error("access token expired and no refresh token is available")]
    Expired,

    /// Transport failure talking to the token endpoint
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error reading or writing a local file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AuthError {
    /// Create an InvalidClientSecret error with context
    pub fn invalid_client_secret<S: Into<String>>(msg: S) -> Self {
        AuthError::InvalidClientSecret(msg.into())
    }

    /// Create a MalformedCredential error with context
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        AuthError::MalformedCredential(msg.into())
    }

    /// Create a Prompt error with context
    pub fn prompt<S: Into<String>>(msg: S) -> Self {
        AuthError::Prompt(msg.into())
    }

    /// Create an Exchange error with context
    pub fn exchange<S: Into<String>>(msg: S) -> Self {
        AuthError::Exchange(msg.into())
    }

    /// Check if this is a MalformedCredential error
    pub fn is_malformed(&self) -> bool {
        matches!(self, AuthError::MalformedCredential(_))
    }

    /// Check if the stored file simply does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            AuthError::ClientSecretNotFound(_) => true,
            AuthError::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
