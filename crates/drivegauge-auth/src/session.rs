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

//! Authorized session handed to API clients

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::credential::Credential;
use crate::error::{AuthError, AuthResult};
use crate::oauth::TokenEndpoint;

/// Supplies a currently-valid bearer token.
#[async_trait]
pub trait TokenSource: Send + Sync + Debug {
    /// Value for the `Authorization` header
    async fn authorization(&self) -> AuthResult<String>;
}

/// Credential that refreshes itself when the access token lapses
///
/// Refreshed tokens live in memory only; the cache file keeps the record
/// obtained from the consent flow.
#[derive(Debug)]
pub struct AuthorizedSession {
    credential: Mutex<Credential>,
    endpoint: Arc<dyn TokenEndpoint>,
}

impl AuthorizedSession {
    /// Wrap a credential with the endpoint used to refresh it
    pub fn new(credential: Credential, endpoint: Arc<dyn TokenEndpoint>) -> Self {
        Self {
            credential: Mutex::new(credential),
            endpoint,
        }
    }

    /// Snapshot of the current credential
    pub async fn credential(&self) -> Credential {
        self.credential.lock().await.clone()
    }
}

#[async_trait]
impl TokenSource for AuthorizedSession {
    async fn authorization(&self) -> AuthResult<String> {
        // Held across the refresh so concurrent callers wait for one exchange
        let mut credential = self.credential.lock().await;
        if credential.is_expired() {
            if !credential.can_refresh() {
                return Err(AuthError::Expired);
            }
            let refreshed = self.endpoint.refresh(&credential).await?;
            refreshed.check_well_formed()?;
            debug!(expiry = ?refreshed.expiry, "Session token refreshed");
            *credential = refreshed;
        }
        Ok(credential.authorization_header())
    }
}

/// Fixed token, for tests and pre-issued tokens
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn authorization(&self) -> AuthResult<String> {
        Ok(format!("Bearer {}", self.0))
    }
}
