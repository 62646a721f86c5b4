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

//! Persistent credential cache
//!
//! The cache is a single JSON file, readable and writable by the owner only.
//! A missing, unreadable or malformed file sends the agent through the
//! interactive consent flow and the result overwrites whatever was there.

use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

use crate::client_secret::{ClientSecret, AUTH_STATE};
use crate::credential::Credential;
use crate::error::{AuthError, AuthResult};
use crate::oauth::TokenEndpoint;
use crate::prompt::AuthorizationPrompt;

/// Owner-only file mode for the token cache
#[cfg(unix)]
const TOKEN_FILE_MODE: u32 = 0o600;

/// File-backed credential cache
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store at `path`; nothing is touched until `load` or `save`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached credential
    ///
    /// Returns `Ok(None)` when there is no file, and `MalformedCredential`
    /// when the file exists but is not a usable record.
    pub async fn load(&self) -> AuthResult<Option<Credential>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => Credential::from_json(&json).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::Io(e)),
        }
    }

    /// Write `credential`, replacing any previous record
    pub async fn save(&self, credential: &Credential) -> AuthResult<()> {
        info!("Saving credential file to: {}", self.path.display());

        let json = serde_json::to_vec(credential)
            .map_err(|e| AuthError::malformed(format!("cannot encode credential: {}", e)))?;

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(TOKEN_FILE_MODE);

        let mut file = options.open(&self.path).await?;

        // mode() only applies on creation; an existing file is tightened
        // through the handle before any token bytes reach it
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(TOKEN_FILE_MODE))
                .await?;
        }

        file.write_all(&json).await?;
        file.flush().await?;
        Ok(())
    }

    /// Return a usable credential, running the consent flow if the cache
    /// cannot supply one
    ///
    /// The cached record is returned as-is even when its access token has
    /// expired; the session refreshes it on first use.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub async fn acquire(
        &self,
        secret: &ClientSecret,
        prompt: &dyn AuthorizationPrompt,
        endpoint: &dyn TokenEndpoint,
    ) -> AuthResult<Credential> {
        match self.load().await {
            Ok(Some(credential)) => return Ok(credential),
            Ok(None) => info!("No cached credential, starting authorization"),
            Err(e) => warn!(error = %e, "Cached credential unusable, starting authorization"),
        }

        let auth_url = secret.auth_code_url(AUTH_STATE)?;
        let code = prompt.authorization_code(&auth_url).await?;
        let code = code.trim();
        if code.is_empty() {
            return Err(AuthError::prompt("empty authorization code"));
        }

        let credential = endpoint.exchange_code(code).await?;
        credential.check_well_formed()?;
        self.save(&credential).await?;
        Ok(credential)
    }
}
