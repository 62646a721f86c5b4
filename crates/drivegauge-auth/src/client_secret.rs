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

//! OAuth client identity
//!
//! Parses the client secret JSON downloaded from the Google Cloud console.
//! Both "installed" (desktop) and "web" application sections are accepted.

use reqwest::Url;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{AuthError, AuthResult};

/// State value echoed back by the consent page.
pub const AUTH_STATE: &str = "state-token";

#[derive(Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSection>,
    web: Option<ClientSection>,
}

#[derive(Deserialize)]
struct ClientSection {
    client_id: String,
    client_secret: String,
    auth_uri: String,
    token_uri: String,
    #[serde(default)]
    redirect_uris: Vec<String>,
}

/// Delegated-access application identity plus the scope it asks for
#[derive(Clone)]
pub struct ClientSecret {
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Consent page endpoint
    pub auth_uri: String,
    /// Code and refresh exchange endpoint
    pub token_uri: String,
    /// First registered redirect URI
    pub redirect_uri: String,
    /// Requested scope
    pub scope: String,
}

impl ClientSecret {
    /// Parse the console JSON for the given scope
    pub fn from_json(json: &str, scope: impl Into<String>) -> AuthResult<Self> {
        let file: ClientSecretFile = serde_json::from_str(json)
            .map_err(|e| AuthError::invalid_client_secret(e.to_string()))?;

        let section = file.installed.or(file.web).ok_or_else(|| {
            AuthError::invalid_client_secret("expected an \"installed\" or \"web\" section")
        })?;

        let redirect_uri = section.redirect_uris.into_iter().next().ok_or_else(|| {
            AuthError::invalid_client_secret("missing redirect URL in the client secret file")
        })?;

        if section.client_id.is_empty() {
            return Err(AuthError::invalid_client_secret("client_id is empty"));
        }

        Ok(Self {
            client_id: section.client_id,
            client_secret: section.client_secret,
            auth_uri: section.auth_uri,
            token_uri: section.token_uri,
            redirect_uri,
            scope: scope.into(),
        })
    }

    /// Read and parse the client secret file
    pub async fn load(path: impl AsRef<Path>, scope: impl Into<String>) -> AuthResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AuthError::ClientSecretNotFound(path.to_path_buf())
            } else {
                AuthError::Io(e)
            }
        })?;

        let secret = Self::from_json(&json, scope)?;
        debug!(path = %path.display(), client_id = %secret.client_id, "Loaded client secret");
        Ok(secret)
    }

    /// Consent URL requesting offline access, so the exchange yields a
    /// refresh token
    pub fn auth_code_url(&self, state: &str) -> AuthResult<String> {
        let url = Url::parse_with_params(
            &self.auth_uri,
            &[
                ("access_type", "offline"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", self.scope.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| AuthError::invalid_client_secret(format!("bad auth_uri: {}", e)))?;
        Ok(url.into())
    }
}

impl std::fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSecret")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .field("scope", &self.scope)
            .finish()
    }
}
