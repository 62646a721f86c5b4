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

//! Token endpoint client
//!
//! Handles the two grants the agent needs: exchanging a one-time
//! authorization code, and minting a new access token from a refresh token.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::fmt::Debug;
use tracing::{debug, instrument};

use crate::client_secret::ClientSecret;
use crate::credential::Credential;
use crate::error::{AuthError, AuthResult};

/// Exchanges grants for credentials.
#[async_trait]
pub trait TokenEndpoint: Send + Sync + Debug {
    /// Trade an authorization code for a credential
    async fn exchange_code(&self, code: &str) -> AuthResult<Credential>;

    /// Mint a fresh access token; the returned credential replaces the input
    async fn refresh(&self, credential: &Credential) -> AuthResult<Credential>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_credential(self, previous_refresh: &str) -> Credential {
        let refresh_token = self
            .refresh_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| previous_refresh.to_string());
        Credential {
            access_token: self.access_token,
            token_type: if self.token_type.is_empty() {
                "Bearer".to_string()
            } else {
                self.token_type
            },
            refresh_token,
            expiry: self
                .expires_in
                .filter(|secs| *secs > 0)
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// HTTP client for the token endpoint named in the client secret
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: reqwest::Client,
    secret: ClientSecret,
}

impl OAuthClient {
    /// Create a client with a default HTTP stack and no request timeout
    pub fn new(secret: ClientSecret) -> Self {
        Self::with_http_client(secret, reqwest::Client::new())
    }

    /// Create a client whose token requests give up after `timeout`
    pub fn with_timeout(secret: ClientSecret, timeout: std::time::Duration) -> AuthResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(secret, http))
    }

    /// Create a client sharing an existing HTTP stack
    pub fn with_http_client(secret: ClientSecret, http: reqwest::Client) -> Self {
        Self { http, secret }
    }

    /// The client identity used for exchanges
    pub fn secret(&self) -> &ClientSecret {
        &self.secret
    }

    async fn post_form(&self, form: &[(&str, &str)]) -> AuthResult<TokenResponse> {
        let response = self
            .http
            .post(&self.secret.token_uri)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {}", err.error, description),
                    None => err.error,
                },
                Err(_) => format!("HTTP {}: {}", status.as_u16(), body.trim()),
            };
            return Err(AuthError::exchange(message));
        }

        serde_json::from_str(&body)
            .map_err(|e| AuthError::exchange(format!("unexpected token response: {}", e)))
    }
}

#[async_trait]
impl TokenEndpoint for OAuthClient {
    #[instrument(skip(self, code))]
    async fn exchange_code(&self, code: &str) -> AuthResult<Credential> {
        let response = self
            .post_form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.secret.client_id.as_str()),
                ("client_secret", self.secret.client_secret.as_str()),
                ("redirect_uri", self.secret.redirect_uri.as_str()),
            ])
            .await?;

        debug!("Authorization code exchanged");
        Ok(response.into_credential(""))
    }

    #[instrument(skip(self, credential))]
    async fn refresh(&self, credential: &Credential) -> AuthResult<Credential> {
        if !credential.can_refresh() {
            return Err(AuthError::Expired);
        }

        let response = self
            .post_form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", credential.refresh_token.as_str()),
                ("client_id", self.secret.client_id.as_str()),
                ("client_secret", self.secret.client_secret.as_str()),
            ])
            .await?;

        debug!("Access token refreshed");
        Ok(response.into_credential(&credential.refresh_token))
    }
}
