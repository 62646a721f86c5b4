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

//! Delegated access to a Google account
//!
//! The credential lifecycle has three stages:
//!
//! 1. [`ClientSecret::load`] reads the application identity
//! 2. [`CredentialStore::acquire`] returns the cached credential, or walks the
//!    operator through the consent URL and caches the exchanged result
//! 3. [`AuthorizedSession`] hands out bearer tokens, refreshing them as they
//!    expire
//!
//! # Example
//!
//! ```no_run
//! use drivegauge_auth::{
//!     AuthorizedSession, ClientSecret, ConsolePrompt, CredentialStore, OAuthClient, TokenSource,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> drivegauge_auth::AuthResult<()> {
//! let secret = ClientSecret::load(
//!     "credentials.json",
//!     "https://www.googleapis.com/auth/drive.metadata.readonly",
//! )
//! .await?;
//! let endpoint = Arc::new(OAuthClient::new(secret.clone()));
//! let credential = CredentialStore::new("token.json")
//!     .acquire(&secret, &ConsolePrompt, endpoint.as_ref())
//!     .await?;
//! let session = AuthorizedSession::new(credential, endpoint);
//! let header = session.authorization().await?;
//! # Ok(())
//! # }
//! ```

pub mod client_secret;
pub mod credential;
pub mod error;
pub mod oauth;
pub mod prompt;
pub mod session;
pub mod store;

pub use client_secret::{ClientSecret, AUTH_STATE};
pub use credential::{Credential, EXPIRY_DELTA_SECS};
pub use error::{AuthError, AuthResult};
pub use oauth::{OAuthClient, TokenEndpoint};
pub use prompt::{AuthorizationPrompt, ConsolePrompt};
pub use session::{AuthorizedSession, StaticToken, TokenSource};
pub use store::CredentialStore;
