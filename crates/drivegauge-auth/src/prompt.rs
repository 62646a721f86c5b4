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

//! Operator interaction for the first-run consent flow

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::{AuthError, AuthResult};

/// Shows a consent URL and returns the authorization code the operator pastes back.
#[async_trait]
pub trait AuthorizationPrompt: Send + Sync {
    /// Present `auth_url` and wait for a code
    async fn authorization_code(&self, auth_url: &str) -> AuthResult<String>;
}

/// Prompt on stdout, read the code from stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

#[async_trait]
impl AuthorizationPrompt for ConsolePrompt {
    async fn authorization_code(&self, auth_url: &str) -> AuthResult<String> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(
                format!(
                    "Go to the following link in your browser then type the authorization code: \n{}\n",
                    auth_url
                )
                .as_bytes(),
            )
            .await?;
        stdout.flush().await?;

        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .map_err(|e| AuthError::prompt(format!("unable to read authorization code: {}", e)))?;
        if read == 0 {
            return Err(AuthError::prompt("stdin closed before a code was entered"));
        }

        let code = line.trim();
        if code.is_empty() {
            return Err(AuthError::prompt("empty authorization code"));
        }
        Ok(code.to_string())
    }
}
