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

//! Agent startup
//!
//! Startup order: client identity, credential, Drive client, metrics
//! listener, refresh loop. Anything failing before the listener is bound
//! aborts the process; after that only an aborting refresh loop or a dead
//! listener ends it.

use anyhow::{Context, Result};
use drivegauge_auth::{
    AuthorizationPrompt, AuthorizedSession, ClientSecret, ConsolePrompt, CredentialStore,
    OAuthClient, TokenEndpoint,
};
use drivegauge_config::{AgentConfig, RefreshConfig};
use drivegauge_drive::{DriveClient, DriveClientConfig, RemoteLister};
use drivegauge_metrics::{MetricsConfig, MetricsRegistry, MetricsServer};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::scheduler::RefreshScheduler;

/// Authorize against Drive and build a lister, prompting on the console if
/// no cached credential is usable
pub async fn connect_drive(config: &AgentConfig) -> Result<RemoteLister> {
    connect_drive_with_prompt(config, &ConsolePrompt).await
}

/// [`connect_drive`] with a custom authorization prompt
pub async fn connect_drive_with_prompt(
    config: &AgentConfig,
    prompt: &dyn AuthorizationPrompt,
) -> Result<RemoteLister> {
    let secret = ClientSecret::load(&config.auth.client_secret_path, config.auth.scope.as_str())
        .await
        .context("Unable to read client secret file")?;

    let oauth = OAuthClient::with_timeout(secret.clone(), config.drive.request_timeout())
        .context("Unable to build token endpoint client")?;
    let endpoint: Arc<dyn TokenEndpoint> = Arc::new(oauth);
    let credential = CredentialStore::new(&config.auth.token_path)
        .acquire(&secret, prompt, endpoint.as_ref())
        .await
        .context("Unable to obtain a Drive credential")?;

    let session = AuthorizedSession::new(credential, endpoint);
    let client = DriveClient::new(
        DriveClientConfig {
            api_base_url: config.drive.api_base_url.clone(),
            page_size: config.drive.page_size,
            request_timeout: config.drive.request_timeout(),
        },
        Arc::new(session),
    )
    .context("Unable to retrieve Drive client")?;

    info!(url = client.files_url(), page_size = config.drive.page_size, "Drive client ready");
    Ok(RemoteLister::new(Arc::new(client)))
}

/// Metrics listener settings from the agent configuration
pub fn metrics_config(config: &AgentConfig) -> MetricsConfig {
    MetricsConfig {
        port: config.server.port,
        bind_address: config.server.host.clone(),
    }
}

/// Serve metrics on `listener` and run the refresh loop until `shutdown`
/// resolves or the loop aborts
pub async fn serve<F>(
    refresh: &RefreshConfig,
    lister: RemoteLister,
    registry: MetricsRegistry,
    server: MetricsServer,
    listener: TcpListener,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let scheduler = RefreshScheduler::new(lister, registry, refresh);
    let mut refresh_task = tokio::spawn(scheduler.run());
    let server = server.serve_with_shutdown(listener, shutdown);

    tokio::select! {
        result = server => {
            refresh_task.abort();
            result
        }
        joined = &mut refresh_task => match joined {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(anyhow::Error::new(e).context("Refresh loop aborted")),
            Err(e) => Err(anyhow::Error::new(e).context("Refresh loop panicked")),
        },
    }
}

/// Run the agent with the given configuration until interrupted
pub async fn run(config: AgentConfig) -> Result<()> {
    let lister = connect_drive(&config).await?;

    let registry = MetricsRegistry::new().context("Unable to create metrics registry")?;
    let server = MetricsServer::with_config(registry.clone(), metrics_config(&config));
    let listener = server.bind().await?;

    serve(&config.refresh, lister, registry, server, listener, shutdown_signal()).await?;
    info!("Agent stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupt received, shutting down"),
        Err(e) => {
            warn!("Unable to listen for interrupt: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
