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

//! HTTP server for Prometheus metrics endpoint
//!
//! Provides an Axum-based HTTP server that exposes `/metrics` in Prometheus
//! text exposition format and a `/health` probe. Handlers only read gauges;
//! no listing work ever runs on a request.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::future::Future;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::{types::MetricsConfig, MetricsRegistry};

/// HTTP server for Prometheus metrics
#[derive(Clone)]
pub struct MetricsServer {
    registry: MetricsRegistry,
    config: MetricsConfig,
}

impl MetricsServer {
    /// Create a new metrics server on all interfaces
    ///
    /// # Arguments
    /// * `registry` - The metrics registry to serve
    /// * `port` - Port to bind the server to
    pub fn new(registry: MetricsRegistry, port: u16) -> Self {
        Self::with_config(registry, MetricsConfig::with_port(port))
    }

    /// Create a new metrics server with custom configuration
    pub fn with_config(registry: MetricsRegistry, config: MetricsConfig) -> Self {
        Self { registry, config }
    }

    /// Get the bind address for the server
    pub fn bind_address(&self) -> String {
        self.config.socket_addr()
    }

    /// Routes served by the exporter
    pub fn router(&self) -> Router {
        Router::new()
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler))
            .with_state(self.registry.clone())
    }

    /// Bind the configured address
    pub async fn bind(&self) -> anyhow::Result<TcpListener> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind metrics server to {}: {}", addr, e))?;
        info!("Metrics server listening on http://{}/metrics", addr);
        Ok(listener)
    }

    /// Serve on an already-bound listener
    pub async fn serve_with_listener(self, listener: TcpListener) -> anyhow::Result<()> {
        self.serve_with_shutdown(listener, std::future::pending())
            .await
    }

    /// Serve on `listener` until `shutdown` resolves
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!("Metrics server error: {}", e))
    }
}

/// Handler for `/metrics` endpoint
async fn metrics_handler(State(registry): State<MetricsRegistry>) -> Response {
    debug!("Serving metrics");

    match registry.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, registry.content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
                .into_response()
        }
    }
}

/// Handler for `/health` endpoint
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
