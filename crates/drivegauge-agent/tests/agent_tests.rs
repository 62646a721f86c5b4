// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 DriveGauge Contributors

//! Refresh loop and startup wiring, end to end over loopback

use axum::{
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration as ChronoDuration, Utc};
use drivegauge_agent::{connect_drive_with_prompt, metrics_config, serve, RefreshScheduler};
use drivegauge_auth::{AuthError, AuthResult, AuthorizationPrompt, Credential};
use drivegauge_config::{AgentConfig, FailurePolicy, RefreshConfig};
use drivegauge_drive::{mock::MockDrive, DriveError, Entry, InventoryCounts, RemoteLister};
use drivegauge_metrics::{MetricsRegistry, MetricsServer, ScanStatus};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

fn refresh(policy: FailurePolicy) -> RefreshConfig {
    RefreshConfig {
        interval_secs: 1,
        on_failure: policy,
    }
}

fn sample_pages() -> Vec<Vec<Entry>> {
    vec![
        vec![
            Entry::folder("d1", "Photos"),
            Entry::file("f1", "a.jpg"),
            Entry::file("f2", "b.jpg"),
        ],
        vec![Entry::folder("d2", "Docs"), Entry::file("f3", "c.txt")],
    ]
}

async fn scrape(base: &str) -> String {
    reqwest::get(format!("{}/metrics", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

/// Poll until `pred` holds for the scraped body or five seconds pass
async fn wait_for(base: &str, pred: impl Fn(&str) -> bool) -> String {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let body = scrape(base).await;
        if pred(&body) || tokio::time::Instant::now() > deadline {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
}

#[tokio::test]
async fn test_failed_cycle_keeps_previous_gauges() {
    let drive = MockDrive::with_pages(sample_pages());
    let registry = MetricsRegistry::new().unwrap();
    let mut scheduler = RefreshScheduler::new(
        RemoteLister::new(Arc::new(drive.clone())),
        registry.clone(),
        &refresh(FailurePolicy::Skip),
    );

    let first = scheduler.run_cycle().await.unwrap();
    assert_eq!(first, InventoryCounts { files: 3, directories: 2 });

    drive.set_pages(vec![vec![Entry::file("x", "x")]; 3]).await;
    drive.fail_at(Some(2)).await;
    assert!(scheduler.run_cycle().await.is_err());

    assert_eq!(registry.inventory(), Some(first));
    assert_eq!(registry.scans(ScanStatus::Success), 1);
    assert_eq!(registry.scans(ScanStatus::Failure), 1);
    assert_eq!(scheduler.cycles(), 2);
}

#[tokio::test]
async fn test_failure_before_first_success_publishes_nothing() {
    let drive = MockDrive::with_pages(sample_pages());
    drive.fail_at(Some(0)).await;
    let registry = MetricsRegistry::new().unwrap();
    let mut scheduler = RefreshScheduler::new(
        RemoteLister::new(Arc::new(drive)),
        registry.clone(),
        &refresh(FailurePolicy::Skip),
    );

    assert!(scheduler.run_cycle().await.is_err());
    assert!(registry.inventory().is_none());
    assert!(!registry.render().unwrap().contains("GDRIVE_"));
}

#[tokio::test]
async fn test_serve_publishes_and_refreshes() {
    let drive = MockDrive::with_pages(sample_pages());
    let registry = MetricsRegistry::new().unwrap();
    let server = MetricsServer::new(registry.clone(), 0);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (stop, stopped) = oneshot::channel::<()>();

    let agent = tokio::spawn({
        let lister = RemoteLister::new(Arc::new(drive.clone()));
        async move {
            serve(
                &refresh(FailurePolicy::Skip),
                lister,
                registry,
                server,
                listener,
                async move {
                    let _ = stopped.await;
                },
            )
            .await
        }
    });

    let body = wait_for(&base, |b| b.contains("GDRIVE_number_of_files 3")).await;
    assert!(body.contains("GDRIVE_number_of_directories 2"), "{body}");

    // Next cycle picks up the new listing
    drive.set_pages(vec![vec![Entry::file("only", "only")]]).await;
    let body = wait_for(&base, |b| b.contains("GDRIVE_number_of_files 1")).await;
    assert!(body.contains("GDRIVE_number_of_directories 0"), "{body}");

    let health = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(health.text().await.unwrap(), "OK");

    stop.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), agent)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_skip_policy_keeps_serving_through_repeated_failures() {
    let drive = MockDrive::with_pages(sample_pages());
    let registry = MetricsRegistry::new().unwrap();
    let server = MetricsServer::new(registry.clone(), 0);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (stop, stopped) = oneshot::channel::<()>();

    let agent = tokio::spawn({
        let lister = RemoteLister::new(Arc::new(drive.clone()));
        let registry = registry.clone();
        async move {
            serve(
                &refresh(FailurePolicy::Skip),
                lister,
                registry,
                server,
                listener,
                async move {
                    let _ = stopped.await;
                },
            )
            .await
        }
    });

    wait_for(&base, |b| b.contains("GDRIVE_number_of_files 3")).await;
    drive.fail_at(Some(0)).await;

    let deadline = tokio::time::Instant::now() + Duration::from_secs(6);
    while registry.scans(ScanStatus::Failure) < 2 {
        assert!(tokio::time::Instant::now() < deadline, "loop stopped cycling");
        assert!(!agent.is_finished(), "agent exited on a skipped failure");
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let body = scrape(&base).await;
    assert!(body.contains("GDRIVE_number_of_files 3"), "{body}");
    assert!(body.contains("GDRIVE_number_of_directories 2"), "{body}");
    assert_eq!(registry.scans(ScanStatus::Success), 1);
    assert!(!agent.is_finished());

    stop.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), agent)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_abort_policy_ends_serving_with_error() {
    let drive = MockDrive::with_pages(sample_pages());
    drive.fail_at(Some(1)).await;
    let registry = MetricsRegistry::new().unwrap();
    let server = MetricsServer::new(registry.clone(), 0);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        serve(
            &refresh(FailurePolicy::Abort),
            RemoteLister::new(Arc::new(drive)),
            registry,
            server,
            listener,
            std::future::pending(),
        ),
    )
    .await
    .unwrap();

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("injected failure"));
}

struct NoPrompt;

#[async_trait::async_trait]
impl AuthorizationPrompt for NoPrompt {
    async fn authorization_code(&self, _auth_url: &str) -> AuthResult<String> {
        Err(AuthError::prompt("no operator in tests"))
    }
}

async fn drive_api(headers: HeaderMap) -> Json<Value> {
    assert_eq!(
        headers.get("authorization").and_then(|v| v.to_str().ok()),
        Some("Bearer cached-access")
    );
    Json(json!({
        "files": [
            {"id": "1", "name": "Music", "mimeType": "application/vnd.google-apps.folder"},
            {"id": "2", "name": "song.mp3", "mimeType": "audio/mpeg", "size": "4096"}
        ]
    }))
}

fn write_credentials(dir: &TempDir, token_uri: &str) -> AgentConfig {
    let secret = json!({
        "installed": {
            "client_id": "client-1",
            "client_secret": "secret-1",
            "auth_uri": "https://accounts.google.com/o/oauth2/auth",
            "token_uri": token_uri,
            "redirect_uris": ["urn:ietf:wg:oauth:2.0:oob"]
        }
    });
    let secret_path = dir.path().join("credentials.json");
    std::fs::write(&secret_path, secret.to_string()).unwrap();

    let mut config = AgentConfig::default();
    config.auth.client_secret_path = secret_path;
    config.auth.token_path = dir.path().join("token.json");
    config
}

#[tokio::test]
async fn test_connect_drive_uses_cached_credential() {
    let app = Router::new().route("/drive/v3/files", get(drive_api));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let dir = TempDir::new().unwrap();
    let mut config = write_credentials(&dir, "http://127.0.0.1:1/token");
    config.drive.api_base_url = format!("http://{}", addr);

    let cached = Credential::new(
        "cached-access",
        "refresh",
        Some(Utc::now() + ChronoDuration::hours(1)),
    );
    std::fs::write(&config.auth.token_path, serde_json::to_string(&cached).unwrap()).unwrap();

    let lister = connect_drive_with_prompt(&config, &NoPrompt).await.unwrap();
    let snapshot = lister.list_all().await.unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(
        drivegauge_drive::classify(snapshot.entries()),
        InventoryCounts { files: 1, directories: 1 }
    );
}

#[tokio::test]
async fn test_stalled_token_refresh_fails_within_request_timeout() {
    async fn stalled_token() -> StatusCode {
        tokio::time::sleep(Duration::from_secs(60)).await;
        StatusCode::OK
    }

    let app = Router::new()
        .route("/token", post(stalled_token))
        .route("/drive/v3/files", get(drive_api));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let dir = TempDir::new().unwrap();
    let mut config = write_credentials(&dir, &format!("http://{}/token", addr));
    config.drive.api_base_url = format!("http://{}", addr);
    config.drive.request_timeout_secs = 1;

    let expired = Credential::new(
        "stale-access",
        "refresh",
        Some(Utc::now() - ChronoDuration::hours(1)),
    );
    std::fs::write(&config.auth.token_path, serde_json::to_string(&expired).unwrap()).unwrap();

    let lister = connect_drive_with_prompt(&config, &NoPrompt).await.unwrap();
    let err = tokio::time::timeout(Duration::from_secs(5), lister.list_all())
        .await
        .expect("listing hung on the token endpoint")
        .unwrap_err();
    assert!(matches!(err, DriveError::Auth(_)), "{err:?}");
}

#[tokio::test]
async fn test_connect_drive_without_client_secret_fails() {
    let dir = TempDir::new().unwrap();
    let mut config = AgentConfig::default();
    config.auth.client_secret_path = dir.path().join("missing.json");
    config.auth.token_path = dir.path().join("token.json");

    let err = connect_drive_with_prompt(&config, &NoPrompt).await.unwrap_err();
    assert!(format!("{err:#}").contains("client secret file not found"));
}

#[tokio::test]
async fn test_connect_drive_fails_when_consent_impossible() {
    let dir = TempDir::new().unwrap();
    let config = write_credentials(&dir, "http://127.0.0.1:1/token");

    let err = connect_drive_with_prompt(&config, &NoPrompt).await.unwrap_err();
    assert!(format!("{err:#}").contains("no operator in tests"));
    assert!(!config.auth.token_path.exists());
}

#[test]
fn test_metrics_config_follows_server_section() {
    let mut config = AgentConfig::default();
    config.server.host = "127.0.0.1".into();
    config.server.port = 9400;
    assert_eq!(metrics_config(&config).socket_addr(), "127.0.0.1:9400");
}
