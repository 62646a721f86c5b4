// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 DriveGauge Contributors

//! Integration tests for configuration loading
//!
//! Environment overrides are process-global, so everything touching
//! `DRIVEGAUGE_*` variables lives in a single test.

use drivegauge_config::{
    AgentConfig, ConfigError, ConfigFormat, ConfigLoader, FailurePolicy, Validator,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drivegauge.toml");
    fs::write(
        &path,
        r#"
[server]
host = "127.0.0.1"
port = 9400

[auth]
client_secret_path = "/etc/drivegauge/credentials.json"
token_path = "/var/lib/drivegauge/token.json"

[drive]
page_size = 200

[refresh]
interval_secs = 300
on_failure = "abort"
"#,
    )
    .unwrap();

    let config = ConfigLoader::new().load_file(&path).await.unwrap();
    assert_eq!(config.server.bind_addr(), "127.0.0.1:9400");
    assert_eq!(
        config.auth.token_path,
        PathBuf::from("/var/lib/drivegauge/token.json")
    );
    assert_eq!(config.drive.page_size, 200);
    assert_eq!(config.refresh.interval_secs, 300);
    assert_eq!(config.refresh.on_failure, FailurePolicy::Abort);
}

#[tokio::test]
async fn test_load_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drivegauge.yaml");
    fs::write(
        &path,
        r#"
observability:
  log_level: debug
  log_format: json
refresh:
  interval_secs: 60
"#,
    )
    .unwrap();

    let config = ConfigLoader::new().load_file(&path).await.unwrap();
    assert_eq!(config.observability.log_format, "json");
    assert_eq!(config.refresh.interval_secs, 60);
    assert_eq!(config.server.port, 2349);
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = ConfigLoader::new()
        .load_file(dir.path().join("absent.toml"))
        .await;
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[tokio::test]
async fn test_malformed_toml_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[server\nport = ").unwrap();

    let result = ConfigLoader::new().load_file(&path).await;
    assert!(matches!(result, Err(ConfigError::TomlParseError(_))));
}

#[test]
fn test_json_round_trip_through_serde() {
    let config = AgentConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let parsed = ConfigLoader::new()
        .load_from_string(&json, ConfigFormat::Json)
        .unwrap();
    assert_eq!(parsed, config);
    assert!(parsed.validate().is_ok());
}

#[tokio::test]
async fn test_env_overrides() {
    std::env::set_var("DRIVEGAUGE_SERVER_PORT", "9911");
    std::env::set_var("DRIVEGAUGE_REFRESH_INTERVAL_SECS", "30");
    std::env::set_var("DRIVEGAUGE_ON_FAILURE", "abort");
    std::env::set_var("DRIVEGAUGE_TOKEN_PATH", "/tmp/token.json");

    let config = ConfigLoader::new().load(None).await.unwrap();
    assert_eq!(config.server.port, 9911);
    assert_eq!(config.refresh.interval_secs, 30);
    assert_eq!(config.refresh.on_failure, FailurePolicy::Abort);
    assert_eq!(config.auth.token_path, PathBuf::from("/tmp/token.json"));

    std::env::set_var("DRIVEGAUGE_PAGE_SIZE", "lots");
    let result = ConfigLoader::new().load(None).await;
    assert!(matches!(
        result,
        Err(ConfigError::EnvVarParsingError { .. })
    ));

    std::env::set_var("DRIVEGAUGE_PAGE_SIZE", "5000");
    let result = ConfigLoader::new().load(None).await;
    assert!(result.unwrap_err().is_validation());

    for var in [
        "DRIVEGAUGE_SERVER_PORT",
        "DRIVEGAUGE_REFRESH_INTERVAL_SECS",
        "DRIVEGAUGE_ON_FAILURE",
        "DRIVEGAUGE_TOKEN_PATH",
        "DRIVEGAUGE_PAGE_SIZE",
    ] {
        std::env::remove_var(var);
    }
}
