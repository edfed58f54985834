use crate::fixtures::{MockPrometheus, MALFORMED_BODY, UP_BODY};
use axum::http::StatusCode;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::tempdir;
use tokio::process::Command;

/// Runs the compiled probe in `dir` with only `vars` in its environment.
async fn run_probe(dir: &Path, vars: &[(&str, &str)], args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_apiprobe"))
        .current_dir(dir)
        .env_clear()
        .envs(vars.iter().copied())
        .args(args)
        .output()
        .await
        .expect("Failed to run apiprobe")
}

#[tokio::test]
async fn test_binary_prints_up_and_exits_zero() {
    let mock = MockPrometheus::responding(StatusCode::OK, UP_BODY).await;
    let dir = tempdir().expect("Failed to create temp dir");
    let url = mock.query_url();

    let output = run_probe(
        dir.path(),
        &[("PROM_URL", url.as_str()), ("BEARER_TOKEN", "t")],
        &[],
    )
    .await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "kube-apiserver is up"
    );
}

#[tokio::test]
async fn test_binary_exits_one_on_malformed_json() {
    let mock = MockPrometheus::responding(StatusCode::OK, MALFORMED_BODY).await;
    let dir = tempdir().expect("Failed to create temp dir");
    let url = mock.query_url();

    let output = run_probe(
        dir.path(),
        &[("PROM_URL", url.as_str()), ("BEARER_TOKEN", "t")],
        &[],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no status line expected");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error parsing JSON"));
}

#[tokio::test]
async fn test_binary_reports_forbidden() {
    let mock = MockPrometheus::responding(StatusCode::FORBIDDEN, "").await;
    let dir = tempdir().expect("Failed to create temp dir");
    let url = mock.query_url();

    let output = run_probe(
        dir.path(),
        &[("PROM_URL", url.as_str()), ("BEARER_TOKEN", "wrong")],
        &[],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("403 Forbidden"));
}

#[tokio::test]
async fn test_binary_reads_dotenv_from_working_directory() {
    let mock = MockPrometheus::responding(StatusCode::OK, UP_BODY).await;
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(
        dir.path().join(".env"),
        format!("PROM_URL={}\nBEARER_TOKEN=from-dotenv\n", mock.query_url()),
    )
    .expect("Failed to write .env");

    let output = run_probe(dir.path(), &[], &[]).await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        mock.last_request().and_then(|r| r.authorization).as_deref(),
        Some("Bearer from-dotenv")
    );
}

#[tokio::test]
async fn test_binary_without_configuration_fails_at_request_build() {
    let dir = tempdir().expect("Failed to create temp dir");

    let output = run_probe(dir.path(), &[], &[]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error creating request"));
}

#[tokio::test]
async fn test_binary_fails_on_missing_explicit_env_file() {
    let dir = tempdir().expect("Failed to create temp dir");

    let output = run_probe(dir.path(), &[], &["--env-file", "missing.env"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error loading configuration"));
}

#[tokio::test]
async fn test_binary_logs_missing_dotenv_at_configured_debug_level() {
    let dir = tempdir().expect("Failed to create temp dir");

    let output = run_probe(dir.path(), &[("APIPROBE__LOG__LEVEL", "debug")], &[]).await;

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No .env file found, using process environment"),
        "stderr was: {}",
        stderr
    );
}

#[tokio::test]
async fn test_binary_hides_debug_lines_at_default_level() {
    let dir = tempdir().expect("Failed to create temp dir");

    let output = run_probe(dir.path(), &[], &[]).await;

    assert!(!String::from_utf8_lossy(&output.stderr).contains("No .env file found"));
}
