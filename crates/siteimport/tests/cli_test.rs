//! Integration tests for the `siteimport` binary.
//!
//! Runs the real binary against a wiremock sites API. The config directory
//! points at a nonexistent path so tests never read a user's configuration.
#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::process::Output;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const ADMIN_KEY: &str = "cli-test-key";

/// Build a [`Command`] for the `siteimport` binary with env isolation.
fn siteimport_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("siteimport");
    cmd.env("HOME", "/tmp/siteimport-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/siteimport-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SITEIMPORT_ADMIN_KEY")
        .env_remove("SITEIMPORT_PROFILE")
        .env_remove("SITEIMPORT_BASE_URL")
        .env_remove("SITEIMPORT_FILE")
        .env_remove("SITEIMPORT_OUTPUT")
        .env_remove("SITEIMPORT_INSECURE")
        .env_remove("SITEIMPORT_TIMEOUT");
    cmd
}

/// Command pre-wired with a base URL and input file.
fn import_cmd(base_url: &str, sites_file: &Path) -> assert_cmd::Command {
    let mut cmd = siteimport_cmd();
    cmd.args(["--base-url", base_url, "--file"]).arg(sites_file);
    cmd
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_sites(dir: &tempfile::TempDir, sites: &Value) -> std::path::PathBuf {
    let path = dir.path().join("sites.json");
    std::fs::write(&path, sites.to_string()).unwrap();
    path
}

/// Responds 200 with the request body echoed back.
struct Echo;

impl Respond for Echo {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/json")
            .set_body_bytes(request.body.clone())
    }
}

/// Stub API: accepts everything except the site named `B` (409 exists).
async fn abc_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sites"))
        .and(body_partial_json(json!({ "name": "B" })))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "error": "exists" })))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/sites"))
        .and(query_param("key", ADMIN_KEY))
        .respond_with(Echo)
        .mount(&server)
        .await;

    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    siteimport_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Usage")
            .and(predicate::str::contains("ADMIN_KEY"))
            .and(predicate::str::contains("--file"))
            .and(predicate::str::contains("--base-url")),
    );
}

#[test]
fn test_version_flag() {
    siteimport_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("siteimport"));
}

#[test]
fn test_invalid_output_format() {
    siteimport_cmd()
        .args(["--output", "yaml", ADMIN_KEY])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

// ── Credential handling ─────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_admin_key_argument_exits_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(Echo)
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let sites = write_sites(&dir, &json!([{ "name": "A" }]));

    let mut cmd = import_cmd(&server.uri(), &sites);
    cmd.arg("");
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr_of(&output).contains("Admin key is required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_prompt_answer_exits_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(Echo)
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let sites = write_sites(&dir, &json!([{ "name": "A" }]));

    let mut cmd = import_cmd(&server.uri(), &sites);
    cmd.write_stdin("\n");
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(3));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Enter admin key"), "stderr:\n{stderr}");
    assert!(stderr.contains("Admin key is required"), "stderr:\n{stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_admin_key_read_from_stdin() {
    let server = abc_server().await;
    let dir = tempfile::tempdir().unwrap();
    let sites = write_sites(&dir, &json!([{ "name": "A" }]));

    let mut cmd = import_cmd(&server.uri(), &sites);
    cmd.write_stdin(format!("{ADMIN_KEY}\n"));
    let output = run(cmd).await;

    assert!(output.status.success(), "stderr:\n{}", stderr_of(&output));
    assert!(stdout_of(&output).contains("Import complete: 1/1 sites added successfully"));
}

// ── Import runs ─────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_mixed_run_progress_and_summary() {
    let server = abc_server().await;
    let dir = tempfile::tempdir().unwrap();
    let sites = write_sites(
        &dir,
        &json!([{ "name": "A" }, { "name": "B" }, { "name": "C" }]),
    );

    let mut cmd = import_cmd(&server.uri(), &sites);
    cmd.arg(ADMIN_KEY);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(0), "stderr:\n{}", stderr_of(&output));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Found 3 sites to import"), "stdout:\n{stdout}");
    assert!(stdout.contains("[1/3] Adding site: A... ✓"), "stdout:\n{stdout}");
    assert!(stdout.contains("[2/3] Adding site: B... ✗ - exists"), "stdout:\n{stdout}");
    assert!(stdout.contains("[3/3] Adding site: C... ✓"), "stdout:\n{stdout}");
    assert!(
        stdout.contains("Import complete: 2/3 sites added successfully"),
        "stdout:\n{stdout}"
    );
    assert!(stdout.contains("Failed sites (1):"), "stdout:\n{stdout}");
    assert_eq!(stdout.matches("  - ").count(), 1, "stdout:\n{stdout}");
    assert!(stdout.contains("  - B: exists"), "stdout:\n{stdout}");

    let a = stdout.find("Adding site: A").unwrap();
    let b = stdout.find("Adding site: B").unwrap();
    let c = stdout.find("Adding site: C").unwrap();
    assert!(a < b && b < c, "progress out of order:\n{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fail_on_error_sets_exit_code() {
    let server = abc_server().await;
    let dir = tempfile::tempdir().unwrap();
    let sites = write_sites(&dir, &json!([{ "name": "A" }, { "name": "B" }]));

    let mut cmd = import_cmd(&server.uri(), &sites);
    cmd.args(["--fail-on-error", ADMIN_KEY]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(6));
    assert!(stdout_of(&output).contains("Import complete: 1/2 sites added successfully"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_array_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(Echo)
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let sites = write_sites(&dir, &json!([]));

    let mut cmd = import_cmd(&server.uri(), &sites);
    cmd.arg(ADMIN_KEY);
    let output = run(cmd).await;

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Import complete: 0/0 sites added successfully"));
    assert!(!stdout.contains("Failed sites"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_json_output_keeps_stdout_parseable() {
    let server = abc_server().await;
    let dir = tempfile::tempdir().unwrap();
    let sites = write_sites(
        &dir,
        &json!([{ "name": "A" }, { "name": "B" }, { "name": "C" }]),
    );

    let mut cmd = import_cmd(&server.uri(), &sites);
    cmd.args(["--output", "json", ADMIN_KEY]);
    let output = run(cmd).await;

    assert!(output.status.success());
    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        summary,
        json!({
            "attempted": 3,
            "succeeded": 2,
            "failures": [{ "name": "B", "message": "exists" }]
        })
    );
    assert!(stderr_of(&output).contains("[2/3] Adding site: B... ✗ - exists"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quiet_suppresses_progress() {
    let server = abc_server().await;
    let dir = tempfile::tempdir().unwrap();
    let sites = write_sites(&dir, &json!([{ "name": "A" }]));

    let mut cmd = import_cmd(&server.uri(), &sites);
    cmd.args(["--quiet", ADMIN_KEY]);
    let output = run(cmd).await;

    let stdout = stdout_of(&output);
    assert!(!stdout.contains("Adding site"), "stdout:\n{stdout}");
    assert!(stdout.contains("Import complete: 1/1 sites added successfully"));
}

#[test]
fn test_connection_refused_is_reported_per_site() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let sites = write_sites(&dir, &json!([{ "name": "Offline" }]));

    import_cmd(&format!("http://127.0.0.1:{port}"), &sites)
        .arg(ADMIN_KEY)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Offline: Connection failed - is the server running?")
                .and(predicate::str::contains("0/1 sites added successfully")),
        );
}

// ── Fatal input errors ──────────────────────────────────────────────

#[test]
fn test_missing_sites_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");

    import_cmd("http://127.0.0.1:9", &missing)
        .arg(ADMIN_KEY)
        .assert()
        .code(4)
        .stdout(predicate::str::contains("Import complete").not())
        .stderr(predicate::str::contains("Cannot read sites file"));
}

#[test]
fn test_sites_file_not_an_array() {
    let dir = tempfile::tempdir().unwrap();
    let sites = write_sites(&dir, &json!({ "name": "A" }));

    import_cmd("http://127.0.0.1:9", &sites)
        .arg(ADMIN_KEY)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid sites file"));
}

#[test]
fn test_invalid_base_url() {
    let dir = tempfile::tempdir().unwrap();
    let sites = write_sites(&dir, &json!([]));

    import_cmd("not-a-url", &sites)
        .arg(ADMIN_KEY)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn test_unknown_profile() {
    siteimport_cmd()
        .args(["--profile", "staging", ADMIN_KEY])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Profile 'staging' not found"));
}
