//! Binary-level tests for `loco-sync`.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

/// Test context with a temporary working directory
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Write `.loco-sync.yaml` into the working directory
    fn with_config(self, config: &str) -> Self {
        fs::write(self.config_path(), config).expect("Failed to write config");
        self
    }

    fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join(".loco-sync.yaml")
    }

    /// A command running in the temp dir with no ambient loco-sync settings
    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("loco-sync").expect("binary");
        cmd.current_dir(self.temp_dir.path())
            .env_remove("LOCO_RO_API_KEY")
            .env_remove("LOCO_SYNC_CONFIG")
            .env_remove("LOCO_SYNC_LOG_FILE")
            .env("NO_COLOR", "1");
        cmd
    }
}

#[test]
fn test_help_lists_commands() {
    let ctx = TestContext::new();
    ctx.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("po")
                .and(predicate::str::contains("assets"))
                .and(predicate::str::contains("hugoyaml"))
                .and(predicate::str::contains("ioscat"))
                .and(predicate::str::contains("i18conv"))
                .and(predicate::str::contains("fallback")),
        );
}

#[test]
fn test_no_arguments_prints_help() {
    let ctx = TestContext::new();
    ctx.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_api_key_is_config_error() {
    let ctx = TestContext::new();
    ctx.command()
        .arg("fallback")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("LOCO_RO_API_KEY"));
}

#[test]
fn test_api_key_from_dotenv() {
    let ctx = TestContext::new();
    fs::write(ctx.temp_dir.path().join(".env"), "LOCO_RO_API_KEY=from-dotenv\n").unwrap();

    // a valid key gets past configuration; the missing dir is the next failure
    ctx.command()
        .args(["json", "missing-dir"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("invalid base dir"));
}

#[test]
fn test_invalid_config_is_config_error() {
    let ctx = TestContext::new().with_config("api:\n  timeout_secs: 0\n");
    ctx.command()
        .args(["--api-key", "k", "fallback"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("timeout"));
}

#[test]
fn test_explicit_config_must_exist() {
    let ctx = TestContext::new();
    ctx.command()
        .args(["--api-key", "k", "--config", "nope.yaml", "fallback"])
        .assert()
        .code(2);
}

#[test]
fn test_i18conv_without_format_key_is_validation_error() {
    let ctx = TestContext::new().with_config("api:\n  base_url: http://127.0.0.1:9\n");
    ctx.command()
        .args(["--api-key", "k", "i18conv", "plain.asset"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("couldn't determine format key"));
}

#[test]
fn test_fallback_prints_chains() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/locales")
        .match_header("authorization", "Loco k")
        .with_status(200)
        .with_body(
            r#"[{"code":"en-US","source":true},{"code":"pt-BR","source":false},{"code":"pt-PT","source":false}]"#,
        )
        .create();

    let ctx = TestContext::new().with_config(&format!("api:\n  base_url: {}\n", server.url()));
    ctx.command()
        .args(["-q", "--api-key", "k", "fallback"])
        .assert()
        .success()
        .stdout("pt-BR: pt-PT, en-US\npt-PT: pt-BR, en-US\n");
}

#[test]
fn test_json_export_writes_bundles() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/export/all.json")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"en-US":{"hourglass":{"hi":"Hi"}}}"#)
        .create();

    let ctx = TestContext::new().with_config(&format!("api:\n  base_url: {}\n", server.url()));
    fs::create_dir(ctx.temp_dir.path().join("locales")).unwrap();

    ctx.command()
        .args(["--api-key", "k", "json", "locales"])
        .assert()
        .success();

    let en = fs::read_to_string(ctx.temp_dir.path().join("locales/en.json")).unwrap();
    assert_eq!(en, "{\"hi\":\"Hi\"}\n");
}

#[test]
fn test_server_error_is_network_error() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/locales")
        .with_status(503)
        .create();

    let ctx = TestContext::new().with_config(&format!("api:\n  base_url: {}\n", server.url()));
    ctx.command()
        .args(["--api-key", "k", "fallback"])
        .assert()
        .code(4);
}
