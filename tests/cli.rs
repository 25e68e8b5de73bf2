use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("estat").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("estat"));
}

#[test]
fn get_help_lists_options() {
    let mut cmd = Command::cargo_bin("estat").unwrap();
    cmd.args(["get", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--app-id"))
        .stdout(predicate::str::contains("--stats-id"));
}

#[test]
fn missing_app_id_fails_before_fetching() {
    // empty working dir so no estat.config.json is picked up
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("estat").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["get", "--area", "13101", "--stats-id", "0000020201"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("app id is required"));
}

#[test]
fn no_series_configured_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("estat").unwrap();
    cmd.current_dir(dir.path())
        .args(["get", "--app-id", "X", "--area", "13101"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no statistics configured"));
}

// Live test (opt-in): ESTAT_APP_ID=... cargo test --features online
#[cfg(feature = "online")]
#[test]
fn fetch_online_population() {
    let app_id = std::env::var("ESTAT_APP_ID").expect("ESTAT_APP_ID must be set");
    let mut cmd = Command::cargo_bin("estat").unwrap();
    cmd.args([
        "get",
        "--app-id",
        &app_id,
        "--area",
        "13101",
        "--stats-id",
        "0000020201",
        "--category",
        "A1101",
        "--no-save",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Latest data:"));
}

#[test]
fn flag_values_are_case_sensitive() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("estat").unwrap();
    cmd.current_dir(dir.path())
        .args(["get", "--area", "13101", "--stats-id", "0000020201", "--meta", "y"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'y'"));

    let mut cmd = Command::cargo_bin("estat").unwrap();
    cmd.current_dir(dir.path())
        .args(["get", "--area", "13101", "--stats-id", "0000020201", "--lang", "E"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("app id is required"));
}
