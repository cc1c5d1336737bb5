//! CLI output integration tests.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn learnhub() -> Command {
    let mut cmd = cargo_bin_cmd!("learnhub");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    learnhub()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("learnhub"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version() {
    learnhub()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("learnhub"));
}

#[test]
fn test_config_show_uses_defaults_without_a_file() {
    let dir = tempfile::tempdir().unwrap();
    learnhub()
        .current_dir(dir.path())
        .args(["--color", "never", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1:8000"))
        .stdout(predicate::str::contains("learnhub.db"))
        .stdout(predicate::str::contains("templates only"));
}

#[test]
fn test_quiet_suppresses_success_lines() {
    let dir = tempfile::tempdir().unwrap();
    learnhub()
        .current_dir(dir.path())
        .args(["--quiet", "config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_json_errors_go_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    learnhub()
        .current_dir(dir.path())
        .args(["--json", "config", "validate", "-c", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"type\":\"error\""));
}

#[test]
fn test_unknown_subcommand_fails() {
    learnhub()
        .arg("graduate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
