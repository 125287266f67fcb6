//! Integration tests driving the pydoctor binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A pydoctor command isolated from the host: home, data dir, and pyenv
/// root all point into a fresh temp directory.
fn isolated_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("pydoctor"));
    cmd.env("HOME", temp.path());
    cmd.env("PYDOCTOR_DATA_DIR", temp.path().join("data"));
    cmd.env("PYENV_ROOT", temp.path().join("pyenv"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("pydoctor"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Diagnose and repair"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("pydoctor"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_scan_json_emits_document() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = isolated_cmd(&temp);
    cmd.args(["scan", "--json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"installations\""))
        .stdout(predicate::str::contains("\"total_installations\""))
        .stdout(predicate::str::contains("\"issues\""));
    Ok(())
}

#[test]
fn cli_scan_records_stats() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    isolated_cmd(&temp)
        .args(["scan", "--quiet"])
        .assert()
        .success();

    let mut stats = isolated_cmd(&temp);
    stats.args(["stats", "--json"]);
    stats
        .assert()
        .success()
        .stdout(predicate::str::contains("\"scans_performed\": 1"));
    Ok(())
}

#[test]
fn cli_history_starts_empty() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = isolated_cmd(&temp);
    cmd.arg("history");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No operations recorded yet"));
    Ok(())
}

#[test]
fn cli_history_rollback_unknown_id_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = isolated_cmd(&temp);
    cmd.args(["history", "--rollback", "42"]);
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_fix_dry_run_executes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = isolated_cmd(&temp);
    cmd.args(["fix", "--dry-run"]);
    cmd.assert().success();

    // Dry run must leave no operation history behind.
    let mut history = isolated_cmd(&temp);
    history.arg("history");
    history
        .assert()
        .success()
        .stdout(predicate::str::contains("No operations recorded yet"));
    Ok(())
}

#[test]
fn cli_stats_shows_table() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = isolated_cmd(&temp);
    cmd.arg("stats");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Scans performed"))
        .stdout(predicate::str::contains("never"));
    Ok(())
}
