//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SAMPLE: &str = "default:\n  server:\n    port: 3000\n    host: localhost\nprod:\n  server:\n    port: 8080\n";

fn layerconf() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("layerconf"));
    // Keep profile selection under each test's control.
    cmd.env_remove("LAYERCONF_PROFILE");
    cmd
}

fn write_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("app.yaml");
    fs::write(&path, SAMPLE).expect("write config");
    path
}

#[test]
fn test_cli_version() {
    let mut cmd = layerconf();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("layerconf"));
}

#[test]
fn test_cli_help() {
    let mut cmd = layerconf();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("layered YAML"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_get_reads_default_profile() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_config(&tmp);

    let mut cmd = layerconf();
    cmd.args(["get", "server.port", "--config"]).arg(&config);
    cmd.assert().success().stdout(predicate::str::contains("3000"));
}

#[test]
fn test_profile_env_var_selects_profile() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_config(&tmp);

    let mut cmd = layerconf();
    cmd.env("LAYERCONF_PROFILE", "prod");
    cmd.args(["get", "server.port", "--config"]).arg(&config);
    cmd.assert().success().stdout(predicate::str::contains("8080"));
}

#[test]
fn test_profile_flag_beats_env_var() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_config(&tmp);

    let mut cmd = layerconf();
    cmd.env("LAYERCONF_PROFILE", "dev");
    cmd.args(["get", "server.port", "--profile", "prod", "--config"]).arg(&config);
    cmd.assert().success().stdout(predicate::str::contains("8080"));
}

#[test]
fn test_override_flag_wins_over_profile() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_config(&tmp);

    let mut cmd = layerconf();
    cmd.env("LAYERCONF_PROFILE", "prod");
    cmd.args(["get", "server.port", "--config"])
        .arg(&config)
        .args(["--", "--server.port=9090"]);
    cmd.assert().success().stdout(predicate::str::contains("9090"));
}

#[test]
fn test_bare_override_flag_is_true() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_config(&tmp);

    let mut cmd = layerconf();
    cmd.args(["get", "dry-run", "--config"]).arg(&config).args(["--", "--dry-run"]);
    cmd.assert().success().stdout(predicate::str::contains("true"));
}

#[test]
fn test_environment_variable_is_coerced() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_config(&tmp);

    let mut cmd = layerconf();
    cmd.env("RETRY_LIMIT", "12");
    cmd.args(["get", "RETRY_LIMIT", "--config"]).arg(&config);
    cmd.assert().success().stdout(predicate::str::contains("12"));
}

#[test]
fn test_override_flag_beats_environment_variable() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_config(&tmp);

    let mut cmd = layerconf();
    cmd.env("RETRY_LIMIT", "12");
    cmd.args(["get", "RETRY_LIMIT", "--config"])
        .arg(&config)
        .args(["--", "--RETRY_LIMIT=30"]);
    cmd.assert().success().stdout(predicate::str::contains("30"));
}

#[test]
fn test_dotenv_file_participates_in_profile_selection() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_config(&tmp);
    fs::write(tmp.path().join(".env"), "LAYERCONF_PROFILE=prod\n").expect("write dotenv");

    let mut cmd = layerconf();
    cmd.current_dir(tmp.path());
    cmd.args(["get", "server.port", "--config"]).arg(&config);
    cmd.assert().success().stdout(predicate::str::contains("8080"));
}

#[test]
fn test_explicit_dotenv_file_is_loaded() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_config(&tmp);
    let dotenv = tmp.path().join("prod.env");
    fs::write(&dotenv, "LAYERCONF_PROFILE=prod\n").expect("write dotenv");

    let mut cmd = layerconf();
    cmd.args(["get", "server.port", "--config"]).arg(&config).arg("--dotenv").arg(&dotenv);
    cmd.assert().success().stdout(predicate::str::contains("8080"));
}

#[test]
fn test_get_missing_path_fails() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_config(&tmp);

    let mut cmd = layerconf();
    cmd.args(["get", "server.threads", "--config"]).arg(&config);
    cmd.assert().failure().stderr(predicate::str::contains("no value at path"));
}

#[test]
fn test_missing_config_file_fails() {
    let tmp = TempDir::new().expect("tmp");

    let mut cmd = layerconf();
    cmd.args(["get", "server.port", "--config"]).arg(tmp.path().join("absent.yaml"));
    cmd.assert().failure().stderr(predicate::str::contains("failed reading config file"));
}

#[test]
fn test_malformed_config_file_fails() {
    let tmp = TempDir::new().expect("tmp");
    let config = tmp.path().join("bad.yaml");
    fs::write(&config, "default: [unclosed\n").expect("write config");

    let mut cmd = layerconf();
    cmd.args(["get", "server.port", "--config"]).arg(&config);
    cmd.assert().failure().stderr(predicate::str::contains("invalid YAML"));
}

#[test]
fn test_get_empty_path_prints_whole_tree() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_config(&tmp);

    let mut cmd = layerconf();
    cmd.args(["get", "--config"]).arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"server\""))
        .stdout(predicate::str::contains("\"host\""));
}

#[test]
fn test_show_renders_json_and_yaml() {
    let tmp = TempDir::new().expect("tmp");
    let config = write_config(&tmp);

    let mut cmd = layerconf();
    cmd.args(["show", "--config"]).arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"server\""))
        .stdout(predicate::str::contains("3000"));

    let mut cmd = layerconf();
    cmd.args(["show", "--format", "yaml", "--config"]).arg(&config);
    cmd.assert().success().stdout(predicate::str::contains("server:"));
}

#[test]
fn test_completions_generate() {
    let mut cmd = layerconf();
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("layerconf"));
}
