//! CLI integration tests
//!
//! Runs the built `nodepack` binary against the fixtures and checks
//! output and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn nodepack(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nodepack"))
        .args(args)
        .env_remove("NODEPACK_LOG_LEVEL")
        .env_remove("NODEPACK_DOCKERFILE_POLICY")
        .env_remove("NODEPACK_MAX_DEPTH")
        .env_remove("NODEPACK_MAX_FILE_SIZE")
        .output()
        .expect("Failed to execute nodepack")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_help() {
    let output = nodepack(&["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("scan"));
    assert!(out.contains("plan"));
    assert!(out.contains("add-script"));
}

#[test]
fn test_cli_version() {
    let output = nodepack(&["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_scan_json() {
    let path = fixture("node/typescript-service");
    let output = nodepack(&["-q", "scan", path.to_str().unwrap(), "--format", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["name"], "node");
    assert_eq!(value["project_name"], "typescript-service");
    assert_eq!(value["type_script"]["tslint"]["has_config"], true);
}

#[test]
fn test_scan_not_node_exits_2() {
    let path = fixture("not-node");
    let output = nodepack(&["-q", "scan", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_scan_missing_path_fails() {
    let output = nodepack(&["-q", "scan", "/definitely/not/here"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_plan_yaml() {
    let path = fixture("node/plain-js");
    let output = nodepack(&["-q", "plan", path.to_str().unwrap(), "-f", "yaml"]);

    assert!(output.status.success());
    let value: serde_yaml::Value = serde_yaml::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["recognized"], serde_yaml::Value::Bool(true));
    assert_eq!(value["goal_groups"][0]["name"].as_str(), Some("build"));
}

#[test]
fn test_plan_human() {
    let path = fixture("node/typescript-service");
    let output = nodepack(&["-q", "plan", path.to_str().unwrap()]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Goal Plan: typescript-service"));
    assert!(out.contains("npm build  [npm run build]  after version"));
    assert!(out.contains("Inspections: eslint-inspection, npm-audit, tslint-inspection"));
}

#[test]
fn test_add_script_writes_manifest() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), r#"{"scripts": {"build": "x"}}"#).unwrap();

    let output = nodepack(&[
        "-q",
        "add-script",
        dir.path().to_str().unwrap(),
        "--script",
        "lint",
        "--content",
        "eslint .",
    ]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Title:  Add lint script to package.json"));

    let written = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(written.contains("\"lint\": \"eslint .\""));
}

#[test]
fn test_add_script_dry_run_leaves_manifest() {
    let dir = TempDir::new().unwrap();
    let original = r#"{"scripts": {"build": "x"}}"#;
    fs::write(dir.path().join("package.json"), original).unwrap();

    let output = nodepack(&[
        "-q",
        "add-script",
        dir.path().to_str().unwrap(),
        "--script",
        "test",
        "--dry-run",
    ]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Add empty test script to package.json"));
    assert!(out.contains("<please add your script here>"));
    assert_eq!(
        fs::read_to_string(dir.path().join("package.json")).unwrap(),
        original
    );
}

#[test]
fn test_add_script_without_manifest_fails() {
    let dir = TempDir::new().unwrap();
    let output = nodepack(&[
        "-q",
        "add-script",
        dir.path().to_str().unwrap(),
        "--script",
        "lint",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("package.json"));
}

#[test]
fn test_config_json() {
    let output = Command::new(env!("CARGO_BIN_EXE_nodepack"))
        .args(["-q", "config", "--format", "json"])
        .env_remove("NODEPACK_LOG_LEVEL")
        .env_remove("NODEPACK_MAX_DEPTH")
        .env_remove("NODEPACK_MAX_FILE_SIZE")
        .env("NODEPACK_DOCKERFILE_POLICY", "shortest")
        .output()
        .expect("Failed to execute nodepack");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["dockerfile_policy"], "shortest");
    assert!(value.get("max_file_size").is_none());
}

#[test]
fn test_invalid_config_fails() {
    let path = fixture("node/plain-js");
    let output = Command::new(env!("CARGO_BIN_EXE_nodepack"))
        .args(["-q", "scan", path.to_str().unwrap()])
        .env("NODEPACK_DOCKERFILE_POLICY", "newest")
        .output()
        .expect("Failed to execute nodepack");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("NODEPACK_DOCKERFILE_POLICY"));
}
