//! End-to-end tests over real file trees
//!
//! Covers scanning the committed fixtures, planning goals from them and
//! applying the script transform to a temporary copy.

use nodepack::goals::{Push, PushTest};
use nodepack::stack::ManifestError;
use nodepack::transform::TransformError;
use nodepack::{
    node_stack_support, AnalysisOrchestrator, DockerfilePolicy, NodeDeliveryOptions, NodeScanner,
    PackageScriptTransform, Project, RealFileSystem, ScanConfig, ScriptParameters,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn project_at(path: &Path) -> Project {
    Project::new(path, Arc::new(RealFileSystem::new()))
}

#[tokio::test]
async fn test_scan_typescript_service() {
    let project = project_at(&fixture("node/typescript-service"));
    let stack = NodeScanner::new()
        .scan_node(&project)
        .await
        .expect("fixture is a Node project");

    assert_eq!(stack.project_name.as_deref(), Some("typescript-service"));
    assert_eq!(stack.package_json.version.as_deref(), Some("1.2.0"));
    assert!(stack.package_json.author.as_ref().unwrap().is_object());

    let ts = stack.type_script.as_ref().unwrap();
    assert!(ts.has_dependency);
    assert_eq!(ts.version.as_deref(), Some("^3.0.0"));
    assert!(ts.tslint.has_config);
    assert!(ts.tslint.has_dependency);

    let js = stack.java_script.as_ref().unwrap();
    assert!(js.eslint.has_config);
    assert!(js.eslint.has_dependency);

    assert!(stack.has_docker_file());
    assert_eq!(stack.docker_file(), Some("Dockerfile"));

    assert_eq!(
        stack.referenced_environment_variables,
        vec!["MONGODB_URI", "NODE_ENV", "PORT"]
    );

    let deps: Vec<&str> = stack.dependencies.iter().map(|d| d.artifact.as_str()).collect();
    assert_eq!(deps, vec!["express", "mongoose", "typescript"]);
    assert!(stack.services.contains_key("mongodb"));
}

#[tokio::test]
async fn test_reject_policy_with_two_dockerfiles() {
    let project = project_at(&fixture("node/typescript-service"));
    let scanner = NodeScanner::with_config(ScanConfig {
        dockerfile_policy: DockerfilePolicy::Reject,
        ..ScanConfig::default()
    });

    let stack = scanner.scan_node(&project).await.unwrap();
    assert!(!stack.has_docker_file());
    assert_eq!(stack.docker_file(), None);
}

#[tokio::test]
async fn test_plan_typescript_service() {
    let project = project_at(&fixture("node/typescript-service"));
    let orchestrator =
        AnalysisOrchestrator::new(node_stack_support(NodeDeliveryOptions::default()), None);

    let interpretation = orchestrator.run(&project).await;

    let build = interpretation.build_goals.as_ref().unwrap();
    let order = build.to_graph().execution_order();
    assert_eq!(order.order, vec!["version", "npm-run-build"]);

    assert!(interpretation.test_goals.is_some());
    assert!(interpretation.release_goals.is_some());
    assert!(interpretation.container_build_goals.is_some());

    let autofixes: Vec<&str> = interpretation
        .autofixes
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(autofixes, vec!["eslint-autofix", "tslint-autofix"]);

    let audits = interpretation
        .inspections
        .iter()
        .filter(|i| i.name == "npm-audit")
        .count();
    assert_eq!(audits, 1);

    // Every message is about a missing script; this fixture has both
    assert!(interpretation.analysis.messages().is_empty());
}

#[tokio::test]
async fn test_plan_test_only_project() {
    let project = project_at(&fixture("node/plain-js"));
    let orchestrator =
        AnalysisOrchestrator::new(node_stack_support(NodeDeliveryOptions::default()), None);

    let interpretation = orchestrator.run(&project).await;

    let build = interpretation.build_goals.as_ref().unwrap();
    let names: Vec<&str> = build.goals().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["version"]);
    assert_eq!(interpretation.test_goals.as_ref().unwrap().len(), 1);
    assert!(interpretation.container_build_goals.is_none());
    assert!(interpretation.autofixes.is_empty());

    let node = interpretation.analysis.node().unwrap();
    assert_eq!(
        node.referenced_environment_variables,
        vec!["GREETING_NAME", "DEFAULT_NAME"]
    );
    assert_eq!(interpretation.analysis.messages().len(), 1);
}

#[tokio::test]
async fn test_plan_non_node_project() {
    let project = project_at(&fixture("not-node"));
    let orchestrator =
        AnalysisOrchestrator::new(node_stack_support(NodeDeliveryOptions::default()), None);

    let interpretation = orchestrator.run(&project).await;

    assert!(interpretation.analysis.node().is_none());
    assert!(interpretation.goal_groups().is_empty());
}

#[test]
fn test_has_typescript_push_test() {
    let ts = project_at(&fixture("node/typescript-service"));
    let js = project_at(&fixture("node/plain-js"));

    assert!(PushTest::HasTypescript.evaluate(&Push::new(&ts, vec![])));
    assert!(!PushTest::HasTypescript.evaluate(&Push::new(&js, vec![])));
}

#[test]
fn test_transform_writes_manifest() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "demo", "scripts": {"build": "x"}}"#,
    )
    .unwrap();

    let project = project_at(dir.path());
    let params = ScriptParameters::new("lint").with_content("eslint .");
    PackageScriptTransform::new()
        .transform(&project, &params)
        .unwrap();

    let written = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert_eq!(
        written,
        "{\n  \"name\": \"demo\",\n  \"scripts\": {\n    \"build\": \"x\",\n    \"lint\": \"eslint .\"\n  }\n}"
    );

    let value: Value = serde_json::from_str(&written).unwrap();
    let keys: Vec<&String> = value["scripts"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["build", "lint"]);
}

#[test]
fn test_transform_without_manifest_fails() {
    let dir = TempDir::new().unwrap();
    let project = project_at(dir.path());

    let result = PackageScriptTransform::new().transform(&project, &ScriptParameters::new("lint"));
    assert!(matches!(
        result,
        Err(TransformError::Manifest(ManifestError::Missing))
    ));
    assert!(!dir.path().join("package.json").exists());
}
