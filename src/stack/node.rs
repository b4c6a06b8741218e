use super::package_json::PackageJsonSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NODE_STACK_NAME: &str = "node";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinterInfo {
    pub has_config: bool,
    pub has_dependency: bool,
}

impl LinterInfo {
    /// A linter is usable when it is both declared and configured
    pub fn is_enabled(&self) -> bool {
        self.has_config && self.has_dependency
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeScriptInfo {
    pub has_dependency: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub tslint: LinterInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaScriptInfo {
    pub eslint: LinterInfo,
}

/// A declared runtime dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl Dependency {
    /// npm packages have no separate group, so the name fills both slots
    pub fn npm(name: &str, version: &str) -> Self {
        Self {
            group: name.to_string(),
            artifact: name.to_string(),
            version: version.to_string(),
        }
    }
}

/// A backing service the project appears to need
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {}

/// Result of the cheap classification pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologyClassification {
    pub name: String,
    pub tags: Vec<String>,
    pub messages: Vec<String>,
}

/// Use of Node in a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStack {
    pub name: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub package_json: PackageJsonSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_script: Option<TypeScriptInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_script: Option<JavaScriptInfo>,
    has_docker_file: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    docker_file: Option<String>,
    pub referenced_environment_variables: Vec<String>,
    pub dependencies: Vec<Dependency>,
    pub services: BTreeMap<String, Service>,
}

impl NodeStack {
    pub fn new(package_json: PackageJsonSummary) -> Self {
        Self {
            name: NODE_STACK_NAME.to_string(),
            tags: vec![NODE_STACK_NAME.to_string()],
            project_name: package_json.name.clone(),
            package_json,
            type_script: None,
            java_script: None,
            has_docker_file: false,
            docker_file: None,
            referenced_environment_variables: Vec::new(),
            dependencies: Vec::new(),
            services: BTreeMap::new(),
        }
    }

    /// Record the Dockerfile location; empty paths count as absent
    pub fn set_docker_file(&mut self, path: Option<String>) {
        self.docker_file = path.filter(|p| !p.is_empty());
        self.has_docker_file = self.docker_file.is_some();
    }

    pub fn with_docker_file(mut self, path: impl Into<String>) -> Self {
        self.set_docker_file(Some(path.into()));
        self
    }

    pub fn has_docker_file(&self) -> bool {
        self.has_docker_file
    }

    pub fn docker_file(&self) -> Option<&str> {
        self.docker_file.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_stack() {
        let summary = PackageJsonSummary {
            name: Some("demo".to_string()),
            ..Default::default()
        };
        let stack = NodeStack::new(summary);

        assert_eq!(stack.name, "node");
        assert_eq!(stack.tags, vec!["node"]);
        assert_eq!(stack.project_name.as_deref(), Some("demo"));
        assert!(!stack.has_docker_file());
    }

    #[test]
    fn test_docker_file_flag_follows_path() {
        let mut stack = NodeStack::new(PackageJsonSummary::default());

        stack.set_docker_file(Some("docker/Dockerfile".to_string()));
        assert!(stack.has_docker_file());
        assert_eq!(stack.docker_file(), Some("docker/Dockerfile"));

        stack.set_docker_file(Some(String::new()));
        assert!(!stack.has_docker_file());
        assert_eq!(stack.docker_file(), None);
    }

    #[test]
    fn test_linter_enabled_needs_both() {
        let only_config = LinterInfo {
            has_config: true,
            has_dependency: false,
        };
        let both = LinterInfo {
            has_config: true,
            has_dependency: true,
        };
        assert!(!only_config.is_enabled());
        assert!(both.is_enabled());
    }

    #[test]
    fn test_serializes_docker_flag() {
        let stack = NodeStack::new(PackageJsonSummary::default()).with_docker_file("Dockerfile");
        let json = serde_json::to_value(&stack).unwrap();

        assert_eq!(json["has_docker_file"], true);
        assert_eq!(json["docker_file"], "Dockerfile");
    }
}
