//! Node technology scanner

use super::env_vars::find_environment_variables;
use super::node::{
    Dependency, JavaScriptInfo, LinterInfo, NodeStack, Service, TechnologyClassification,
    TypeScriptInfo, NODE_STACK_NAME,
};
use super::package_json::{get_dependency_version, get_parsed_package_json, has_dependency};
use super::TechnologyElement;
use crate::project::Project;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const ESLINT_CONFIG_FILES: &[&str] = &[".eslintrc", ".eslintrc.json"];
pub const TSLINT_CONFIG_FILE: &str = "tslint.json";
pub const DOCKERFILE_GLOB: &str = "**/Dockerfile";
pub const MONGODB_PACKAGES: &[&str] = &["mongoose", "mongodb"];

/// How to pick a Dockerfile when the tree contains several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockerfilePolicy {
    /// First match in sorted path order
    #[default]
    First,
    /// Match with the fewest path components
    Shortest,
    /// Record no Dockerfile when more than one matches
    Reject,
}

impl DockerfilePolicy {
    pub fn select(&self, candidates: &[PathBuf]) -> Option<PathBuf> {
        match self {
            DockerfilePolicy::First => candidates.first().cloned(),
            DockerfilePolicy::Shortest => candidates
                .iter()
                .min_by_key(|p| p.components().count())
                .cloned(),
            DockerfilePolicy::Reject if candidates.len() > 1 => {
                warn!(
                    candidates = ?candidates,
                    "Multiple Dockerfiles found, ignoring all of them"
                );
                None
            }
            DockerfilePolicy::Reject => candidates.first().cloned(),
        }
    }
}

impl FromStr for DockerfilePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(DockerfilePolicy::First),
            "shortest" => Ok(DockerfilePolicy::Shortest),
            "reject" => Ok(DockerfilePolicy::Reject),
            other => Err(format!(
                "Invalid Dockerfile policy: {}. Valid options: first, shortest, reject",
                other
            )),
        }
    }
}

impl fmt::Display for DockerfilePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DockerfilePolicy::First => "first",
            DockerfilePolicy::Shortest => "shortest",
            DockerfilePolicy::Reject => "reject",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    pub dockerfile_policy: DockerfilePolicy,
    /// Source files above this many bytes are not scanned for environment
    /// variables; `None` scans every file
    pub max_file_size: Option<usize>,
}

/// A scanner contributes one technology element to a project analysis.
///
/// Both methods fail softly: `None` means "not this technology".
#[async_trait]
pub trait TechnologyScanner: Send + Sync {
    fn name(&self) -> &str;

    /// Cheap first pass; its messages are kept alongside the analysis
    async fn classify(&self, project: &Project) -> Option<TechnologyClassification>;

    async fn scan(&self, project: &Project) -> Option<TechnologyElement>;
}

#[derive(Debug, Default)]
pub struct NodeScanner {
    config: ScanConfig,
}

impl NodeScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    pub async fn scan_node(&self, project: &Project) -> Option<NodeStack> {
        let start = Instant::now();
        let package_json = match get_parsed_package_json(project) {
            Ok(pj) => pj,
            Err(e) => {
                debug!(project = %project.root().display(), reason = %e, "Not a Node project");
                return None;
            }
        };

        let mut stack = NodeStack::new(package_json.summary());

        stack.java_script = Some(JavaScriptInfo {
            eslint: LinterInfo {
                has_config: ESLINT_CONFIG_FILES.iter().any(|f| project.has_file(f)),
                has_dependency: has_dependency(&package_json, &["eslint"]),
            },
        });

        stack.type_script = Some(TypeScriptInfo {
            has_dependency: has_dependency(&package_json, &["typescript"]),
            version: get_dependency_version(&package_json, "typescript"),
            tslint: LinterInfo {
                has_config: project.has_file(TSLINT_CONFIG_FILE),
                has_dependency: has_dependency(&package_json, &["tslint"]),
            },
        });

        if has_dependency(&package_json, MONGODB_PACKAGES) {
            stack.services.insert("mongodb".to_string(), Service::default());
        }

        stack.dependencies = package_json
            .dependencies()
            .iter()
            .map(|(name, version)| Dependency::npm(name, version))
            .collect();

        let docker_file = match project.files_matching(&[DOCKERFILE_GLOB]) {
            Ok(candidates) => self
                .config
                .dockerfile_policy
                .select(&candidates)
                .map(|p| p.to_string_lossy().to_string()),
            Err(e) => {
                debug!(error = %e, "Dockerfile search failed");
                None
            }
        };
        stack.set_docker_file(docker_file);

        stack.referenced_environment_variables =
            find_environment_variables(project, self.config.max_file_size);

        info!(
            project = ?stack.project_name,
            typescript = stack.type_script.as_ref().map_or(false, |t| t.has_dependency),
            docker = stack.has_docker_file(),
            env_vars = stack.referenced_environment_variables.len(),
            dependencies = stack.dependencies.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Node stack detected"
        );

        Some(stack)
    }
}

#[async_trait]
impl TechnologyScanner for NodeScanner {
    fn name(&self) -> &str {
        NODE_STACK_NAME
    }

    async fn classify(&self, project: &Project) -> Option<TechnologyClassification> {
        let package_json = get_parsed_package_json(project).ok()?;
        let summary = package_json.summary();
        package_json.scripts()?;

        let mut messages = Vec::new();
        if !summary.has_script("build") {
            messages.push(
                "Project's `package.json` has no `build` script. Please add a script to enable a build goal"
                    .to_string(),
            );
        }
        if !summary.has_script("test") {
            messages.push(
                "Project's `package.json` has no `test` script. Please add a script to enable a test goal"
                    .to_string(),
            );
        }

        Some(TechnologyClassification {
            name: NODE_STACK_NAME.to_string(),
            tags: vec![NODE_STACK_NAME.to_string()],
            messages,
        })
    }

    async fn scan(&self, project: &Project) -> Option<TechnologyElement> {
        self.scan_node(project).await.map(TechnologyElement::Node)
    }
}
