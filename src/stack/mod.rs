//! Node technology detection.
//!
//! The [`NodeScanner`] reads `package.json` and a handful of marker files from a
//! [`Project`](crate::project::Project) and summarizes them as a [`NodeStack`].
//! Absence or malformedness of the manifest means "not a Node project" and is
//! reported as `None`, never as an error.

pub mod analysis;
pub mod env_vars;
pub mod node;
pub mod package_json;
pub mod scanner;

pub use analysis::{ProjectAnalysis, TechnologyElement};
pub use env_vars::{find_environment_variables, RegexFileParser, RegexMatch};
pub use node::{
    Dependency, JavaScriptInfo, LinterInfo, NodeStack, Service, TechnologyClassification,
    TypeScriptInfo, NODE_STACK_NAME,
};
pub use package_json::{
    get_dependency_version, get_parsed_package_json, has_dependency, ManifestError, PackageJson,
    PackageJsonSummary, PACKAGE_JSON,
};
pub use scanner::{DockerfilePolicy, NodeScanner, ScanConfig, TechnologyScanner};
