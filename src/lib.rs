//! nodepack - Node.js stack support for delivery pipelines
//!
//! This library recognizes Node.js and TypeScript projects and derives the
//! delivery goals a pipeline should run for them.
//!
//! # Core Concepts
//!
//! - **Scanning**: [`NodeScanner`] reads `package.json`, linter configuration,
//!   Dockerfiles and `process.env` references into a [`NodeStack`]. A project
//!   without a usable manifest is simply not a Node project.
//! - **Interpretation**: [`NodeBuildInterpreter`] turns the scan result into
//!   goal groups (build, test, release, checks, docker build) plus autofix and
//!   inspection registrations. Interpreters are folded in order, each taking
//!   the previous [`Interpretation`] and returning the next.
//! - **Transforms**: [`PackageScriptTransform`] inserts a script into
//!   `package.json` and describes the pull request that would propose it.
//!
//! # Example Usage
//!
//! ```no_run
//! use nodepack::{node_stack_support, AnalysisOrchestrator, NodeDeliveryOptions, Project, RealFileSystem};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let project = Project::new("/path/to/repo", Arc::new(RealFileSystem::new()));
//! let orchestrator = AnalysisOrchestrator::new(node_stack_support(NodeDeliveryOptions::default()), None);
//!
//! let interpretation = orchestrator.run(&project).await;
//! if let Some(build) = &interpretation.build_goals {
//!     println!("{} build goals", build.goals().len());
//! }
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`fs`]: file system abstraction with real and in-memory implementations
//! - [`stack`]: manifest parsing and the Node scanner
//! - [`goals`]: goal, goal group, cache and push test model
//! - [`interpret`]: interpretation and the Node goal-plan interpreter
//! - [`transform`]: `package.json` script transform
//! - [`pipeline`]: scanner and interpreter orchestration

pub mod cli;
pub mod config;
pub mod fs;
pub mod goals;
pub mod interpret;
pub mod pipeline;
pub mod progress;
pub mod project;
pub mod stack;
pub mod support;
pub mod transform;
pub mod util;

pub use config::{ConfigError, NodepackConfig};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use goals::{Goal, GoalGraph, GoalGroup, GoalKind, MaterialChange, Push, PushTest};
pub use interpret::{
    Enrichment, Interpretation, Interpreter, NodeBuildInterpreter, NodeDeliveryOptions,
};
pub use pipeline::AnalysisOrchestrator;
pub use progress::{LoggingHandler, NoOpHandler, ProgressEvent, ProgressHandler};
pub use project::Project;
pub use stack::{
    DockerfilePolicy, NodeScanner, NodeStack, PackageJsonSummary, ProjectAnalysis, ScanConfig,
    TechnologyScanner,
};
pub use support::{node_stack_support, StackSupport};
pub use transform::{PackageScriptTransform, PullRequest, ScriptParameters, TransformError};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "nodepack");
    }
}
