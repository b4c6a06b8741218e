//! User-triggered changes to a project's files

pub mod script;

pub use script::{
    PackageScriptTransform, ScriptParameters, TransformError, PACKAGE_SCRIPT_TRANSFORM,
    SCRIPT_PLACEHOLDER,
};

use serde::{Deserialize, Serialize};

/// Description of the pull request a transform proposes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub branch: String,
    pub title: String,
    pub body: String,
}

/// A transform a host can offer as a command, with the parameters it accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTransformRegistration {
    pub name: String,
    pub parameters: Vec<String>,
}
