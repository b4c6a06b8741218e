//! Adds or replaces a script in `package.json`

use super::{CodeTransformRegistration, PullRequest};
use crate::project::Project;
use crate::stack::{get_parsed_package_json, ManifestError, PACKAGE_JSON};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

pub const SCRIPT_PLACEHOLDER: &str = "<please add your script here>";
pub const PACKAGE_SCRIPT_TRANSFORM: &str = "PackageScriptCodeTransform";

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("\"scripts\" in package.json must be an object")]
    ScriptsNotAnObject,

    #[error("Failed to serialize package.json: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write package.json: {0}")]
    Write(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptParameters {
    pub script: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ScriptParameters {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    fn content_or_placeholder(&self) -> &str {
        self.content.as_deref().unwrap_or(SCRIPT_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PackageScriptTransform;

impl PackageScriptTransform {
    pub fn new() -> Self {
        Self
    }

    pub fn registration() -> CodeTransformRegistration {
        CodeTransformRegistration {
            name: PACKAGE_SCRIPT_TRANSFORM.to_string(),
            parameters: vec!["script".to_string(), "content".to_string()],
        }
    }

    /// The manifest as it would look after the transform, without writing it
    pub fn rewrite(
        &self,
        project: &Project,
        params: &ScriptParameters,
    ) -> Result<String, TransformError> {
        let mut manifest = match get_parsed_package_json(project)?.into_value() {
            Value::Object(map) => map,
            _ => return Err(ManifestError::NotAnObject.into()),
        };

        let scripts = manifest
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));
        let scripts = scripts
            .as_object_mut()
            .ok_or(TransformError::ScriptsNotAnObject)?;

        let previous = scripts.insert(
            params.script.clone(),
            Value::String(params.content_or_placeholder().to_string()),
        );
        debug!(
            script = %params.script,
            replaced = previous.is_some(),
            "Set package.json script"
        );

        serde_json::to_string_pretty(&Value::Object(manifest)).map_err(TransformError::Serialize)
    }

    pub fn transform(
        &self,
        project: &Project,
        params: &ScriptParameters,
    ) -> Result<(), TransformError> {
        let content = self.rewrite(project, params)?;
        project
            .write_file(PACKAGE_JSON, &content)
            .map_err(|e| TransformError::Write(e.to_string()))?;

        info!(
            project = %project.name(),
            script = %params.script,
            "Updated package.json"
        );
        Ok(())
    }

    pub fn presentation<Tz: TimeZone>(
        &self,
        params: &ScriptParameters,
        timestamp: &DateTime<Tz>,
    ) -> PullRequest
    where
        Tz::Offset: std::fmt::Display,
    {
        let title = match params.content {
            Some(_) => format!("Add {} script to package.json", params.script),
            None => format!("Add empty {} script to package.json", params.script),
        };
        let body = format!(
            "Sets `scripts.{}` in `package.json` to `{}`.",
            params.script,
            params.content_or_placeholder()
        );

        PullRequest {
            branch: format!(
                "package-{}-script-{}",
                params.script,
                timestamp.format("%Y%m%d%H%M%S")
            ),
            title,
            body,
        }
    }

    pub fn presentation_now(&self, params: &ScriptParameters) -> PullRequest {
        self.presentation(params, &Local::now())
    }
}
