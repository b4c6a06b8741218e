//! `package.json` parsing and dependency lookups

use crate::project::Project;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const PACKAGE_JSON: &str = "package.json";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("No package.json found in project")]
    Missing,

    #[error("Failed to read package.json: {0}")]
    Read(String),

    #[error("package.json is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("package.json must contain a JSON object at the top level")]
    NotAnObject,
}

/// A parsed manifest. Key order of the original document is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageJson {
    raw: Map<String, Value>,
}

impl PackageJson {
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        match serde_json::from_str::<Value>(content)? {
            Value::Object(raw) => Ok(Self { raw }),
            _ => Err(ManifestError::NotAnObject),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    fn str_field(&self, key: &str) -> Option<String> {
        self.raw.get(key).and_then(Value::as_str).map(str::to_string)
    }

    pub fn name(&self) -> Option<String> {
        self.str_field("name")
    }

    /// The `scripts` object, if the manifest has one
    pub fn scripts(&self) -> Option<&Map<String, Value>> {
        self.raw.get("scripts").and_then(Value::as_object)
    }

    fn dependency_table(&self, table: &str) -> Option<&Map<String, Value>> {
        self.raw.get(table).and_then(Value::as_object)
    }

    /// Runtime dependencies in manifest order, as (name, version range)
    pub fn dependencies(&self) -> Vec<(String, String)> {
        self.dependency_table("dependencies")
            .map(|deps| {
                deps.iter()
                    .map(|(name, version)| {
                        let version = version.as_str().unwrap_or_default().to_string();
                        (name.clone(), version)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn summary(&self) -> PackageJsonSummary {
        let scripts = self
            .scripts()
            .map(|scripts| {
                scripts
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|cmd| (k.clone(), cmd.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        PackageJsonSummary {
            name: self.name(),
            description: self.str_field("description"),
            author: self.raw.get("author").cloned(),
            license: self.str_field("license"),
            version: self.str_field("version"),
            scripts,
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.raw)
    }
}

/// Subset of the manifest persisted with analysis results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageJsonSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Either a string or a `{ name, email, url }` object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Kept in manifest order
    #[serde(default)]
    pub scripts: IndexMap<String, String>,
}

impl PackageJsonSummary {
    /// True when the script exists with a non-empty command
    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.get(name).map_or(false, |cmd| !cmd.is_empty())
    }
}

/// Check if a given manifest declares any of `names` as a dependency or dev dependency.
///
/// Only the key matters; the version value is not inspected.
pub fn has_dependency(pj: &PackageJson, names: &[&str]) -> bool {
    names.iter().any(|name| {
        ["dependencies", "devDependencies"].iter().any(|table| {
            pj.dependency_table(table)
                .map_or(false, |deps| deps.contains_key(*name))
        })
    })
}

/// Version range of a dependency, preferring `dependencies` over `devDependencies`
pub fn get_dependency_version(pj: &PackageJson, name: &str) -> Option<String> {
    ["dependencies", "devDependencies"].iter().find_map(|table| {
        pj.dependency_table(table)
            .and_then(|deps| deps.get(name))
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

/// Read and parse the project's manifest
pub fn get_parsed_package_json(project: &Project) -> Result<PackageJson, ManifestError> {
    let content = project
        .get_file(PACKAGE_JSON)
        .map_err(|e| ManifestError::Read(e.to_string()))?
        .ok_or(ManifestError::Missing)?;
    PackageJson::parse(&content)
}
