//! Configuration management for nodepack
//!
//! Settings are loaded from environment variables with defaults.
//!
//! # Environment Variables
//!
//! - `NODEPACK_LOG_LEVEL`: Logging level - default: "info"
//! - `NODEPACK_DOCKERFILE_POLICY`: Which Dockerfile to record when several
//!   exist (first|shortest|reject) - default: "first"
//! - `NODEPACK_MAX_DEPTH`: Maximum directory depth walked when matching
//!   files - default: unlimited
//! - `NODEPACK_MAX_FILE_SIZE`: Source files larger than this many bytes are
//!   not scanned for environment variables - default: unlimited
//!
//! # Example
//!
//! ```no_run
//! use nodepack::NodepackConfig;
//!
//! let config = NodepackConfig::default();
//! config.validate().expect("Invalid configuration");
//! let scan_config = config.scan_config();
//! ```

use crate::stack::{DockerfilePolicy, ScanConfig};
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const MAX_FILE_SIZE_LIMIT: usize = 104_857_600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodepackConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    pub dockerfile_policy: DockerfilePolicy,

    /// Maximum walk depth; `None` walks the whole tree
    pub max_depth: Option<usize>,

    /// Maximum size in bytes of a source file scanned for environment
    /// variables; `None` scans every file
    pub max_file_size: Option<usize>,
}

impl Default for NodepackConfig {
    /// Loads from `NODEPACK_*` environment variables. Unparsable values fall
    /// back to defaults; use [`NodepackConfig::from_env`] to see the errors.
    fn default() -> Self {
        let log_level = env::var("NODEPACK_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let dockerfile_policy = env::var("NODEPACK_DOCKERFILE_POLICY")
            .ok()
            .and_then(|v| v.parse::<DockerfilePolicy>().ok())
            .unwrap_or_default();

        let max_depth = env::var("NODEPACK_MAX_DEPTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());

        let max_file_size = env::var("NODEPACK_MAX_FILE_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());

        Self {
            log_level,
            dockerfile_policy,
            max_depth,
            max_file_size,
        }
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::ParseError {
                field: key.to_string(),
                error: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

impl NodepackConfig {
    /// Strict variant of `default()`: malformed values are errors
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            log_level: env::var("NODEPACK_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
            dockerfile_policy: parse_env("NODEPACK_DOCKERFILE_POLICY")?.unwrap_or_default(),
            max_depth: parse_env("NODEPACK_MAX_DEPTH")?,
            max_file_size: parse_env("NODEPACK_MAX_FILE_SIZE")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "Max depth must be at least 1".to_string(),
            ));
        }

        if self.max_file_size == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "Max file size must be at least 1 byte".to_string(),
            ));
        }
        if self.max_file_size.map_or(false, |size| size > MAX_FILE_SIZE_LIMIT) {
            return Err(ConfigError::ValidationFailed(
                "Max file size cannot exceed 100MB".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            dockerfile_policy: self.dockerfile_policy,
            max_file_size: self.max_file_size,
        }
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert(
            "dockerfile_policy".to_string(),
            self.dockerfile_policy.to_string(),
        );
        if let Some(depth) = self.max_depth {
            map.insert("max_depth".to_string(), depth.to_string());
        }
        if let Some(size) = self.max_file_size {
            map.insert("max_file_size".to_string(), size.to_string());
        }

        map
    }
}

impl fmt::Display for NodepackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodepack Configuration:")?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Dockerfile Policy: {}", self.dockerfile_policy)?;
        match self.max_depth {
            Some(depth) => writeln!(f, "  Max Depth: {}", depth)?,
            None => writeln!(f, "  Max Depth: unlimited")?,
        }
        match self.max_file_size {
            Some(size) => writeln!(f, "  Max File Size: {} bytes", size)?,
            None => writeln!(f, "  Max File Size: unlimited")?,
        }
        Ok(())
    }
}
