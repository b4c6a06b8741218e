use super::cache::CacheOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Version,
    Build,
    Test,
    Tag,
    DockerBuild,
    Autofix,
    CodeInspection,
}

/// Program and arguments a goal runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub program: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalDescriptions {
    pub in_process: String,
    pub completed: String,
    pub failed: String,
}

/// Work attached to a goal that runs around its main execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "listener", content = "cache", rename_all = "snake_case")]
pub enum ProjectListener {
    NpmInstall,
    NpmCompile,
    NpmVersion,
    CacheRestore(CacheOptions),
    CachePut(CacheOptions),
    CacheRemove(CacheOptions),
}

impl ProjectListener {
    /// Short label such as `npm-install` or `cache-restore:nodeModules`
    pub fn label(&self) -> String {
        match self {
            ProjectListener::NpmInstall => "npm-install".to_string(),
            ProjectListener::NpmCompile => "npm-compile".to_string(),
            ProjectListener::NpmVersion => "npm-version".to_string(),
            ProjectListener::CacheRestore(opts) => format!("cache-restore:{}", opts.classifiers()),
            ProjectListener::CachePut(opts) => format!("cache-put:{}", opts.classifiers()),
            ProjectListener::CacheRemove(opts) => format!("cache-remove:{}", opts.classifiers()),
        }
    }
}

/// A named unit of delivery work. Goals describe work; they do not run it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub display_name: String,
    pub kind: GoalKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,
    pub retry: bool,
    pub isolate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<GoalDescriptions>,
    pub listeners: Vec<ProjectListener>,
}

impl Goal {
    pub fn new(name: &str, kind: GoalKind) -> Self {
        Self {
            name: name.to_string(),
            display_name: name.to_string(),
            kind,
            command: None,
            retry: false,
            isolate: false,
            descriptions: None,
            listeners: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = display_name.to_string();
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    pub fn with_retry(mut self, retry: bool) -> Self {
        self.retry = retry;
        self
    }

    pub fn isolated(mut self) -> Self {
        self.isolate = true;
        self
    }

    pub fn with_descriptions(mut self, descriptions: GoalDescriptions) -> Self {
        self.descriptions = Some(descriptions);
        self
    }

    pub fn with_project_listener(mut self, listener: ProjectListener) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn add_project_listener(&mut self, listener: ProjectListener) {
        self.listeners.push(listener);
    }
}
