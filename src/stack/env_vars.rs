//! Environment variable references in JavaScript and TypeScript sources

use crate::project::Project;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, trace};

pub const SOURCE_GLOBS: &[&str] = &["**/*.js", "**/*.ts"];

/// A single named match produced by a [`RegexFileParser`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexMatch {
    pub path: String,
    pub captures: HashMap<String, String>,
}

impl RegexMatch {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures.get(name).map(String::as_str)
    }
}

/// Regex-driven parser that turns file content into a flat list of named matches
pub struct RegexFileParser {
    regex: Regex,
    capture_group_names: Vec<String>,
}

impl RegexFileParser {
    pub fn new(regex: Regex, capture_group_names: &[&str]) -> Self {
        Self {
            regex,
            capture_group_names: capture_group_names.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parser for `process.env.NAME` references
    pub fn env_references() -> Self {
        Self::new(
            Regex::new(r"process\.env\.([A-Za-z0-9_]+)").expect("valid regex"),
            &["name"],
        )
    }

    pub fn parse(&self, path: &str, content: &str) -> Vec<RegexMatch> {
        self.regex
            .captures_iter(content)
            .map(|cap| {
                let captures = self
                    .capture_group_names
                    .iter()
                    .enumerate()
                    .filter_map(|(i, name)| {
                        cap.get(i + 1).map(|m| (name.clone(), m.as_str().to_string()))
                    })
                    .collect();
                RegexMatch {
                    path: path.to_string(),
                    captures,
                }
            })
            .collect()
    }

    /// Parse every file matching `globs`, in path order.
    ///
    /// Unreadable files yield no matches, as do files above `max_file_size`
    /// when a limit is set. A failure to enumerate
    /// the tree yields no matches at all.
    pub fn match_project(
        &self,
        project: &Project,
        globs: &[&str],
        max_file_size: Option<usize>,
    ) -> Vec<RegexMatch> {
        let files = match project.files_matching(globs) {
            Ok(files) => files,
            Err(e) => {
                debug!(error = %e, "Failed to enumerate source files");
                return Vec::new();
            }
        };

        let mut matches = Vec::new();
        for file in files {
            if let Some(content) = read_source(project, &file, max_file_size) {
                matches.extend(self.parse(&file.to_string_lossy(), &content));
            }
        }
        matches
    }
}

fn read_source(project: &Project, file: &Path, max_file_size: Option<usize>) -> Option<String> {
    match project.get_file(file) {
        Ok(Some(content)) if max_file_size.map_or(false, |max| content.len() > max) => {
            trace!(path = %file.display(), size = content.len(), "Skipping oversized file");
            None
        }
        Ok(Some(content)) => Some(content),
        Ok(None) => None,
        Err(e) => {
            trace!(path = %file.display(), error = %e, "Skipping unreadable file");
            None
        }
    }
}

/// Environment variables referenced via `process.env.KEY`, in first-seen order
pub fn find_environment_variables(project: &Project, max_file_size: Option<usize>) -> Vec<String> {
    let parser = RegexFileParser::env_references();
    let mut names: Vec<String> = Vec::new();

    for m in parser.match_project(project, SOURCE_GLOBS, max_file_size) {
        if let Some(name) = m.get("name") {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }

    debug!(count = names.len(), "Environment variable scan complete");
    names
}
