//! Read/write view of one checked-out project

use crate::fs::FileSystem;
use anyhow::{Context, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A project rooted at `root`, accessed through a [`FileSystem`].
///
/// All paths taken and returned by this type are relative to the root.
#[derive(Clone)]
pub struct Project {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
    max_depth: Option<usize>,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root: root.into(),
            fs,
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final component of the root path, used as a fallback display name
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.fs.is_file(&self.root.join(path))
    }

    /// Content of the file at `path`, or `None` when it does not exist
    pub fn get_file(&self, path: impl AsRef<Path>) -> Result<Option<String>> {
        let full = self.root.join(path.as_ref());
        if !self.fs.is_file(&full) {
            return Ok(None);
        }
        self.fs.read_to_string(&full).map(Some)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        self.fs.write_string(&self.root.join(path), content)
    }

    /// Files matching any of `globs`, minus those matching a `!`-prefixed glob.
    pub fn files_matching(&self, globs: &[&str]) -> Result<Vec<PathBuf>> {
        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for glob in globs {
            match glob.strip_prefix('!') {
                Some(negated) => exclude.push(
                    Pattern::new(negated).with_context(|| format!("Invalid glob pattern {}", glob))?,
                ),
                None => include.push(
                    Pattern::new(glob).with_context(|| format!("Invalid glob pattern {}", glob))?,
                ),
            }
        }

        let files = self.fs.walk_files(&self.root, self.max_depth)?;
        let matched: Vec<PathBuf> = files
            .into_iter()
            .filter(|path| {
                let rel = path.to_string_lossy();
                include.iter().any(|p| p.matches(&rel)) && !exclude.iter().any(|p| p.matches(&rel))
            })
            .collect();

        debug!(
            globs = ?globs,
            matched = matched.len(),
            "files_matching completed"
        );
        Ok(matched)
    }
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("root", &self.root)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
