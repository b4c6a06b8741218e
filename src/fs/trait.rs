//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Directories never descended into when walking a project tree
pub const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace file contents, creating the file if needed
    fn write_string(&self, path: &Path, content: &str) -> Result<()>;

    /// List every file below `root`, as paths relative to `root`, in sorted order.
    ///
    /// Entries under [`SKIPPED_DIRS`] are not returned; ignore files such as
    /// `.gitignore` are not consulted. `max_depth` counts path components of
    /// the relative path, so `Some(1)` yields only top-level files.
    fn walk_files(&self, root: &Path, max_depth: Option<usize>) -> Result<Vec<PathBuf>>;
}

pub(crate) fn is_skipped(relative: &Path) -> bool {
    relative.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|name| SKIPPED_DIRS.contains(&name))
            .unwrap_or(false)
    })
}
