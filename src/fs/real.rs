use super::{is_skipped, FileSystem, SKIPPED_DIRS};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn write_string(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).context(format!("Failed to write file {:?}", path))
    }

    fn walk_files(&self, root: &Path, max_depth: Option<usize>) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            anyhow::bail!("Directory not found: {:?}", root);
        }

        let mut files = Vec::new();
        for result in WalkBuilder::new(root)
            .max_depth(max_depth)
            .standard_filters(false)
            .filter_entry(|e| {
                e.depth() == 0
                    || !e
                        .file_name()
                        .to_str()
                        .map_or(false, |name| SKIPPED_DIRS.contains(&name))
            })
            .build()
        {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let relative = match entry.path().strip_prefix(root) {
                Ok(rel) => rel,
                Err(_) => continue,
            };
            if is_skipped(relative) {
                continue;
            }
            files.push(relative.to_path_buf());
        }
        files.sort();

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir(base.join("src")).unwrap();
        fs::File::create(base.join("package.json"))
            .unwrap()
            .write_all(b"{\"name\": \"demo\"}")
            .unwrap();
        fs::File::create(base.join("src/index.js"))
            .unwrap()
            .write_all(b"process.env.PORT")
            .unwrap();

        dir
    }

    #[test]
    fn test_exists() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.exists(temp.path()));
        assert!(fs.exists(&temp.path().join("package.json")));
        assert!(!fs.exists(&temp.path().join("nonexistent")));
    }

    #[test]
    fn test_is_dir_and_is_file() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.is_dir(&temp.path().join("src")));
        assert!(!fs.is_dir(&temp.path().join("package.json")));
        assert!(fs.is_file(&temp.path().join("package.json")));
        assert!(!fs.is_file(temp.path()));
    }

    #[test]
    fn test_read_and_write() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();
        let manifest = temp.path().join("package.json");

        fs.write_string(&manifest, "{}").unwrap();
        assert_eq!(fs.read_to_string(&manifest).unwrap(), "{}");
    }

    #[test]
    fn test_walk_files_skips_node_modules() {
        let temp = create_test_dir();
        fs::create_dir_all(temp.path().join("node_modules/dep")).unwrap();
        fs::write(temp.path().join("node_modules/dep/index.js"), "x").unwrap();

        let fs = RealFileSystem::new();
        let files = fs.walk_files(temp.path(), None).unwrap();

        assert_eq!(
            files,
            vec![PathBuf::from("package.json"), PathBuf::from("src/index.js")]
        );
    }

    #[test]
    fn test_walk_files_includes_gitignored_paths() {
        let temp = create_test_dir();
        let base = temp.path();
        fs::create_dir_all(base.join(".git")).unwrap();
        fs::write(base.join(".git/HEAD"), "ref: refs/heads/main").unwrap();
        fs::write(base.join(".gitignore"), "dist/\nDockerfile\n").unwrap();
        fs::create_dir_all(base.join("dist")).unwrap();
        fs::write(base.join("dist/app.js"), "process.env.BUILT").unwrap();
        fs::write(base.join("Dockerfile"), "FROM node").unwrap();

        let fs = RealFileSystem::new();
        let files = fs.walk_files(base, None).unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from(".gitignore"),
                PathBuf::from("Dockerfile"),
                PathBuf::from("dist/app.js"),
                PathBuf::from("package.json"),
                PathBuf::from("src/index.js"),
            ]
        );
    }

    #[test]
    fn test_walk_files_missing_root() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.walk_files(&temp.path().join("missing"), None).is_err());
    }
}
