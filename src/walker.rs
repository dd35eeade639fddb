//! Source file discovery for directory-level analysis
//!
//! Walks a project tree respecting gitignore rules and collects the files
//! whose language has a registered grammar, filtered by the configured
//! glob patterns and size limit.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::error::WalkError;
use crate::language::Language;

/// Collects analyzable source files under a root directory
pub struct FileWalker {
    root: PathBuf,
    max_file_size: usize,
    include_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: impl AsRef<Path>, max_file_size: usize) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            max_file_size,
            include_patterns: vec![],
            exclude_patterns: vec![],
        }
    }

    pub fn with_patterns(
        mut self,
        include_patterns: Vec<String>,
        exclude_patterns: Vec<String>,
    ) -> Self {
        self.include_patterns = include_patterns;
        self.exclude_patterns = exclude_patterns;
        self
    }

    /// Walk the directory and collect all eligible source files, sorted
    pub fn walk(&self) -> Result<Vec<PathBuf>, WalkError> {
        if !self.root.exists() {
            return Err(WalkError::DirectoryNotFound(
                self.root.display().to_string(),
            ));
        }
        if !self.root.is_dir() {
            return Err(WalkError::NotADirectory(self.root.display().to_string()));
        }

        let include = build_globset(&self.include_patterns)?;
        let exclude = build_globset(&self.exclude_patterns)?;

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(true) // Respect .gitignore, .ignore, etc.
            .hidden(false)
            .require_git(false)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| WalkError::WalkFailed(e.to_string()))?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            if Language::from_path(path).is_none() {
                continue;
            }

            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            if !self.include_patterns.is_empty() && !include.is_match(relative) {
                tracing::debug!("Skipping non-included file: {:?}", path);
                continue;
            }
            if exclude.is_match(relative) {
                tracing::debug!("Skipping excluded file: {:?}", path);
                continue;
            }

            if let Ok(metadata) = entry.metadata()
                && metadata.len() as usize > self.max_file_size
            {
                tracing::debug!("Skipping large file: {:?}", path);
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        tracing::info!("Found {} source files to analyze", files.len());
        Ok(files)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, WalkError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| WalkError::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| WalkError::WalkFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collects_only_registered_languages() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app.py", "x = 1\n");
        touch(dir.path(), "notes.md", "# notes\n");
        touch(dir.path(), "lib/util.py", "y = 2\n");

        let files = FileWalker::new(dir.path(), 1_048_576).walk().unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["app.py", "lib/util.py"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app.py", "x = 1\n");
        touch(dir.path(), "build/gen.py", "y = 2\n");

        let files = FileWalker::new(dir.path(), 1_048_576)
            .with_patterns(vec![], vec!["build/**".to_string()])
            .walk()
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.py"));
    }

    #[test]
    fn test_include_patterns() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app.py", "x = 1\n");
        touch(dir.path(), "scripts/tool.py", "y = 2\n");

        let files = FileWalker::new(dir.path(), 1_048_576)
            .with_patterns(vec!["scripts/**".to_string()], vec![])
            .walk()
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("scripts/tool.py"));
    }

    #[test]
    fn test_oversized_files_skipped() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "small.py", "x = 1\n");
        touch(dir.path(), "big.py", &"# filler\n".repeat(100));

        let files = FileWalker::new(dir.path(), 64).walk().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("small.py"));
    }

    #[test]
    fn test_missing_root() {
        let err = FileWalker::new("/nonexistent/root", 1024).walk().unwrap_err();
        assert!(matches!(err, WalkError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        let err = FileWalker::new(dir.path(), 1024)
            .with_patterns(vec!["[".to_string()], vec![])
            .walk()
            .unwrap_err();
        assert!(matches!(err, WalkError::InvalidPattern { .. }));
    }
}
