//! Directory-level batch analysis
//!
//! Fans file parsing out across threads. Each file gets a freshly created
//! extractor, so no scope-tracking state is ever shared between concurrent
//! parses; one file's failure is recorded and never aborts the batch.

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AtlasError;
use crate::extractor::StructureExtractor;
use crate::language::Language;
use crate::types::FileAnalysis;
use crate::walker::FileWalker;

/// One file that could not be analyzed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    /// Path of the failed file
    pub file_path: String,
    /// Human-readable failure description
    pub error: String,
}

/// Aggregated result of analyzing a directory tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryAnalysis {
    /// Root directory that was analyzed
    pub root: String,
    /// Per-file analyses, ordered by file path
    pub analyses: Vec<FileAnalysis>,
    /// Files that failed, with the reason
    pub failures: Vec<FileFailure>,
    /// Total elements extracted across all analyzed files
    pub total_elements: usize,
}

impl DirectoryAnalysis {
    /// Number of files analyzed successfully
    pub fn files_analyzed(&self) -> usize {
        self.analyses.len()
    }

    /// Number of files that failed
    pub fn files_failed(&self) -> usize {
        self.failures.len()
    }
}

/// Analyzes every source file under a directory root
pub struct ProjectAnalyzer {
    language: Language,
    config: Config,
}

impl ProjectAnalyzer {
    /// Create an analyzer with default configuration
    pub fn new(language: Language) -> Self {
        Self::with_config(language, Config::default())
    }

    /// Create an analyzer with explicit configuration
    pub fn with_config(language: Language, config: Config) -> Self {
        Self { language, config }
    }

    /// Discover and analyze all source files under `root`
    ///
    /// Files are parsed in parallel; each worker builds its own extractor
    /// so no parse observes another's state. Per-file errors land in
    /// `failures` while the rest of the batch proceeds.
    pub fn analyze_directory(
        &self,
        root: impl AsRef<Path>,
    ) -> Result<DirectoryAnalysis, AtlasError> {
        let root = root.as_ref();
        let files = FileWalker::new(root, self.config.extraction.max_file_size)
            .with_patterns(
                self.config.walker.include_patterns.clone(),
                self.config.walker.exclude_patterns.clone(),
            )
            .walk()?;

        let results: Vec<Result<FileAnalysis, FileFailure>> = files
            .par_iter()
            .map(|path| {
                let mut extractor =
                    StructureExtractor::with_config(self.language, self.config.extraction.clone())
                        .map_err(|e| FileFailure {
                            file_path: path.display().to_string(),
                            error: e.to_string(),
                        })?;
                extractor.parse_file(path).map_err(|e| FileFailure {
                    file_path: path.display().to_string(),
                    error: e.to_string(),
                })
            })
            .collect();

        let mut analyses = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(analysis) => analyses.push(analysis),
                Err(failure) => {
                    tracing::warn!("Failed to analyze {}: {}", failure.file_path, failure.error);
                    failures.push(failure);
                }
            }
        }

        let total_elements = analyses.iter().map(|a| a.elements.len()).sum();
        tracing::info!(
            "Analyzed {} files under {} ({} failed, {} elements)",
            analyses.len(),
            root.display(),
            failures.len(),
            total_elements
        );

        Ok(DirectoryAnalysis {
            root: root.display().to_string(),
            analyses,
            failures,
            total_elements,
        })
    }
}
