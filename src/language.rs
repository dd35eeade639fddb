//! Programming language detection and grammar registry
//!
//! The extraction engine works on one grammar at a time; this module maps
//! file extensions to registered languages and hands out the tree-sitter
//! grammar for each. Adding a language means adding a variant here and the
//! node-kind handling in the extractor.

use std::path::Path;

use crate::error::ExtractError;

/// A language with a registered tree-sitter grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
}

impl Language {
    /// Resolve a language from a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "py" | "pyi" => Some(Language::Python),
            _ => None,
        }
    }

    /// Resolve a language from a file path, by extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Resolve a language from a path, failing with `UnsupportedLanguage`
    pub fn for_path(path: &Path) -> Result<Self, ExtractError> {
        Self::from_path(path)
            .ok_or_else(|| ExtractError::UnsupportedLanguage(path.display().to_string()))
    }

    /// Human-readable language name
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
        }
    }

    /// The tree-sitter grammar for this language
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }
}
