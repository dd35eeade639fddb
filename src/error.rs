/// Centralized error types for code-atlas using thiserror
///
/// Provides domain-specific error types for better error handling and
/// user-facing messages.
use thiserror::Error;

/// Main error type for the extraction system
#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while extracting structure from a single file
///
/// Every variant is fatal to the single-file call only; batch callers catch
/// and continue with remaining files.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Syntax error in {path} at line {line}, column {column}: {message}")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("File is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("Unsupported language for extraction: {0}")]
    UnsupportedLanguage(String),

    #[error("Failed to load grammar for {language}: {reason}")]
    Grammar { language: String, reason: String },

    #[error("Failed to read file '{file}': {reason}")]
    Io { file: String, reason: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Errors related to directory walking
#[derive(Error, Debug)]
pub enum WalkError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to walk directory: {0}")]
    WalkFailed(String),
}

impl From<anyhow::Error> for AtlasError {
    fn from(err: anyhow::Error) -> Self {
        AtlasError::Other(format!("{:#}", err))
    }
}

impl AtlasError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        AtlasError::Other(msg.into())
    }

    /// Check if this error is scoped to a single file
    ///
    /// Batch processing catches these and continues with remaining files.
    pub fn is_per_file(&self) -> bool {
        matches!(self, AtlasError::Extract(_))
    }
}

impl ExtractError {
    /// Whether the source text itself was rejected (as opposed to the file
    /// being unreadable)
    pub fn is_syntax(&self) -> bool {
        matches!(self, ExtractError::Syntax { .. })
    }
}
