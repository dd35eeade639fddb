/// Configuration system for code-atlas
///
/// Supports loading from multiple sources with priority:
/// Environment variables > Config file > Defaults
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, ConfigError};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Extraction configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Directory walking configuration
    #[serde(default)]
    pub walker: WalkerConfig,
}

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Maximum file size to analyze (in bytes)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,

    /// Use the legacy single-slot scope tracker
    ///
    /// The default stack tracker qualifies names through every enclosing
    /// class. The legacy mode reproduces the single-slot behavior of older
    /// deployments: only the innermost class names a method's parent and
    /// nested classes are never qualified.
    #[serde(default)]
    pub legacy_scope: bool,
}

/// Directory walking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Glob patterns to include (empty means all source files)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Glob patterns to exclude
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

fn default_max_file_size() -> usize {
    1_048_576 // 1 MB
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/.git/**".to_string(),
        "**/__pycache__/**".to_string(),
        "**/.venv/**".to_string(),
        "**/venv/**".to_string(),
        "**/node_modules/**".to_string(),
    ]
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            legacy_scope: false,
        }
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            include_patterns: Vec::new(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, AtlasError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), AtlasError> {
        if self.extraction.max_file_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "extraction.max_file_size".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(size) = std::env::var("CODE_ATLAS_MAX_FILE_SIZE")
            && let Ok(size) = size.parse()
        {
            self.extraction.max_file_size = size;
        }

        if let Ok(legacy) = std::env::var("CODE_ATLAS_LEGACY_SCOPE")
            && let Ok(legacy) = legacy.parse()
        {
            self.extraction.legacy_scope = legacy;
        }

        if let Ok(patterns) = std::env::var("CODE_ATLAS_EXCLUDE_PATTERNS") {
            self.walker.exclude_patterns = patterns
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }
    }

    /// Create a new Config with defaults and environment overrides
    pub fn new() -> Result<Self, AtlasError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction.max_file_size, 1_048_576);
        assert!(!config.extraction.legacy_scope);
        assert!(!config.walker.exclude_patterns.is_empty());
    }

    #[test]
    fn test_zero_max_file_size_rejected() {
        let mut config = Config::default();
        config.extraction.max_file_size = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AtlasError::Config(_)));
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
[extraction]
max_file_size = 2048
legacy_scope = true

[walker]
exclude_patterns = ["**/build/**"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.extraction.max_file_size, 2048);
        assert!(config.extraction.legacy_scope);
        assert_eq!(config.walker.exclude_patterns, vec!["**/build/**"]);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[extraction]\n").unwrap();
        assert_eq!(config.extraction.max_file_size, 1_048_576);
        assert!(!config.extraction.legacy_scope);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/atlas.toml")).unwrap_err();
        assert!(matches!(
            err,
            AtlasError::Config(ConfigError::FileNotFound(_))
        ));
    }
}
