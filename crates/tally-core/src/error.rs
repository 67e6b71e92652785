//! Error types for Tally operations.
//!
//! [`TallyError`] covers everything that can go wrong around the reporting
//! engine: loading configuration, reading input files and parsing them.
//! The aggregation functions themselves never fail.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`TallyError`].
pub type Result<T> = std::result::Result<T, TallyError>;

/// Error type for Tally configuration and input handling.
#[derive(Debug, Error)]
pub enum TallyError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration file not found
    #[error("Configuration not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file is invalid YAML
    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// Generic I/O error with context
    #[error("I/O error {operation}: {path}")]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory creation failed
    #[error("Failed to create directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Parsing Errors
    // =========================================================================
    /// YAML parsing error
    #[error("YAML parse error in {context}: {message}")]
    YamlParse {
        context: String,
        message: String,
        #[source]
        source: Option<serde_yaml::Error>,
    },

    // =========================================================================
    // Environment Errors
    // =========================================================================
    /// No home directory to place `~/.tally` under
    #[error("HOME environment variable not set")]
    HomeNotSet,
}

impl TallyError {
    /// Create a ConfigNotFound error with source
    pub fn config_not_found_with_source(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigNotFound {
            path: path.into(),
            source: Some(source),
        }
    }

    /// Create a ConfigValidation error
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(
        operation: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a YAML parse error
    pub fn yaml_parse(context: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::YamlParse {
            context: context.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Returns true if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. } | Self::ConfigInvalid { .. } | Self::ConfigValidation { .. }
        )
    }

    /// Returns actionable guidance for the user
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            Self::ConfigNotFound { .. } => {
                Some("Create ~/.tally/config.yaml or pass --config with an existing file")
            }
            Self::ConfigInvalid { .. } | Self::YamlParse { .. } => Some("Check YAML syntax"),
            Self::ConfigValidation { .. } => {
                Some("month_names needs 12 entries, weekday_names needs 7, limits must be positive")
            }
            Self::HomeNotSet => Some("Set HOME, or pass --config and --log-dir explicitly"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_error() {
        let source = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err = TallyError::config_not_found_with_source("/home/user/.tally/config.yaml", source);
        assert!(err.to_string().contains("Configuration not found"));
        assert!(err.is_config_error());
        assert!(err.guidance().is_some());
    }

    #[test]
    fn test_yaml_parse_error() {
        let source = serde_yaml::from_str::<Vec<u32>>("[1, 2").unwrap_err();
        let err = TallyError::yaml_parse("tally.yaml", source);
        assert!(err.to_string().contains("tally.yaml"));
        assert!(!err.is_config_error());
        assert_eq!(err.guidance(), Some("Check YAML syntax"));
    }

    #[test]
    fn test_io_error_has_no_guidance() {
        let source = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err = TallyError::io("reading config", "/etc/tally.yaml", source);
        assert!(err.guidance().is_none());
        assert_eq!(err.to_string(), "I/O error reading config: /etc/tally.yaml");
    }

    #[test]
    fn test_missing_home_points_at_flags() {
        let err = TallyError::HomeNotSet;
        assert!(err.guidance().unwrap().contains("--log-dir"));
    }
}
