//! Error types for reading report input.
//!
//! Only ingestion can fail. Once records are loaded, every aggregation is
//! infallible.

use std::path::PathBuf;
use thiserror::Error;

/// Input loading errors.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Input file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not valid JSON
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is valid JSON but not an array of records
    #[error("expected a JSON array of records, found {found}")]
    NotAnArray {
        /// JSON type that was found instead
        found: &'static str,
    },
}

impl ReportError {
    /// Create a user-friendly message for this error.
    pub fn friendly_message(&self) -> String {
        match self {
            ReportError::Io { path, source } => match source.kind() {
                std::io::ErrorKind::NotFound => format!("File not found: {}", path.display()),
                std::io::ErrorKind::PermissionDenied => {
                    format!("Permission denied: {}", path.display())
                }
                _ => format!("Could not read {}: {}", path.display(), source),
            },
            ReportError::NotAnArray { .. } => {
                "Input must be a JSON array of sales or cost records.".to_string()
            }
            _ => format!("Error: {}", self),
        }
    }
}

/// Result type for input loading.
pub type Result<T> = std::result::Result<T, ReportError>;
