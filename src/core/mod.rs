use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::services::mpris::MediaError;

/// Error types for the mpris-panel application.
///
/// Covers configuration loading and parsing, plus bus failures that reach the
/// application boundary.
#[derive(Error, Debug)]
pub enum PanelError {
    /// Configuration field missing or invalid
    #[error("invalid config field '{field}' in {component}: {reason}")]
    InvalidConfigField {
        /// The field that is invalid
        field: String,
        /// Component containing the field
        component: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Media player or bus failure
    #[error(transparent)]
    Media(#[from] MediaError),
}

/// A specialized `Result` type for mpris-panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

impl PanelError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        PanelError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error carrying the path it happened on.
    pub fn io_at(error: &std::io::Error, path: &Path) -> Self {
        PanelError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
