//! Error types for config and level data loading.

use thiserror::Error;

/// Errors that can occur when loading config or level data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// The config is well-formed but holds unusable values.
    #[error("Invalid config '{path}': {reason}")]
    InvalidConfig { path: String, reason: String },

    /// The level data is well-formed but unusable.
    #[error("Invalid level '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },
}

impl DataLoadError {
    /// Whether this error only means the file is absent (defaults apply silently).
    pub fn is_missing(&self) -> bool {
        matches!(self, DataLoadError::FileNotFound(_))
    }
}

/// Read a data file to a string, mapping io failures onto `DataLoadError`.
pub fn read_data_file(path: &str) -> Result<String, DataLoadError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound(path.to_string()),
        _ => DataLoadError::ReadError {
            path: path.to_string(),
            details: e.to_string(),
        },
    })
}
