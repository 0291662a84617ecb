//! Error types for protocol extraction

use thiserror::Error;

/// Errors that can occur while loading settings or (de)serializing results
///
/// Segmentation itself never fails: a document without usable headings
/// degrades to an empty [`crate::ResultMapping`].
#[derive(Error, Debug)]
pub enum CoreError {
    /// Error reading a settings or record file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
