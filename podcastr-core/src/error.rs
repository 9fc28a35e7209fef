use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PodcastrError {
    // Configuration errors
    #[error("Config file not found at {path}. A template has been created - edit it if you want to change the defaults.")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Catalog errors
    #[error("Failed to parse episode catalog: {0}")]
    CatalogParseError(#[from] serde_json::Error),

    #[error("Invalid URL in {field}: {value}")]
    InvalidUrl { field: String, value: String },

    // Queue errors
    #[error("Episode index {index} is out of range for a queue of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Episode duration {duration}s is displayed as {found:?}, expected {expected:?}")]
    InconsistentDuration {
        duration: u64,
        found: String,
        expected: String,
    },

    // IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PodcastrError>;
