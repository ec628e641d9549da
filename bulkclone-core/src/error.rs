//! Error types for bulkclone

use std::path::PathBuf;

use thiserror::Error;

use crate::repository::ListError;

/// Result type alias for bulkclone operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for bulkclone operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A limit of zero was requested
    #[error("Invalid limit: 0. The limit must be at least 1")]
    InvalidLimit,

    /// The repository listing service failed
    #[error(transparent)]
    Listing(#[from] ListError),

    /// The owner exists but has nothing to clone
    #[error("'{0}' has no repositories to clone")]
    NoRepositories(String),

    /// The target folder could not be created
    #[error("Failed to create target folder {path}: {source}")]
    CreateTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target path exists but is not a directory
    #[error("Target {0} exists and is not a directory")]
    TargetNotADirectory(PathBuf),

    /// The target folder could not be opened for reading
    #[error("Failed to read target folder {path}: {source}")]
    ReadTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A clone process could not be started
    #[error("Failed to start clone of {repo}: {source}")]
    Launch {
        repo: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
