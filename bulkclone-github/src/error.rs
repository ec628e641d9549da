//! Error types for GitHub listing setup

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a listing backend
#[derive(Error, Debug)]
pub enum Error {
    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Configuration error from the core crate
    #[error(transparent)]
    Core(#[from] bulkclone_core::Error),
}
