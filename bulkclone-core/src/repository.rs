//! Repository descriptors and the listing contract

use std::num::NonZeroUsize;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A remote repository as returned by the listing service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Short name, used as the local folder name
    pub name: String,
    /// `<owner>/<name>`, passed to the clone tool
    pub full_name: String,
    /// Login of the owning account
    pub owner_login: String,
}

impl Repository {
    /// Build a descriptor from an owner and a short name
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        let owner_login = owner.into();
        let name = name.into();
        Self {
            full_name: format!("{}/{}", owner_login, name),
            name,
            owner_login,
        }
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// Failure classes of the listing service
///
/// Each class maps to its own user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// The owner does not exist or the request was rejected
    #[error("Could not list repositories of '{owner}': {message}")]
    UnknownOwner { owner: String, message: String },

    /// The user or environment cancelled the request
    #[error("Listing repositories was cancelled")]
    Cancelled,

    /// No usable credentials
    #[error("Not authenticated with GitHub: {0}. Run `gh auth login` or set GITHUB_TOKEN")]
    NotAuthenticated(String),

    /// The listing tool could not be started
    #[error("Failed to start the repository listing: {0}")]
    Launch(String),

    /// Anything the listing service did not classify
    #[error("Unexpected error while listing repositories: {0}")]
    Unexpected(String),
}

/// Source of the repository set for an owner
#[async_trait]
pub trait RepositoryLister: Send + Sync {
    /// List the repositories owned by `owner`, at most `limit` of them
    async fn list(
        &self,
        owner: &str,
        limit: Option<NonZeroUsize>,
    ) -> std::result::Result<Vec<Repository>, ListError>;
}
