//! Repository listing through the GitHub REST API using octocrab

use std::num::NonZeroUsize;

use async_trait::async_trait;
use bulkclone_core::{ListError, Repository, RepositoryLister, Secrets};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Result};

/// GitHub's maximum page size
const PER_PAGE: usize = 100;

#[derive(Debug, Deserialize)]
struct ApiRepo {
    name: String,
    full_name: String,
    owner: ApiOwner,
}

#[derive(Debug, Deserialize)]
struct ApiOwner {
    login: String,
}

impl From<ApiRepo> for Repository {
    fn from(repo: ApiRepo) -> Self {
        Self {
            name: repo.name,
            full_name: repo.full_name,
            owner_login: repo.owner.login,
        }
    }
}

#[derive(Debug, Serialize)]
struct PageParams {
    per_page: usize,
    page: u32,
}

/// Lists repositories with `GET /users/{owner}/repos`
///
/// The endpoint serves organizations as well as users.
pub struct ApiLister {
    client: Octocrab,
}

impl ApiLister {
    /// Create a lister authenticated with `token`
    ///
    /// `base_url` points at a GitHub Enterprise API root when set.
    pub fn new(token: String, base_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token);
        if let Some(url) = base_url {
            builder = builder
                .base_uri(url)
                .map_err(|e| Error::Auth(format!("Invalid API base URL {}: {}", url, e)))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!("Created GitHub API client");
        Ok(Self { client })
    }

    /// Create a lister with the token from the environment or secrets file
    pub fn from_secrets(base_url: Option<&str>) -> Result<Self> {
        let secrets = Secrets::load()?;
        let token = secrets.github_token().ok_or_else(|| {
            Error::Auth(
                "GitHub token not found. Set GITHUB_TOKEN environment variable \
                 or add token to ~/.config/bulkclone/secrets.toml"
                    .to_string(),
            )
        })?;
        Self::new(token, base_url)
    }
}

impl std::fmt::Debug for ApiLister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiLister").finish_non_exhaustive()
    }
}

#[async_trait]
impl RepositoryLister for ApiLister {
    async fn list(
        &self,
        owner: &str,
        limit: Option<NonZeroUsize>,
    ) -> std::result::Result<Vec<Repository>, ListError> {
        let route = format!("/users/{}/repos", owner);
        let mut repos = Vec::new();
        let mut page = 1;

        loop {
            let params = PageParams {
                per_page: PER_PAGE,
                page,
            };
            let batch: Vec<ApiRepo> = self
                .client
                .get(&route, Some(&params))
                .await
                .map_err(|e| classify(owner, e))?;

            debug!(owner, page, count = batch.len(), "fetched repository page");
            let last_page = batch.len() < PER_PAGE;
            repos.extend(batch.into_iter().map(Repository::from));

            if let Some(limit) = limit {
                if repos.len() >= limit.get() {
                    repos.truncate(limit.get());
                    break;
                }
            }
            if last_page {
                break;
            }
            page += 1;
        }

        Ok(repos)
    }
}

fn classify(owner: &str, err: octocrab::Error) -> ListError {
    match err {
        octocrab::Error::GitHub { source, .. } => classify_message(owner, &source.message),
        other => ListError::Unexpected(other.to_string()),
    }
}

fn classify_message(owner: &str, message: &str) -> ListError {
    if message.contains("Not Found") {
        ListError::UnknownOwner {
            owner: owner.to_string(),
            message: format!("'{}' not found or not accessible", owner),
        }
    } else if message.contains("Bad credentials") || message.contains("Requires authentication") {
        ListError::NotAuthenticated("Invalid GitHub token".to_string())
    } else {
        ListError::Unexpected(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_messages() {
        assert!(matches!(
            classify_message("ghost", "Not Found"),
            ListError::UnknownOwner { ref owner, .. } if owner == "ghost"
        ));
        assert!(matches!(
            classify_message("o", "Bad credentials"),
            ListError::NotAuthenticated(_)
        ));
        assert!(matches!(
            classify_message("o", "API rate limit exceeded"),
            ListError::Unexpected(_)
        ));
    }

    #[test]
    fn test_api_repo_conversion() {
        let json = r#"{"name": "hello", "full_name": "octo/hello", "owner": {"login": "octo", "id": 1}, "private": false}"#;
        let repo: ApiRepo = serde_json::from_str(json).unwrap();
        assert_eq!(Repository::from(repo), Repository::new("octo", "hello"));
    }

    #[test]
    fn test_page_params_serialize() {
        let params = PageParams {
            per_page: PER_PAGE,
            page: 3,
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"per_page": 100, "page": 3})
        );
    }
}
