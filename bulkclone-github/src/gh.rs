//! Repository listing through the GitHub CLI

use std::num::NonZeroUsize;
use std::process::Stdio;

use async_trait::async_trait;
use bulkclone_core::{ListError, Repository, RepositoryLister};
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

/// Limit passed to `gh` when the caller wants every repository
const UNBOUNDED_LIMIT: usize = 1_000_000;

/// Fields requested with `--json`
const JSON_FIELDS: &str = "name,nameWithOwner,owner";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GhRepo {
    name: String,
    name_with_owner: String,
    owner: GhOwner,
}

#[derive(Debug, Deserialize)]
struct GhOwner {
    login: String,
}

impl From<GhRepo> for Repository {
    fn from(repo: GhRepo) -> Self {
        Self {
            name: repo.name,
            full_name: repo.name_with_owner,
            owner_login: repo.owner.login,
        }
    }
}

/// Lists repositories with `gh repo list <owner> --json ...`
#[derive(Debug, Clone)]
pub struct GhCliLister {
    program: String,
}

impl GhCliLister {
    /// Lister running `program` (a path or a name in PATH)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, owner: &str, limit: Option<NonZeroUsize>) -> Command {
        let limit = limit.map_or(UNBOUNDED_LIMIT, NonZeroUsize::get);
        let mut cmd = Command::new(&self.program);
        cmd.arg("repo")
            .arg("list")
            .arg(owner)
            .arg("--json")
            .arg(JSON_FIELDS)
            .arg("--limit")
            .arg(limit.to_string())
            .stdin(Stdio::null());
        cmd
    }
}

impl Default for GhCliLister {
    fn default() -> Self {
        Self::new("gh")
    }
}

#[async_trait]
impl RepositoryLister for GhCliLister {
    async fn list(
        &self,
        owner: &str,
        limit: Option<NonZeroUsize>,
    ) -> Result<Vec<Repository>, ListError> {
        debug!(owner, ?limit, program = %self.program, "listing repositories with gh");

        let output = self.command(owner, limit).output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ListError::Launch(format!(
                    "'{}' not found. Is the GitHub CLI installed?",
                    self.program
                ))
            } else {
                ListError::Launch(e.to_string())
            }
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        interpret(owner, output.status.code(), &output.stdout, stderr.trim())
    }
}

/// Map a finished `gh repo list` to repositories or a classified error
///
/// `gh` exits 1 on request errors, 2 when cancelled and 4 when no
/// authentication is configured.
fn interpret(
    owner: &str,
    code: Option<i32>,
    stdout: &[u8],
    stderr: &str,
) -> Result<Vec<Repository>, ListError> {
    match code {
        Some(0) => parse_listing(stdout),
        Some(1) => Err(ListError::UnknownOwner {
            owner: owner.to_string(),
            message: stderr.to_string(),
        }),
        Some(2) => Err(ListError::Cancelled),
        Some(4) => Err(ListError::NotAuthenticated(stderr.to_string())),
        code => Err(ListError::Unexpected(format!(
            "gh exited with {:?}: {}",
            code, stderr
        ))),
    }
}

fn parse_listing(stdout: &[u8]) -> Result<Vec<Repository>, ListError> {
    let repos: Vec<GhRepo> = serde_json::from_slice(stdout)
        .map_err(|e| ListError::Unexpected(format!("Failed to parse gh output: {}", e)))?;
    Ok(repos.into_iter().map(Repository::from).collect())
}
