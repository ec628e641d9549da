//! GitHub token lookup
//!
//! Only the REST listing backend needs a token; the `gh` backend relies on
//! the CLI's own login. Lookup order:
//! 1. `GITHUB_TOKEN`, then `GH_TOKEN`
//! 2. `~/.config/bulkclone/secrets.toml` (`[github] token = "..."`), which
//!    must not be readable by group or others on Unix

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Contents of the secrets file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Secrets {
    pub github: GitHubSecrets,
}

/// `[github]` table of the secrets file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GitHubSecrets {
    pub token: Option<String>,
}

impl Secrets {
    /// Load secrets from the default location, empty if there is no file
    pub fn load() -> Result<Self> {
        match Self::default_secrets_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load secrets from `path`, refusing files others can read
    pub fn load_from_file(path: &Path) -> Result<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mode = std::fs::metadata(path).map_err(Error::Io)?.permissions().mode();
            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))
    }

    /// `~/.config/bulkclone/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bulkclone").join("secrets.toml"))
    }

    /// The token to use, preferring the environment over the file
    pub fn github_token(&self) -> Option<String> {
        self.github_token_from(|key| std::env::var(key).ok())
    }

    fn github_token_from(&self, var: impl Fn(&str) -> Option<String>) -> Option<String> {
        for key in TOKEN_VARS {
            if let Some(token) = var(key).map(|t| t.trim().to_string()) {
                if !token.is_empty() {
                    debug!(source = key, "Using GitHub token from environment");
                    return Some(token);
                }
            }
        }

        self.github
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                debug!("Using GitHub token from secrets file");
                t.to_string()
            })
    }
}
