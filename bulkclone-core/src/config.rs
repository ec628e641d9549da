//! Configuration management for bulkclone
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (BULKCLONE_*)
//! 3. Config file (~/.config/bulkclone/config.toml)
//! 4. Default values

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clone::CloneTool;
use crate::{Error, Result};

/// Where the repository list comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingBackend {
    /// `gh repo list`
    #[default]
    Gh,
    /// The GitHub REST API, authenticated with a token
    Api,
}

impl std::str::FromStr for ListingBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gh" => Ok(Self::Gh),
            "api" => Ok(Self::Api),
            other => Err(format!("unknown listing backend '{}', expected gh or api", other)),
        }
    }
}

/// Clone-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CloneSettings {
    /// Tool used to clone
    pub tool: CloneTool,

    /// Path to the gh executable
    pub gh_path: String,

    /// Path to the git executable
    pub git_path: String,

    /// Number of simultaneous clones (defaults to CPU count - 1)
    pub concurrency: Option<usize>,

    /// Remove folders of repositories that no longer exist
    pub prune: bool,

    /// Write a .code-workspace file after cloning
    pub workspace: bool,
}

impl Default for CloneSettings {
    fn default() -> Self {
        Self {
            tool: CloneTool::Gh,
            gh_path: "gh".to_string(),
            git_path: "git".to_string(),
            concurrency: None,
            prune: false,
            workspace: true,
        }
    }
}

impl CloneSettings {
    /// Executable for the configured tool
    pub fn program(&self) -> &str {
        match self.tool {
            CloneTool::Gh => &self.gh_path,
            CloneTool::Git => &self.git_path,
        }
    }
}

/// Listing-related configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingSettings {
    /// Backend used to fetch the repository list
    pub backend: ListingBackend,

    /// Base URL of the REST API (GitHub Enterprise)
    pub api_base_url: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Clone configuration
    pub clone: CloneSettings,

    /// Listing configuration
    pub listing: ListingSettings,
}

/// CLI flags that override the configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub tool: Option<CloneTool>,
    pub backend: Option<ListingBackend>,
    pub gh_path: Option<String>,
    pub git_path: Option<String>,
    pub concurrency: Option<usize>,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/bulkclone/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bulkclone").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - BULKCLONE_TOOL: gh or git
    /// - BULKCLONE_GH_PATH: Path to gh executable
    /// - BULKCLONE_GIT_PATH: Path to git executable
    /// - BULKCLONE_CONCURRENCY: Number of simultaneous clones
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(tool) = var("BULKCLONE_TOOL") {
            self.clone.tool = tool.parse().map_err(Error::Config)?;
        }

        if let Some(path) = var("BULKCLONE_GH_PATH") {
            self.clone.gh_path = path;
        }

        if let Some(path) = var("BULKCLONE_GIT_PATH") {
            self.clone.git_path = path;
        }

        if let Some(value) = var("BULKCLONE_CONCURRENCY") {
            let n = value.trim().parse::<usize>().map_err(|_| {
                Error::Config(format!("BULKCLONE_CONCURRENCY must be a number, got '{}'", value))
            })?;
            self.clone.concurrency = Some(n);
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(tool) = overrides.tool {
            self.clone.tool = tool;
        }

        if let Some(backend) = overrides.backend {
            self.listing.backend = backend;
        }

        if let Some(path) = overrides.gh_path {
            self.clone.gh_path = path;
        }

        if let Some(path) = overrides.git_path {
            self.clone.git_path = path;
        }

        if let Some(n) = overrides.concurrency {
            self.clone.concurrency = Some(n);
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(overrides: ConfigOverrides) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()?
            .with_cli_overrides(overrides))
    }
}

/// Settings for one `clone` invocation, read-only once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneOptions {
    /// Destination folder; the owner login of the first repository when unset
    pub target_folder: Option<PathBuf>,

    /// Maximum number of repositories to fetch
    pub limit: Option<usize>,

    /// Number of simultaneous clone processes
    pub concurrency: usize,

    /// Remove folders of repositories that no longer exist
    pub prune: bool,

    /// Write a .code-workspace file after cloning
    pub workspace: bool,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            target_folder: None,
            limit: None,
            concurrency: default_concurrency(),
            prune: false,
            workspace: true,
        }
    }
}

impl CloneOptions {
    /// Options seeded from the configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            concurrency: config
                .clone
                .concurrency
                .unwrap_or_else(default_concurrency)
                .max(1),
            prune: config.clone.prune,
            workspace: config.clone.workspace,
            ..Self::default()
        }
    }

    /// Validated listing limit
    ///
    /// A limit of zero is rejected.
    pub fn listing_limit(&self) -> Result<Option<NonZeroUsize>> {
        match self.limit {
            None => Ok(None),
            Some(n) => NonZeroUsize::new(n).map(Some).ok_or(Error::InvalidLimit),
        }
    }
}

/// One less than the number of logical CPUs, at least 1
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}
