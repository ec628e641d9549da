//! Clone command - Clone every repository of a user or organization

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use bulkclone_core::{
    default_remover, CloneOptions, CloneOrchestrator, CloneTool, Config, ConfigOverrides,
    ListingBackend, ProcessExecutor,
};
use clap::builder::RangedU64ValueParser;
use clap::Args;

use crate::console::ConsoleReporter;

/// Arguments for the clone command
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// User or organization whose repositories to clone
    #[arg(required = true)]
    pub owner: String,

    /// Destination folder (defaults to the owner's login)
    pub destination: Option<PathBuf>,

    /// Clone at most this many repositories
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Number of simultaneous clones (defaults to CPU count - 1)
    #[arg(short = 'j', long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub concurrency: Option<usize>,

    /// Delete folders of repositories that no longer exist on the account
    #[arg(long)]
    pub prune: bool,

    /// Tool used to clone (gh or git)
    #[arg(long)]
    pub tool: Option<CloneTool>,

    /// Where the repository list comes from (gh or api)
    #[arg(long)]
    pub backend: Option<ListingBackend>,

    /// Do not write a .code-workspace file
    #[arg(long)]
    pub no_workspace: bool,
}

impl CloneArgs {
    /// Copy configuration-level flags into `overrides`
    pub fn apply_overrides(&self, overrides: &mut ConfigOverrides) {
        overrides.tool = self.tool;
        overrides.backend = self.backend;
        overrides.concurrency = self.concurrency;
    }

    /// Per-invocation options from the flags and the loaded configuration
    pub fn options(&self, config: &Config) -> CloneOptions {
        let mut options = CloneOptions::from_config(config);
        options.target_folder = self.destination.clone();
        options.limit = self.limit;
        options.prune |= self.prune;
        options.workspace &= !self.no_workspace;
        options
    }

    /// Execute the clone command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let options = self.options(config);

        tracing::info!(
            owner = %self.owner,
            target = ?options.target_folder,
            limit = ?options.limit,
            concurrency = options.concurrency,
            prune = options.prune,
            "Starting bulkclone run"
        );

        let lister = bulkclone_github::lister_for(config)?;
        let executor = Arc::new(ProcessExecutor::new(
            config.clone.tool,
            config.clone.program(),
        ));
        let remover = default_remover();
        let reporter = ConsoleReporter;

        let orchestrator =
            CloneOrchestrator::new(lister.as_ref(), executor, remover.as_ref(), &reporter);

        println!(
            "Cloning repositories of {} with {} parallel job(s)...",
            self.owner, options.concurrency
        );

        let summary = orchestrator
            .run(&self.owner, &options)
            .await
            .with_context(|| format!("Failed to clone repositories of '{}'", self.owner))?;

        tracing::debug!(?summary, "bulkclone run finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        args: CloneArgs,
    }

    fn parse(argv: &[&str]) -> Result<CloneArgs, clap::Error> {
        let mut full = vec!["bulkclone"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).map(|cli| cli.args)
    }

    #[test]
    fn test_parse_minimal() {
        let args = parse(&["octo"]).unwrap();
        assert_eq!(args.owner, "octo");
        assert!(args.destination.is_none());
        assert!(!args.prune);
    }

    #[test]
    fn test_parse_all_flags() {
        let args = parse(&[
            "octo", "mirror", "--limit", "5", "-j", "3", "--prune", "--tool", "git", "--backend",
            "api", "--no-workspace",
        ])
        .unwrap();
        assert_eq!(args.destination, Some(PathBuf::from("mirror")));
        assert_eq!(args.limit, Some(5));
        assert_eq!(args.concurrency, Some(3));
        assert_eq!(args.tool, Some(CloneTool::Git));
        assert_eq!(args.backend, Some(ListingBackend::Api));

        let options = args.options(&Config::default());
        assert!(options.prune);
        assert!(!options.workspace);
        assert_eq!(options.target_folder, Some(PathBuf::from("mirror")));
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        assert!(parse(&["octo", "-j", "0"]).is_err());
    }

    #[test]
    fn test_zero_limit_reaches_the_core_check() {
        let args = parse(&["octo", "--limit", "0"]).unwrap();
        let options = args.options(&Config::default());
        assert!(options.listing_limit().is_err());
    }

    #[test]
    fn test_concurrency_flag_overrides_config() {
        let args = parse(&["octo", "-j", "9"]).unwrap();
        let mut overrides = ConfigOverrides::default();
        args.apply_overrides(&mut overrides);

        let mut config = Config::default();
        config.clone.concurrency = Some(2);
        let config = config.with_cli_overrides(overrides);
        assert_eq!(args.options(&config).concurrency, 9);
    }
}
