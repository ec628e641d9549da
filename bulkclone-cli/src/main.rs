//! Bulkclone CLI - Clone every repository of a GitHub user or organization

mod commands;
mod console;

use bulkclone_core::{Config, ConfigOverrides};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::CloneArgs;

/// Bulkclone: clone all repositories of a GitHub account in parallel
#[derive(Parser, Debug)]
#[command(name = "bulkclone")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to gh executable (overrides config and env)
    #[arg(long, global = true, env = "BULKCLONE_GH_PATH")]
    gh_path: Option<String>,

    /// Path to git executable (overrides config and env)
    #[arg(long, global = true, env = "BULKCLONE_GIT_PATH")]
    git_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Clone every repository of an owner
    #[command(visible_alias = "c")]
    Clone(CloneArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let mut overrides = ConfigOverrides {
        gh_path: cli.gh_path.clone(),
        git_path: cli.git_path.clone(),
        ..Default::default()
    };
    if let Some(Commands::Clone(args)) = &cli.command {
        args.apply_overrides(&mut overrides);
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(overrides)?;

    if cli.verbose {
        tracing::info!(
            tool = %config.clone.tool,
            program = %config.clone.program(),
            backend = ?config.listing.backend,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("bulkclone {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Clone(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Config) => {
            println!("Bulkclone Configuration");
            println!("=======================");
            println!();
            println!("Clone Settings:");
            println!("  tool: {}", config.clone.tool);
            println!("  gh_path: {}", config.clone.gh_path);
            println!("  git_path: {}", config.clone.git_path);
            println!(
                "  concurrency: {}",
                config
                    .clone
                    .concurrency
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| format!("(default: {})", bulkclone_core::default_concurrency()))
            );
            println!("  prune: {}", config.clone.prune);
            println!("  workspace: {}", config.clone.workspace);
            println!();
            println!("Listing Settings:");
            println!("  backend: {:?}", config.listing.backend);
            println!(
                "  api_base_url: {}",
                config.listing.api_base_url.as_deref().unwrap_or("(default)")
            );
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Bulkclone - Clone every repository of a GitHub account");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
