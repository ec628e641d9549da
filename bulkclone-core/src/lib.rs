//! Bulkclone Core - Clone every repository of a GitHub account
//!
//! This crate provides the bounded clone scheduler, the directory
//! reconciler that prunes folders of deleted repositories, and the
//! configuration shared by the listing backends and the CLI.

pub mod clone;
pub mod config;
pub mod error;
pub mod prune;
pub mod report;
pub mod repository;
pub mod secrets;
pub mod workspace;

pub use clone::{
    CloneExecutor, CloneOrchestrator, CloneSummary, CloneTool, JobOutcome, JobResult,
    ProcessExecutor, WorkerPool,
};
pub use config::{default_concurrency, CloneOptions, Config, ConfigOverrides, ListingBackend};
pub use error::{Error, Result};
pub use prune::{default_remover, DeleteErrorKind, PruneReport, Reconciler, RecursiveDelete};
pub use report::{summary_line, Event, Reporter, SkipReason};
pub use repository::{ListError, Repository, RepositoryLister};
pub use secrets::Secrets;
