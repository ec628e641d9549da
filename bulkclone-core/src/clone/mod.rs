//! Concurrent cloning
//!
//! This module provides the clone process executor, the bounded worker pool
//! and the orchestrator that drives a whole run.

mod executor;
mod orchestrator;
mod pool;

pub use executor::{CloneExecutor, CloneTool, JobFuture, JobOutput, ProcessExecutor};
pub use orchestrator::{CloneOrchestrator, CloneSummary};
pub use pool::{JobOutcome, JobResult, WorkerPool};
