//! Bounded pool of clone jobs
//!
//! The pool runs at most `capacity` clone processes at once. Work submitted
//! while every slot is busy waits in a FIFO queue and is launched as soon as
//! a running job finishes. Completions are delivered in the order the
//! processes exit, not the order they were submitted.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;

use super::executor::{CloneExecutor, JobOutput};
use crate::repository::Repository;
use crate::{Error, Result};

/// Classification of a finished clone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Exit code 0
    Cloned,
    /// Exit code 1, the tool reported why on stderr
    Failed { stderr: String },
    /// Any other exit code, or termination by signal
    Unexpected { code: Option<i32>, stderr: String },
}

impl JobOutcome {
    /// Classify a finished process
    pub fn classify(output: &JobOutput) -> Self {
        match output.code {
            Some(0) => Self::Cloned,
            Some(1) => Self::Failed {
                stderr: output.stderr.trim().to_string(),
            },
            code => Self::Unexpected {
                code,
                stderr: output.stderr.trim().to_string(),
            },
        }
    }
}

/// Result of one job, read exactly once through [`WorkerPool::next`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobResult {
    /// The repository the job cloned
    pub repository: Repository,
    /// How the job ended
    pub outcome: JobOutcome,
    /// Everything the process wrote
    pub output: JobOutput,
}

impl JobResult {
    /// Whether the clone succeeded
    pub fn success(&self) -> bool {
        self.outcome == JobOutcome::Cloned
    }
}

/// Bounded set of in-flight clone jobs plus the queue that refills it
pub struct WorkerPool {
    executor: Arc<dyn CloneExecutor>,
    workdir: PathBuf,
    capacity: usize,
    queue: VecDeque<Repository>,
    running: JoinSet<(Repository, std::io::Result<JobOutput>)>,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workdir", &self.workdir)
            .field("capacity", &self.capacity)
            .field("queued", &self.queue.len())
            .field("running", &self.running.len())
            .finish_non_exhaustive()
    }
}

impl WorkerPool {
    /// Create a pool cloning into `workdir` with at most `capacity` jobs running
    ///
    /// A capacity of zero is raised to one.
    pub fn new(executor: Arc<dyn CloneExecutor>, workdir: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            executor,
            workdir: workdir.into(),
            capacity: capacity.max(1),
            queue: VecDeque::new(),
            running: JoinSet::new(),
        }
    }

    /// Maximum number of simultaneously running jobs
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of jobs currently running
    pub fn running(&self) -> usize {
        self.running.len()
    }

    /// Number of repositories waiting for a free slot
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is running and nothing is queued
    pub fn is_idle(&self) -> bool {
        self.running.is_empty() && self.queue.is_empty()
    }

    /// Submit a repository
    ///
    /// Launches immediately if a slot is free, otherwise queues it behind
    /// earlier submissions. Fails only if the process could not be started.
    pub fn submit(&mut self, repo: Repository) -> Result<()> {
        self.queue.push_back(repo);
        self.fill()
    }

    /// Drop every queued repository without launching it
    ///
    /// Running jobs are unaffected and can still be awaited with
    /// [`WorkerPool::next`].
    pub fn cancel_queued(&mut self) -> Vec<Repository> {
        self.queue.drain(..).collect()
    }

    /// Wait for the next job to finish
    ///
    /// Free slots are refilled from the queue before waiting. Returns
    /// `Ok(None)` once the pool holds no jobs, without blocking.
    pub async fn next(&mut self) -> Result<Option<JobResult>> {
        self.fill()?;

        let Some(joined) = self.running.join_next().await else {
            return Ok(None);
        };

        let (repository, waited) = joined
            .map_err(|e| Error::Other(format!("Clone task ended abnormally: {}", e)))?;

        // A wait error after a successful spawn is reported like an unclassified exit.
        let output = waited.unwrap_or_else(|e| JobOutput {
            code: None,
            stdout: String::new(),
            stderr: e.to_string(),
        });
        let outcome = JobOutcome::classify(&output);

        tracing::debug!(
            repo = %repository,
            code = ?output.code,
            running = self.running.len(),
            queued = self.queue.len(),
            "clone job finished"
        );

        Ok(Some(JobResult {
            repository,
            outcome,
            output,
        }))
    }

    fn fill(&mut self) -> Result<()> {
        while self.running.len() < self.capacity {
            let Some(repo) = self.queue.pop_front() else {
                break;
            };

            let job = self
                .executor
                .launch(&repo, &self.workdir)
                .map_err(|source| Error::Launch {
                    repo: repo.full_name.clone(),
                    source,
                })?;

            tracing::debug!(repo = %repo, running = self.running.len() + 1, "clone job launched");
            self.running.spawn(async move { (repo, job.await) });
        }
        Ok(())
    }
}
