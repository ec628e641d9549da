//! End-to-end control loop of a `clone` run

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::executor::CloneExecutor;
use super::pool::{JobOutcome, JobResult, WorkerPool};
use crate::config::CloneOptions;
use crate::prune::{PruneReport, Reconciler, RecursiveDelete};
use crate::report::{Event, Reporter, SkipReason};
use crate::repository::{Repository, RepositoryLister};
use crate::workspace::{workspace_path, write_workspace};
use crate::{Error, Result};

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneSummary {
    /// Folder the repositories were cloned into
    pub target: PathBuf,
    /// Whether the run created the target folder
    pub created_target: bool,
    /// Number of repositories fetched
    pub total: usize,
    /// Clones that succeeded
    pub cloned: usize,
    /// Repositories left alone because their folder was occupied
    pub skipped: usize,
    /// Clones that failed
    pub failed: usize,
    /// Prune outcome, when pruning ran
    pub pruned: Option<PruneReport>,
    /// Path of the workspace manifest, when it was written
    pub workspace: Option<PathBuf>,
}

impl CloneSummary {
    /// True when every fetched repository was cloned
    pub fn all_cloned(&self) -> bool {
        self.cloned == self.total
    }
}

/// Occupancy of a repository's target folder
#[derive(Debug, Clone, PartialEq, Eq)]
enum FolderState {
    Missing,
    Empty,
    Occupied(SkipReason),
}

fn folder_state(path: &Path) -> FolderState {
    match std::fs::symlink_metadata(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => FolderState::Missing,
        Ok(meta) if meta.is_dir() => match std::fs::read_dir(path) {
            Ok(mut entries) => {
                if entries.next().is_none() {
                    FolderState::Empty
                } else {
                    FolderState::Occupied(SkipReason::FolderNotEmpty)
                }
            }
            Err(_) => FolderState::Occupied(SkipReason::FolderNotEmpty),
        },
        Ok(_) => FolderState::Occupied(SkipReason::NotADirectory),
        // Unreadable paths are never cloned over.
        Err(_) => FolderState::Occupied(SkipReason::FolderNotEmpty),
    }
}

/// The configured target folder, or the owner login of the first repository
fn resolve_target(options: &CloneOptions, first: &Repository) -> PathBuf {
    options
        .target_folder
        .clone()
        .unwrap_or_else(|| PathBuf::from(&first.owner_login))
}

/// Create `target` if needed, returning whether it was created
fn prepare_target(target: &Path) -> Result<bool> {
    match std::fs::metadata(target) {
        Ok(meta) if meta.is_dir() => Ok(false),
        Ok(_) => Err(Error::TargetNotADirectory(target.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => match std::fs::create_dir_all(target) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(source) => Err(Error::CreateTarget {
                path: target.to_path_buf(),
                source,
            }),
        },
        Err(source) => Err(Error::CreateTarget {
            path: target.to_path_buf(),
            source,
        }),
    }
}

/// Drives one `clone <owner> [destination]` invocation
///
/// Lists the owner's repositories, optionally prunes the target folder,
/// skips repositories whose folder is already occupied, and clones the rest
/// through a [`WorkerPool`].
pub struct CloneOrchestrator<'a> {
    lister: &'a dyn RepositoryLister,
    executor: Arc<dyn CloneExecutor>,
    remover: &'a dyn RecursiveDelete,
    reporter: &'a dyn Reporter,
}

impl<'a> CloneOrchestrator<'a> {
    pub fn new(
        lister: &'a dyn RepositoryLister,
        executor: Arc<dyn CloneExecutor>,
        remover: &'a dyn RecursiveDelete,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            lister,
            executor,
            remover,
            reporter,
        }
    }

    /// Run the whole clone flow for `owner`
    pub async fn run(&self, owner: &str, options: &CloneOptions) -> Result<CloneSummary> {
        // Rejected before any listing call.
        let limit = options.listing_limit()?;

        let repos = self.lister.list(owner, limit).await?;
        let Some(first) = repos.first() else {
            return Err(Error::NoRepositories(owner.to_string()));
        };
        tracing::info!(owner, count = repos.len(), "fetched repositories");

        let target = resolve_target(options, first);
        let created_target = prepare_target(&target)?;

        // Pruning finishes before any clone starts.
        let pruned = if options.prune && !created_target {
            Some(Reconciler::new(self.remover, self.reporter).prune(&repos, &target)?)
        } else {
            None
        };

        let (schedule, skipped) = self.build_schedule(&repos, &target);
        let (cloned, failed, launch_error) = self
            .clone_all(schedule, &target, options.concurrency)
            .await?;

        let total = repos.len();
        self.reporter.report(&Event::Summary { cloned, total });

        if let Some(err) = launch_error {
            return Err(err);
        }

        let workspace = if options.workspace {
            self.write_workspace(&repos, &target)
        } else {
            None
        };

        Ok(CloneSummary {
            target,
            created_target,
            total,
            cloned,
            skipped,
            failed,
            pruned,
            workspace,
        })
    }

    /// Repositories to clone, in fetched order, and how many were skipped
    fn build_schedule(&self, repos: &[Repository], target: &Path) -> (Vec<Repository>, usize) {
        let mut scheduled_names = HashSet::new();
        let mut schedule = Vec::with_capacity(repos.len());
        let mut skipped = 0;

        for repo in repos {
            let path = target.join(&repo.name);
            let reason = if !scheduled_names.insert(repo.name.as_str()) {
                Some(SkipReason::Duplicate)
            } else {
                match folder_state(&path) {
                    FolderState::Missing | FolderState::Empty => None,
                    FolderState::Occupied(reason) => Some(reason),
                }
            };

            match reason {
                Some(reason) => {
                    skipped += 1;
                    self.reporter.report(&Event::Skipped {
                        repo: repo.full_name.clone(),
                        path,
                        reason,
                    });
                }
                None => schedule.push(repo.clone()),
            }
        }

        (schedule, skipped)
    }

    /// Clone every scheduled repository, returning (cloned, failed, launch error)
    ///
    /// After a launch error nothing new is started, but jobs already running
    /// are still awaited and tallied.
    async fn clone_all(
        &self,
        schedule: Vec<Repository>,
        target: &Path,
        concurrency: usize,
    ) -> Result<(usize, usize, Option<Error>)> {
        if schedule.is_empty() {
            return Ok((0, 0, None));
        }

        let capacity = concurrency.min(schedule.len());
        tracing::info!(count = schedule.len(), capacity, "cloning repositories");

        let mut pool = WorkerPool::new(Arc::clone(&self.executor), target, capacity);
        let mut launch_error = None;
        for repo in schedule {
            if let Err(e) = pool.submit(repo) {
                launch_error = Some(e);
                break;
            }
        }

        let (mut cloned, mut failed) = (0, 0);
        loop {
            if launch_error.is_some() {
                let dropped = pool.cancel_queued();
                if !dropped.is_empty() {
                    tracing::warn!(count = dropped.len(), "not cloning remaining repositories after launch failure");
                }
            }

            match pool.next().await {
                Ok(Some(result)) => {
                    if result.success() {
                        cloned += 1;
                    } else {
                        failed += 1;
                    }
                    self.report_result(result);
                }
                Ok(None) => break,
                Err(e @ Error::Launch { .. }) => {
                    launch_error.get_or_insert(e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok((cloned, failed, launch_error))
    }

    fn report_result(&self, result: JobResult) {
        let repo = result.repository.full_name;
        let event = match result.outcome {
            JobOutcome::Cloned => Event::Cloned { repo },
            JobOutcome::Failed { stderr } => Event::CloneFailed { repo, stderr },
            JobOutcome::Unexpected { code, stderr } => Event::CloneUnexpected { repo, code, stderr },
        };
        self.reporter.report(&event);
    }

    fn write_workspace(&self, repos: &[Repository], target: &Path) -> Option<PathBuf> {
        match write_workspace(target, repos.iter().map(|r| r.name.as_str())) {
            Ok(path) => {
                self.reporter.report(&Event::WorkspaceWritten { path: path.clone() });
                Some(path)
            }
            Err(e) => {
                self.reporter.report(&Event::WorkspaceFailed {
                    path: workspace_path(target),
                    message: e.to_string(),
                });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::num::NonZeroUsize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::super::pool::testing::{Script, ScriptedExecutor};
    use super::*;
    use crate::prune::{DeleteError, NativeRemover};
    use crate::report::testing::RecordingReporter;
    use crate::repository::ListError;

    struct StaticLister {
        result: std::result::Result<Vec<Repository>, ListError>,
        calls: AtomicUsize,
        last_limit: Mutex<Option<NonZeroUsize>>,
    }

    impl StaticLister {
        fn repos(names: &[&str]) -> Self {
            Self::returning(Ok(names.iter().map(|n| Repository::new("octo", *n)).collect()))
        }

        fn returning(result: std::result::Result<Vec<Repository>, ListError>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
                last_limit: Mutex::new(None),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RepositoryLister for StaticLister {
        async fn list(
            &self,
            _owner: &str,
            limit: Option<NonZeroUsize>,
        ) -> std::result::Result<Vec<Repository>, ListError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_limit.lock().unwrap() = limit;
            self.result.clone()
        }
    }

    /// Counts removals and delegates to the native remover
    #[derive(Default)]
    struct CountingRemover {
        calls: AtomicUsize,
    }

    impl RecursiveDelete for CountingRemover {
        fn remove_dir_all(&self, path: &Path) -> std::result::Result<(), DeleteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            NativeRemover.remove_dir_all(path)
        }
    }

    fn options(target: &Path, concurrency: usize) -> CloneOptions {
        CloneOptions {
            target_folder: Some(target.to_path_buf()),
            limit: None,
            concurrency,
            prune: false,
            workspace: false,
        }
    }

    #[tokio::test]
    async fn test_fresh_folder_clones_everything_without_pruning() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("octo");
        let lister = StaticLister::repos(&["a", "b", "c"]);
        let exec = Arc::new(
            ScriptedExecutor::new()
                .script("a", Script::ok(20))
                .script("b", Script::ok(300))
                .script("c", Script::ok(10)),
        );
        let remover = CountingRemover::default();
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(&lister, exec.clone(), &remover, &reporter);

        let mut opts = options(&target, 2);
        opts.prune = true;
        let summary = orchestrator.run("octo", &opts).await.unwrap();

        assert!(summary.created_target);
        assert!(target.is_dir());
        assert_eq!((summary.cloned, summary.total), (3, 3));
        assert!(summary.all_cloned());
        assert!(summary.pruned.is_none());
        assert_eq!(remover.calls.load(Ordering::SeqCst), 0);

        assert_eq!(exec.peak(), 2);
        let timeline = exec.timeline();
        let pos = |e: &str| timeline.iter().position(|t| t == e).unwrap();
        assert!(pos("launch b") < pos("done a"));
        assert!(pos("done a") < pos("launch c"));

        assert_eq!(
            reporter.events().last(),
            Some(&Event::Summary { cloned: 3, total: 3 })
        );
    }

    #[tokio::test]
    async fn test_existing_folder_is_pruned_before_cloning() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("octo");
        fs::create_dir_all(target.join("z/src")).unwrap();
        fs::write(target.join("z/src/lib.rs"), "stale").unwrap();

        let lister = StaticLister::repos(&["a", "b"]);
        let exec = Arc::new(ScriptedExecutor::new());
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(&lister, exec, &NativeRemover, &reporter);

        let mut opts = options(&target, 4);
        opts.prune = true;
        let summary = orchestrator.run("octo", &opts).await.unwrap();

        assert!(!summary.created_target);
        assert!(!target.join("z").exists());
        assert_eq!(summary.pruned.unwrap().removed, vec![target.join("z")]);
        assert_eq!((summary.cloned, summary.total), (2, 2));

        let events = reporter.events();
        let pruned_at = events
            .iter()
            .position(|e| matches!(e, Event::Pruned { .. }))
            .unwrap();
        let first_clone = events
            .iter()
            .position(|e| matches!(e, Event::Cloned { .. }))
            .unwrap();
        assert!(pruned_at < first_clone);
    }

    #[tokio::test]
    async fn test_occupied_folder_is_skipped_and_counted_as_failure() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("octo");
        fs::create_dir_all(target.join("a")).unwrap();
        fs::write(target.join("a/local-work.txt"), "do not touch").unwrap();

        let lister = StaticLister::repos(&["a"]);
        let exec = Arc::new(ScriptedExecutor::new());
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(&lister, exec.clone(), &NativeRemover, &reporter);

        let summary = orchestrator.run("octo", &options(&target, 2)).await.unwrap();

        assert!(exec.launches().is_empty());
        assert_eq!((summary.cloned, summary.total, summary.skipped), (0, 1, 1));
        assert_eq!(
            fs::read_to_string(target.join("a/local-work.txt")).unwrap(),
            "do not touch"
        );

        let events = reporter.events();
        let skips: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, Event::Skipped { .. }))
            .collect();
        assert_eq!(
            skips,
            vec![&Event::Skipped {
                repo: "octo/a".to_string(),
                path: target.join("a"),
                reason: SkipReason::FolderNotEmpty,
            }]
        );
        assert_eq!(events.last(), Some(&Event::Summary { cloned: 0, total: 1 }));
    }

    #[tokio::test]
    async fn test_zero_limit_is_rejected_before_listing() {
        let temp = TempDir::new().unwrap();
        let lister = StaticLister::repos(&["a"]);
        let exec = Arc::new(ScriptedExecutor::new());
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(&lister, exec.clone(), &NativeRemover, &reporter);

        let mut opts = options(&temp.path().join("octo"), 2);
        opts.limit = Some(0);
        let err = orchestrator.run("octo", &opts).await.unwrap_err();

        assert!(matches!(err, Error::InvalidLimit));
        assert_eq!(lister.calls(), 0);
        assert!(exec.launches().is_empty());
        assert!(!temp.path().join("octo").exists());
        assert!(reporter.events().is_empty());
    }

    #[tokio::test]
    async fn test_failed_clone_is_tallied_and_the_rest_continue() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("octo");
        let lister = StaticLister::repos(&["a", "b", "c"]);
        let exec = Arc::new(
            ScriptedExecutor::new().script("a", Script::exit(1, "repository not found\n", 5)),
        );
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(&lister, exec.clone(), &NativeRemover, &reporter);

        let summary = orchestrator.run("octo", &options(&target, 1)).await.unwrap();

        assert_eq!(exec.launches(), vec!["a", "b", "c"]);
        assert_eq!((summary.cloned, summary.failed, summary.total), (2, 1, 3));
        assert!(reporter.events().contains(&Event::CloneFailed {
            repo: "octo/a".to_string(),
            stderr: "repository not found".to_string(),
        }));
        assert_eq!(
            reporter.events().last(),
            Some(&Event::Summary { cloned: 2, total: 3 })
        );
    }

    #[tokio::test]
    async fn test_unexpected_exit_code_is_reported_with_code() {
        let temp = TempDir::new().unwrap();
        let lister = StaticLister::repos(&["a"]);
        let exec = Arc::new(ScriptedExecutor::new().script("a", Script::exit(128, "fatal", 5)));
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(&lister, exec, &NativeRemover, &reporter);

        let summary = orchestrator
            .run("octo", &options(&temp.path().join("octo"), 1))
            .await
            .unwrap();

        assert_eq!(summary.failed, 1);
        assert!(reporter.events().contains(&Event::CloneUnexpected {
            repo: "octo/a".to_string(),
            code: Some(128),
            stderr: "fatal".to_string(),
        }));
    }

    #[tokio::test]
    async fn test_listing_errors_abort_before_scheduling() {
        let temp = TempDir::new().unwrap();
        let lister = StaticLister::returning(Err(ListError::NotAuthenticated("no token".into())));
        let exec = Arc::new(ScriptedExecutor::new());
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(&lister, exec.clone(), &NativeRemover, &reporter);

        let err = orchestrator
            .run("octo", &options(&temp.path().join("octo"), 2))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Listing(ListError::NotAuthenticated(_))));
        assert!(exec.launches().is_empty());
        assert!(!temp.path().join("octo").exists());
    }

    #[tokio::test]
    async fn test_owner_without_repositories() {
        let lister = StaticLister::returning(Ok(Vec::new()));
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(
            &lister,
            Arc::new(ScriptedExecutor::new()),
            &NativeRemover,
            &reporter,
        );

        let err = orchestrator
            .run("empty", &CloneOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoRepositories(ref owner) if owner == "empty"));
    }

    #[tokio::test]
    async fn test_limit_is_forwarded_to_lister() {
        let temp = TempDir::new().unwrap();
        let lister = StaticLister::repos(&["a"]);
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(
            &lister,
            Arc::new(ScriptedExecutor::new()),
            &NativeRemover,
            &reporter,
        );

        let mut opts = options(&temp.path().join("octo"), 1);
        opts.limit = Some(7);
        orchestrator.run("octo", &opts).await.unwrap();
        assert_eq!(*lister.last_limit.lock().unwrap(), NonZeroUsize::new(7));
    }

    #[tokio::test]
    async fn test_target_that_is_a_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("octo");
        fs::write(&target, "file").unwrap();
        let lister = StaticLister::repos(&["a"]);
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(
            &lister,
            Arc::new(ScriptedExecutor::new()),
            &NativeRemover,
            &reporter,
        );

        let err = orchestrator.run("octo", &options(&target, 1)).await.unwrap_err();
        assert!(matches!(err, Error::TargetNotADirectory(_)));
    }

    #[tokio::test]
    async fn test_empty_existing_folder_is_cloned_into() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("octo");
        fs::create_dir_all(target.join("a")).unwrap();
        let lister = StaticLister::repos(&["a"]);
        let exec = Arc::new(ScriptedExecutor::new());
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(&lister, exec.clone(), &NativeRemover, &reporter);

        let summary = orchestrator.run("octo", &options(&target, 1)).await.unwrap();
        assert_eq!(exec.launches(), vec!["a"]);
        assert_eq!(summary.cloned, 1);
    }

    #[tokio::test]
    async fn test_duplicate_names_are_cloned_once() {
        let temp = TempDir::new().unwrap();
        let lister = StaticLister::returning(Ok(vec![
            Repository::new("octo", "a"),
            Repository::new("octo", "a"),
        ]));
        let exec = Arc::new(ScriptedExecutor::new());
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(&lister, exec.clone(), &NativeRemover, &reporter);

        let summary = orchestrator
            .run("octo", &options(&temp.path().join("octo"), 4))
            .await
            .unwrap();
        assert_eq!(exec.launches(), vec!["a"]);
        assert_eq!((summary.cloned, summary.skipped, summary.total), (1, 1, 2));
    }

    #[tokio::test]
    async fn test_pruning_keeps_occupied_repository_folders() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("octo");
        fs::create_dir_all(target.join("a")).unwrap();
        fs::write(target.join("a/file"), "x").unwrap();
        fs::create_dir_all(target.join("gone")).unwrap();
        let lister = StaticLister::repos(&["a", "b"]);
        let exec = Arc::new(ScriptedExecutor::new());
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(&lister, exec.clone(), &NativeRemover, &reporter);

        let mut opts = options(&target, 2);
        opts.prune = true;
        let summary = orchestrator.run("octo", &opts).await.unwrap();

        assert!(target.join("a/file").exists());
        assert!(!target.join("gone").exists());
        assert_eq!(exec.launches(), vec!["b"]);
        assert_eq!((summary.cloned, summary.skipped), (1, 1));
    }

    #[tokio::test]
    async fn test_launch_failure_aborts_the_run() {
        let temp = TempDir::new().unwrap();
        let lister = StaticLister::repos(&["a"]);
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(
            &lister,
            Arc::new(ScriptedExecutor::new().fail_launch("a")),
            &NativeRemover,
            &reporter,
        );

        let err = orchestrator
            .run("octo", &options(&temp.path().join("octo"), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
    }

    #[tokio::test]
    async fn test_launch_failure_still_drains_running_jobs() {
        let temp = TempDir::new().unwrap();
        let lister = StaticLister::repos(&["a", "b", "c"]);
        let exec = Arc::new(
            ScriptedExecutor::new()
                .script("a", Script::ok(10))
                .fail_launch("b"),
        );
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(&lister, exec.clone(), &NativeRemover, &reporter);

        let err = orchestrator
            .run("octo", &options(&temp.path().join("octo"), 2))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Launch { ref repo, .. } if repo == "octo/b"));
        assert_eq!(exec.timeline(), vec!["launch a", "done a"]);
        assert_eq!(
            reporter.events(),
            vec![
                Event::Cloned {
                    repo: "octo/a".to_string()
                },
                Event::Summary { cloned: 1, total: 3 },
            ]
        );
    }

    #[tokio::test]
    async fn test_workspace_lists_every_fetched_repository() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("octo");
        fs::create_dir_all(target.join("b")).unwrap();
        fs::write(target.join("b/file"), "x").unwrap();
        let lister = StaticLister::repos(&["a", "b"]);
        let reporter = RecordingReporter::default();
        let orchestrator = CloneOrchestrator::new(
            &lister,
            Arc::new(ScriptedExecutor::new()),
            &NativeRemover,
            &reporter,
        );

        let mut opts = options(&target, 2);
        opts.workspace = true;
        let summary = orchestrator.run("octo", &opts).await.unwrap();

        let path = summary.workspace.unwrap();
        assert_eq!(path, target.join("octo.code-workspace"));
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"a\""));
        assert!(contents.contains("\"b\""));
        assert!(reporter.events().contains(&Event::WorkspaceWritten { path }));
    }

    #[test]
    fn test_folder_state() {
        let temp = TempDir::new().unwrap();
        let empty = temp.path().join("empty");
        let full = temp.path().join("full");
        let file = temp.path().join("file");
        fs::create_dir(&empty).unwrap();
        fs::create_dir(&full).unwrap();
        fs::write(full.join("README.md"), "x").unwrap();
        fs::write(&file, "x").unwrap();

        assert_eq!(folder_state(&temp.path().join("missing")), FolderState::Missing);
        assert_eq!(folder_state(&empty), FolderState::Empty);
        assert_eq!(
            folder_state(&full),
            FolderState::Occupied(SkipReason::FolderNotEmpty)
        );
        assert_eq!(
            folder_state(&file),
            FolderState::Occupied(SkipReason::NotADirectory)
        );
    }

    #[test]
    fn test_default_target_is_owner_login() {
        let first = Repository::new("the-org", "a");
        let mut opts = CloneOptions::default();
        assert_eq!(resolve_target(&opts, &first), PathBuf::from("the-org"));

        opts.target_folder = Some(PathBuf::from("/srv/mirror"));
        assert_eq!(resolve_target(&opts, &first), PathBuf::from("/srv/mirror"));
    }
}
