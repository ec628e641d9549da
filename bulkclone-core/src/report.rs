//! User-facing progress events
//!
//! The orchestrator and reconciler never print directly; they hand every
//! event to a [`Reporter`] supplied by the caller.

use std::path::PathBuf;

use crate::prune::DeleteErrorKind;

/// Why a repository was not scheduled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The target folder already holds files
    FolderNotEmpty,
    /// The target path exists but is not a directory
    NotADirectory,
    /// Another descriptor with the same name was already scheduled
    Duplicate,
}

/// A progress event emitted during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A stray directory was deleted
    Pruned { path: PathBuf },
    /// A stray directory could not be deleted
    PruneFailed {
        path: PathBuf,
        kind: DeleteErrorKind,
        message: String,
    },
    /// A repository was left alone
    Skipped {
        repo: String,
        path: PathBuf,
        reason: SkipReason,
    },
    /// A clone finished with exit code 0
    Cloned { repo: String },
    /// A clone exited with code 1
    CloneFailed { repo: String, stderr: String },
    /// A clone ended with any other status
    CloneUnexpected {
        repo: String,
        code: Option<i32>,
        stderr: String,
    },
    /// Final tally
    Summary { cloned: usize, total: usize },
    /// The workspace manifest was written
    WorkspaceWritten { path: PathBuf },
    /// The workspace manifest could not be written
    WorkspaceFailed { path: PathBuf, message: String },
}

/// Sink for [`Event`]s
pub trait Reporter: Send + Sync {
    /// Handle one event
    fn report(&self, event: &Event);
}

/// The closing line of a run
pub fn summary_line(cloned: usize, total: usize) -> String {
    if cloned == total {
        format!("cloned all {} repositories", total)
    } else {
        format!("cloned {}/{} repositories", cloned, total)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Reporter that keeps every event for assertions
    #[derive(Debug, Default)]
    pub struct RecordingReporter {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingReporter {
        pub fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Reporter for RecordingReporter {
        fn report(&self, event: &Event) {
            self.events.lock().unwrap().push(event.clone());
        }
    }
}
