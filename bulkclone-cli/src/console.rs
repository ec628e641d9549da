//! Console output for run events

use bulkclone_core::{summary_line, Event, Reporter, SkipReason};

/// Output stream of a rendered event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Reporter printing one line per event
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, event: &Event) {
        let (stream, line) = render(event);
        match stream {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        }
    }
}

/// The line printed for `event`
pub fn render(event: &Event) -> (Stream, String) {
    match event {
        Event::Pruned { path } => (
            Stream::Stdout,
            format!(
                "removed {} because it no longer belongs to the account",
                path.display()
            ),
        ),
        Event::PruneFailed { message, .. } => (Stream::Stderr, format!("error: {}", message)),
        Event::Skipped { repo, path, reason } => {
            let why = match reason {
                SkipReason::FolderNotEmpty => format!("folder {} is not empty", path.display()),
                SkipReason::NotADirectory => format!("{} is not a directory", path.display()),
                SkipReason::Duplicate => "listed more than once".to_string(),
            };
            (Stream::Stderr, format!("warning: skipping {}: {}", repo, why))
        }
        Event::Cloned { repo } => (Stream::Stdout, format!("cloned {}", repo)),
        Event::CloneFailed { repo, stderr } => (
            Stream::Stderr,
            format!("error: failed to clone {}: {}", repo, stderr),
        ),
        Event::CloneUnexpected { repo, code, stderr } => {
            let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
            (
                Stream::Stderr,
                format!(
                    "error: unexpected error cloning {} (exit code {}): {}",
                    repo, code, stderr
                ),
            )
        }
        Event::Summary { cloned, total } => (Stream::Stdout, summary_line(*cloned, *total)),
        Event::WorkspaceWritten { path } => {
            (Stream::Stdout, format!("wrote workspace {}", path.display()))
        }
        Event::WorkspaceFailed { path, message } => (
            Stream::Stderr,
            format!("warning: could not write {}: {}", path.display(), message),
        ),
    }
}
