//! Set-difference pruning of the target folder

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::remove::{DeleteErrorKind, RecursiveDelete};
use crate::report::{Event, Reporter};
use crate::repository::Repository;
use crate::{Error, Result};

/// Outcome of one prune pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Directories that were removed
    pub removed: Vec<PathBuf>,
    /// Directories that could not be removed
    pub failed: Vec<(PathBuf, DeleteErrorKind)>,
}

/// Deletes directories that match no current repository
///
/// Only immediate child directories of the target are considered. Files and
/// symlinks are left alone, as is every directory whose name matches a
/// repository, whatever it contains.
pub struct Reconciler<'a> {
    remover: &'a dyn RecursiveDelete,
    reporter: &'a dyn Reporter,
}

impl<'a> Reconciler<'a> {
    pub fn new(remover: &'a dyn RecursiveDelete, reporter: &'a dyn Reporter) -> Self {
        Self { remover, reporter }
    }

    /// Directories under `target` whose name is not a repository name
    pub fn stray_directories(&self, repos: &[Repository], target: &Path) -> Result<Vec<PathBuf>> {
        let wanted: HashSet<&OsStr> = repos.iter().map(|r| OsStr::new(r.name.as_str())).collect();

        let read_err = |source: std::io::Error| Error::ReadTarget {
            path: target.to_path_buf(),
            source,
        };

        // Collected up front; nothing is deleted while the directory is being read.
        let mut stray = Vec::new();
        for entry in std::fs::read_dir(target).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir && !wanted.contains(entry.file_name().as_os_str()) {
                stray.push(entry.path());
            }
        }
        stray.sort();
        Ok(stray)
    }

    /// Remove every stray directory under `target`
    ///
    /// A failed removal is reported and does not stop the others. Only a
    /// target that cannot be read at all is an error.
    pub fn prune(&self, repos: &[Repository], target: &Path) -> Result<PruneReport> {
        let stray = self.stray_directories(repos, target)?;
        tracing::debug!(target = %target.display(), count = stray.len(), "pruning stray directories");

        let mut report = PruneReport::default();
        for path in stray {
            match self.remover.remove_dir_all(&path) {
                Ok(()) => {
                    self.reporter.report(&Event::Pruned { path: path.clone() });
                    report.removed.push(path);
                }
                Err(e) => {
                    self.reporter.report(&Event::PruneFailed {
                        path: path.clone(),
                        kind: e.kind,
                        message: format!("could not remove {}: {}", path.display(), e),
                    });
                    report.failed.push((path, e.kind));
                }
            }
        }
        Ok(report)
    }
}
