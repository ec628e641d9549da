//! Recursive directory removal

use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;

/// Closed set of reasons a directory could not be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteErrorKind {
    /// Missing permissions or a read-only filesystem
    AccessDenied,
    /// Something holds the directory or a file inside it open
    Busy,
    /// Contents appeared while the directory was being removed
    NotEmpty,
    /// The directory vanished before it could be removed
    NotFound,
    /// A path inside the directory exceeds the platform limit
    PathTooLong,
    /// Anything else
    Other,
}

impl DeleteErrorKind {
    /// Classify an IO error
    pub fn from_io(err: &std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => Self::AccessDenied,
            ErrorKind::ResourceBusy | ErrorKind::ExecutableFileBusy => Self::Busy,
            ErrorKind::DirectoryNotEmpty => Self::NotEmpty,
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::InvalidFilename => Self::PathTooLong,
            _ => Self::Other,
        }
    }

    /// What the user can do about it
    pub fn hint(&self) -> &'static str {
        match self {
            Self::AccessDenied => "access denied; check the folder's permissions and ownership",
            Self::Busy => "the folder is in use; close any program that has files open inside it",
            Self::NotEmpty => "files were added while it was being removed; try again",
            Self::NotFound => "it no longer exists",
            Self::PathTooLong => "a path inside it is too long for this filesystem",
            Self::Other => "unexpected filesystem error",
        }
    }
}

impl std::fmt::Display for DeleteErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hint())
    }
}

/// A failed recursive delete
#[derive(Error, Debug)]
#[error("{kind}: {detail}")]
pub struct DeleteError {
    /// Classified reason
    pub kind: DeleteErrorKind,
    /// Raw error text
    pub detail: String,
}

impl From<std::io::Error> for DeleteError {
    fn from(err: std::io::Error) -> Self {
        Self {
            kind: DeleteErrorKind::from_io(&err),
            detail: err.to_string(),
        }
    }
}

/// Capability to remove a directory and everything below it
pub trait RecursiveDelete: Send + Sync {
    /// Remove `path` and its contents
    fn remove_dir_all(&self, path: &Path) -> Result<(), DeleteError>;
}

/// Removal through [`std::fs::remove_dir_all`]
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeRemover;

impl RecursiveDelete for NativeRemover {
    fn remove_dir_all(&self, path: &Path) -> Result<(), DeleteError> {
        std::fs::remove_dir_all(path).map_err(DeleteError::from)
    }
}

/// Removal through `cmd /C rmdir /S /Q`
///
/// In-process removal on Windows fails on read-only files and directories
/// that are briefly held open by indexers or virus scanners.
#[cfg(windows)]
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandRemover;

#[cfg(windows)]
impl RecursiveDelete for CommandRemover {
    fn remove_dir_all(&self, path: &Path) -> Result<(), DeleteError> {
        let output = std::process::Command::new("cmd")
            .arg("/C")
            .arg("rmdir")
            .arg("/S")
            .arg("/Q")
            .arg(path)
            .output()?;

        // rmdir can exit 0 while leaving the directory behind.
        if output.status.success() && !path.exists() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let lowered = stderr.to_ascii_lowercase();
        let kind = if lowered.contains("being used by another process") {
            DeleteErrorKind::Busy
        } else if lowered.contains("access is denied") {
            DeleteErrorKind::AccessDenied
        } else if lowered.contains("cannot find") {
            DeleteErrorKind::NotFound
        } else if lowered.contains("too long") {
            DeleteErrorKind::PathTooLong
        } else if lowered.contains("not empty") {
            DeleteErrorKind::NotEmpty
        } else {
            DeleteErrorKind::Other
        };

        Err(DeleteError {
            kind,
            detail: stderr,
        })
    }
}

/// The remover appropriate for the current platform
pub fn default_remover() -> Box<dyn RecursiveDelete> {
    #[cfg(windows)]
    {
        Box::new(CommandRemover)
    }
    #[cfg(not(windows))]
    {
        Box::new(NativeRemover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_classify_io_errors() {
        let kind = |k| DeleteErrorKind::from_io(&std::io::Error::from(k));
        assert_eq!(kind(ErrorKind::PermissionDenied), DeleteErrorKind::AccessDenied);
        assert_eq!(kind(ErrorKind::ResourceBusy), DeleteErrorKind::Busy);
        assert_eq!(kind(ErrorKind::DirectoryNotEmpty), DeleteErrorKind::NotEmpty);
        assert_eq!(kind(ErrorKind::NotFound), DeleteErrorKind::NotFound);
        assert_eq!(kind(ErrorKind::InvalidFilename), DeleteErrorKind::PathTooLong);
        assert_eq!(kind(ErrorKind::InvalidData), DeleteErrorKind::Other);
    }

    #[test]
    fn test_native_remover_removes_tree() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("stray");
        std::fs::create_dir_all(dir.join("nested/deeper")).unwrap();
        std::fs::write(dir.join("nested/file.txt"), "x").unwrap();

        NativeRemover.remove_dir_all(&dir).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_native_remover_missing_dir() {
        let temp = TempDir::new().unwrap();
        let err = NativeRemover
            .remove_dir_all(&temp.path().join("missing"))
            .unwrap_err();
        assert_eq!(err.kind, DeleteErrorKind::NotFound);
        assert!(err.to_string().starts_with("it no longer exists"));
    }
}
