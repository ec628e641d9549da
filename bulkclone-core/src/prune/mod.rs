//! Directory reconciliation
//!
//! Removes subdirectories of the target folder that no longer correspond to
//! any repository of the account.

mod reconciler;
mod remove;

pub use reconciler::{PruneReport, Reconciler};
pub use remove::{default_remover, DeleteError, DeleteErrorKind, NativeRemover, RecursiveDelete};
#[cfg(windows)]
pub use remove::CommandRemover;
