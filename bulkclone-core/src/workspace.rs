//! Editor workspace manifest
//!
//! Writes a `.code-workspace` file listing every cloned folder, so the whole
//! account can be opened as one multi-root workspace.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;

/// One folder entry of the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceFolder {
    pub path: String,
}

/// The manifest document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub folders: Vec<WorkspaceFolder>,
}

impl Workspace {
    /// Build a manifest from folder names, keeping the first of any duplicates
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut seen = HashSet::new();
        let folders = names
            .into_iter()
            .filter(|name| seen.insert(*name))
            .map(|name| WorkspaceFolder {
                path: name.to_string(),
            })
            .collect();
        Self { folders }
    }
}

/// Path of the manifest for a target folder: `<target>/<basename>.code-workspace`
pub fn workspace_path(target: &Path) -> PathBuf {
    let stem = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workspace".to_string());
    target.join(format!("{}.code-workspace", stem))
}

/// Write the manifest for `names` into `target`, returning the file path
pub fn write_workspace<'a>(
    target: &Path,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<PathBuf> {
    let path = workspace_path(target);
    let contents = serde_json::to_string_pretty(&Workspace::from_names(names))?;
    std::fs::write(&path, contents)?;
    Ok(path)
}
