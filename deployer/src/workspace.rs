//! Workspace layout and directory resets.
//!
//! The workspace is a scratch directory wiped at the start of each run. It
//! holds the downloaded distribution, the extracted tree, and any merge
//! directories and consolidated jars produced by post-processing.

use crate::error::{DeployerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Default workspace directory, relative to the working directory.
pub const DEFAULT_WORKSPACE: &str = "build";

/// File name of the downloaded distribution inside the workspace.
const DISTRIBUTION_FILE: &str = "gradle-distribution.zip";

/// Directory the distribution is extracted into.
const EXTRACT_DIR: &str = "extract";

/// Paths inside a prepared workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    root: Utf8PathBuf,
}

impl WorkspaceLayout {
    /// Describe the layout rooted at `root` without touching the filesystem.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The workspace root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Where the distribution zip is saved.
    #[must_use]
    pub fn distribution_archive(&self) -> Utf8PathBuf {
        self.root.join(DISTRIBUTION_FILE)
    }

    /// Where the distribution is extracted.
    #[must_use]
    pub fn extract_dir(&self) -> Utf8PathBuf {
        self.root.join(EXTRACT_DIR)
    }

    /// Wipe the workspace root and recreate it empty.
    ///
    /// # Errors
    ///
    /// Returns [`DeployerError::WorkspaceReset`] if the root cannot be
    /// removed or recreated.
    pub fn reset(&self) -> Result<()> {
        reset_directory(&self.root)
    }
}

/// Remove `path` and everything below it if present, then create it empty.
///
/// # Errors
///
/// Returns [`DeployerError::WorkspaceReset`] on any filesystem failure.
pub fn reset_directory(path: &Utf8Path) -> Result<()> {
    let reset_failed = |source| DeployerError::WorkspaceReset {
        path: path.to_owned(),
        source,
    };
    if path.exists() {
        fs::remove_dir_all(path).map_err(reset_failed)?;
    }
    fs::create_dir_all(path).map_err(reset_failed)
}
