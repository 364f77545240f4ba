//! Error types for the Gradle artifact deployer.
//!
//! Build-side failures (workspace, download, extraction, packing, merge) are
//! fatal and surface as [`DeployerError`]. A non-zero exit from the deploy
//! command is not an error unless the caller opts into
//! [`FailurePolicy::Propagate`](crate::pipeline::FailurePolicy::Propagate).

use crate::archive::ArchiveError;
use crate::config::ConfigError;
use crate::download::DownloadError;
use camino::Utf8PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that abort a deployment run.
#[derive(Debug, Error)]
pub enum DeployerError {
    /// The workspace (or a merge directory inside it) could not be cleared
    /// and recreated.
    #[error("failed to reset directory {path}: {source}")]
    WorkspaceReset {
        /// The directory being reset.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The distribution archive could not be downloaded.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Packing or unpacking an archive failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The extract directory holds no distribution root.
    #[error("no distribution found under {path}")]
    DistributionNotFound {
        /// The extract directory that was searched.
        path: Utf8PathBuf,
    },

    /// No version remains once the prefix is stripped from the root name.
    #[error("cannot derive a version from distribution directory \"{name}\" (prefix \"{prefix}\")")]
    InvalidDistributionName {
        /// The directory name found.
        name: String,
        /// The prefix stripped from the name.
        prefix: String,
    },

    /// The distribution has no `lib` directory.
    #[error("distribution has no lib directory at {path}")]
    MissingLibDirectory {
        /// Where the directory was expected.
        path: Utf8PathBuf,
    },

    /// Neither `MAVEN_HOME` nor the positional argument named the deploy
    /// tool's home.
    #[error("Maven home not set; export MAVEN_HOME or pass it as an argument")]
    DeployerHomeMissing,

    /// A path encountered during the run is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the offending path.
        path: String,
    },

    /// The deploy command reported failure and the run was configured to
    /// propagate it.
    #[error("deployment of {artifact_id} failed: {status}")]
    DeployFailed {
        /// Identifier of the artifact whose deployment failed.
        artifact_id: String,
        /// Exit status reported by the deploy command.
        status: ExitStatus,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`DeployerError`].
pub type Result<T> = std::result::Result<T, DeployerError>;
