//! Deployer configuration.
//!
//! Every constant the pipeline depends on lives in [`DeployerConfig`]. The
//! defaults describe the Gradle distribution published to the Consulo
//! snapshot repository; an optional TOML file can override any subset of
//! them:
//!
//! ```toml
//! distribution_url = "https://services.gradle.org/distributions/gradle-8.1-all.zip"
//! merge_exclusions = ["org/slf4j/", "org/apache/log4j/"]
//!
//! [repository]
//! url = "https://repo.example.test/snapshots/"
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the Maven installation.
pub const MAVEN_HOME_ENV: &str = "MAVEN_HOME";

const DEFAULT_DISTRIBUTION_URL: &str =
    "https://services.gradle.org/distributions/gradle-8.0.2-all.zip";

/// Errors arising while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Read {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`DeployerConfig`].
    #[error("invalid configuration {path}: {source}")]
    Parse {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// The underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for the pipeline, from download to deployment.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DeployerConfig {
    /// Where the distribution zip is downloaded from.
    pub distribution_url: String,
    /// Prefix shared by the distribution directory and component jars.
    pub name_prefix: String,
    /// Entries whose stored name contains any of these tokens are never
    /// extracted from the distribution.
    pub extraction_exclusions: Vec<String>,
    /// Entries whose stored name starts with any of these namespaces are
    /// dropped while building the fat artifact.
    pub merge_exclusions: Vec<String>,
    /// Base name of the consolidated artifact.
    pub fat_artifact_name: String,
    /// Target repository coordinates.
    pub repository: RepositoryConfig,
}

/// Coordinates passed to the deploy command for every artifact.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Maven group identifier.
    pub group_id: String,
    /// Packaging type; always `jar` for Gradle components.
    pub packaging: String,
    /// Repository identifier matching a `settings.xml` server entry.
    pub id: String,
    /// Repository URL.
    pub url: String,
}

impl Default for DeployerConfig {
    fn default() -> Self {
        Self {
            distribution_url: DEFAULT_DISTRIBUTION_URL.to_owned(),
            name_prefix: "gradle-".to_owned(),
            extraction_exclusions: vec!["examples".to_owned()],
            merge_exclusions: vec!["org/slf4j/".to_owned()],
            fat_artifact_name: "gradle-all".to_owned(),
            repository: RepositoryConfig::default(),
        }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            group_id: "consulo.internal.gradle.plugin".to_owned(),
            packaging: "jar".to_owned(),
            id: "consulo".to_owned(),
            url: "https://maven.consulo.io/repository/snapshots/".to_owned(),
        }
    }
}

impl DeployerConfig {
    /// Load configuration from `path`, or return the defaults when no path is
    /// given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Returns true when a distribution entry must not be extracted.
    ///
    /// # Examples
    ///
    /// ```
    /// use gradle_deployer::config::DeployerConfig;
    ///
    /// let config = DeployerConfig::default();
    /// assert!(config.is_excluded_from_extraction("gradle-8.0/samples/examples/a.txt"));
    /// assert!(!config.is_excluded_from_extraction("gradle-8.0/lib/gradle-core-8.0.jar"));
    /// ```
    #[must_use]
    pub fn is_excluded_from_extraction(&self, entry_name: &str) -> bool {
        self.extraction_exclusions
            .iter()
            .any(|token| entry_name.contains(token.as_str()))
    }
}

/// Resolve the Maven home: the environment variable wins, then the
/// positional argument.
///
/// # Errors
///
/// Returns [`DeployerError::DeployerHomeMissing`](crate::error::DeployerError::DeployerHomeMissing)
/// when neither is set.
pub fn resolve_maven_home(positional: Option<&Utf8Path>) -> crate::error::Result<Utf8PathBuf> {
    let from_env = std::env::var(MAVEN_HOME_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty());
    select_maven_home(from_env, positional)
}

fn select_maven_home(
    from_env: Option<String>,
    positional: Option<&Utf8Path>,
) -> crate::error::Result<Utf8PathBuf> {
    from_env
        .map(Utf8PathBuf::from)
        .or_else(|| positional.map(Utf8Path::to_path_buf))
        .ok_or(crate::error::DeployerError::DeployerHomeMissing)
}
