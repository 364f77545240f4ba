//! The deployable artifact model.
//!
//! A [`MavenArtifact`] pairs a binary jar with an optional sources jar. Its
//! Maven identity is not stored; [`naming`] derives it from the binary's
//! file name when the artifact is deployed.

pub mod naming;

pub use naming::ArtifactNaming;

use camino::{Utf8Path, Utf8PathBuf};

/// A binary jar and, when a matching source tree was found, its sources jar.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use gradle_deployer::artifact::MavenArtifact;
///
/// let mut artifact = MavenArtifact::new(Utf8PathBuf::from("lib/gradle-core-8.0.jar"));
/// assert!(artifact.sources().is_none());
///
/// artifact.attach_sources(Utf8PathBuf::from("src/gradle-core-8.0-sources.jar"));
/// assert_eq!(artifact.binary_file_name(), "gradle-core-8.0.jar");
/// assert!(artifact.sources().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenArtifact {
    binary: Utf8PathBuf,
    sources: Option<Utf8PathBuf>,
}

impl MavenArtifact {
    /// Create an artifact with no sources attached.
    #[must_use]
    pub fn new(binary: Utf8PathBuf) -> Self {
        Self {
            binary,
            sources: None,
        }
    }

    /// Create an artifact with both archives known up front.
    #[must_use]
    pub fn with_sources(binary: Utf8PathBuf, sources: Utf8PathBuf) -> Self {
        Self {
            binary,
            sources: Some(sources),
        }
    }

    /// Attach a packed sources archive.
    pub fn attach_sources(&mut self, sources: Utf8PathBuf) {
        self.sources = Some(sources);
    }

    /// Path to the binary archive.
    #[must_use]
    pub fn binary(&self) -> &Utf8Path {
        &self.binary
    }

    /// Path to the sources archive, if one was attached.
    #[must_use]
    pub fn sources(&self) -> Option<&Utf8Path> {
        self.sources.as_deref()
    }

    /// File name of the binary archive.
    #[must_use]
    pub fn binary_file_name(&self) -> &str {
        self.binary.file_name().unwrap_or(self.binary.as_str())
    }
}
