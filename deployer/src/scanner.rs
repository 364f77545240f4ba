//! Distribution scanner.
//!
//! Walks an extracted Gradle distribution, discovers component jars under
//! `lib/`, and packs the matching `src/<component>/` tree of each into a
//! sources jar.

use crate::archive::pack_directory;
use crate::artifact::{ArtifactNaming, MavenArtifact};
use crate::error::{DeployerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;
use walkdir::WalkDir;

/// An extracted distribution root and the version derived from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    root: Utf8PathBuf,
    version: String,
}

impl Distribution {
    /// Describe a distribution rooted at `root`, deriving its version from
    /// the directory name.
    ///
    /// # Errors
    ///
    /// Returns [`DeployerError::InvalidDistributionName`] when no version is
    /// left once the naming prefix is stripped.
    pub fn from_root(root: Utf8PathBuf, naming: &ArtifactNaming) -> Result<Self> {
        let name = root.file_name().unwrap_or(root.as_str());
        let version = naming
            .version_from_distribution(name)
            .ok_or_else(|| DeployerError::InvalidDistributionName {
                name: name.to_owned(),
                prefix: naming.prefix().to_owned(),
            })?
            .to_owned();
        Ok(Self { root, version })
    }

    /// The distribution root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// The global version shared by every component.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The `lib/` directory holding component jars.
    #[must_use]
    pub fn lib_dir(&self) -> Utf8PathBuf {
        self.root.join("lib")
    }

    /// The optional `src/` directory holding per-component source trees.
    #[must_use]
    pub fn src_dir(&self) -> Utf8PathBuf {
        self.root.join("src")
    }
}

/// The working set built from a distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Discovered artifacts in traversal order.
    pub artifacts: Vec<MavenArtifact>,
    /// Whether the distribution shipped a `src/` directory.
    pub has_source_tree: bool,
}

/// Locate the distribution root: the first directory under `extract_dir`.
///
/// # Errors
///
/// Returns [`DeployerError::DistributionNotFound`] if `extract_dir` holds no
/// directory, and [`DeployerError::Io`] if it cannot be read.
pub fn locate_distribution(extract_dir: &Utf8Path) -> Result<Utf8PathBuf> {
    let mut directories = Vec::new();
    for entry in extract_dir.read_dir_utf8()? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            directories.push(entry.into_path());
        }
    }
    directories.sort();
    directories
        .into_iter()
        .next()
        .ok_or_else(|| DeployerError::DistributionNotFound {
            path: extract_dir.to_owned(),
        })
}

/// Scans a distribution for component jars and their sources.
#[derive(Debug, Clone)]
pub struct DistributionScanner<'a> {
    naming: &'a ArtifactNaming,
}

impl<'a> DistributionScanner<'a> {
    /// Create a scanner applying `naming`.
    #[must_use]
    pub fn new(naming: &'a ArtifactNaming) -> Self {
        Self { naming }
    }

    /// Build the working set for `distribution`.
    ///
    /// Every file under `lib/` whose name is a component jar becomes an
    /// artifact, in sorted traversal order. When `src/` exists, each
    /// component with a matching source directory gets a freshly packed
    /// sources jar inside `src/`; the rest are left without sources.
    ///
    /// # Errors
    ///
    /// Returns [`DeployerError::MissingLibDirectory`] when `lib/` is absent,
    /// and propagates walk and packing failures.
    pub fn scan(&self, distribution: &Distribution) -> Result<ScanOutcome> {
        let mut artifacts = self.discover_jars(&distribution.lib_dir())?;

        let src_dir = distribution.src_dir();
        let has_source_tree = src_dir.is_dir();
        if has_source_tree {
            for artifact in &mut artifacts {
                self.attach_sources(artifact, &src_dir, distribution.version())?;
            }
        }

        Ok(ScanOutcome {
            artifacts,
            has_source_tree,
        })
    }

    /// Collect component jars under `lib_dir`, following symlinks.
    fn discover_jars(&self, lib_dir: &Utf8Path) -> Result<Vec<MavenArtifact>> {
        if !lib_dir.is_dir() {
            return Err(DeployerError::MissingLibDirectory {
                path: lib_dir.to_owned(),
            });
        }

        let mut artifacts = Vec::new();
        for entry in WalkDir::new(lib_dir)
            .follow_links(true)
            .sort_by_file_name() {
            let entry = entry.map_err(|e| DeployerError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = Utf8PathBuf::try_from(entry.into_path()).map_err(|e| {
                DeployerError::NonUtf8Path {
                    path: e.as_path().display().to_string(),
                }
            })?;
            let is_component = path
                .file_name()
                .is_some_and(|name| self.naming.is_component_jar(name));
            if is_component {
                debug!("discovered component jar {path}");
                artifacts.push(MavenArtifact::new(path));
            }
        }
        Ok(artifacts)
    }

    /// Pack and attach the sources jar for one artifact, if its source
    /// directory exists.
    fn attach_sources(
        &self,
        artifact: &mut MavenArtifact,
        src_dir: &Utf8Path,
        version: &str,
    ) -> Result<()> {
        let Some(component) = self
            .naming
            .component_id(artifact.binary_file_name(), version)
        else {
            return Ok(());
        };

        let component_dir = src_dir.join(component);
        if !component_dir.is_dir() {
            debug!("no source tree for {component} at {component_dir}");
            return Ok(());
        }

        let sources_jar = src_dir.join(self.naming.sources_jar_name(component, version));
        if sources_jar.exists() {
            fs::remove_file(&sources_jar)?;
        }
        let entries = pack_directory(&component_dir, &sources_jar)?;
        debug!("packed {entries} source files into {sources_jar}");

        artifact.attach_sources(sources_jar);
        Ok(())
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
