//! Fat-artifact post-processing.
//!
//! Unpacks every component jar into one directory and every sources jar
//! into another, then packs each back into a single consolidated archive.
//! Entries under an excluded namespace (competing `org/slf4j/` bindings) are
//! dropped on the way in. Colliding paths resolve in working-set order: the
//! last component to write a path wins.

use super::{PostProcess, PostProcessContext};
use crate::archive::{keep_all, pack_directory, unpack_archive};
use crate::artifact::MavenArtifact;
use crate::artifact::naming::FatArtifactName;
use crate::config::DeployerConfig;
use crate::error::Result;
use crate::workspace::reset_directory;
use camino::Utf8PathBuf;
use log::debug;

/// Merges the whole working set into one artifact pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatMerge {
    base_name: String,
    exclusions: Vec<String>,
}

impl FatMerge {
    /// Create a merge step producing `<base_name>-<version>.jar` and
    /// dropping entries under any of `exclusions`.
    #[must_use]
    pub fn new(base_name: impl Into<String>, exclusions: Vec<String>) -> Self {
        Self {
            base_name: base_name.into(),
            exclusions,
        }
    }

    /// Create a merge step from the configured name and exclusions.
    #[must_use]
    pub fn from_config(config: &DeployerConfig) -> Self {
        Self::new(
            config.fat_artifact_name.clone(),
            config.merge_exclusions.clone(),
        )
    }

    /// Returns true when a binary entry must be left out of the merge.
    ///
    /// # Examples
    ///
    /// ```
    /// use gradle_deployer::strategy::FatMerge;
    ///
    /// let merge = FatMerge::new("gradle-all", vec!["org/slf4j/".to_owned()]);
    /// assert!(merge.is_excluded("org/slf4j/impl/StaticLoggerBinder.class"));
    /// assert!(!merge.is_excluded("org/gradle/api/Project.class"));
    /// ```
    #[must_use]
    pub fn is_excluded(&self, entry_name: &str) -> bool {
        self.exclusions
            .iter()
            .any(|namespace| entry_name.starts_with(namespace.as_str()))
    }
}

impl PostProcess for FatMerge {
    fn name(&self) -> &'static str {
        "fat-merge"
    }

    fn apply(
        &self,
        context: &PostProcessContext<'_>,
        artifacts: Vec<MavenArtifact>,
    ) -> Result<Vec<MavenArtifact>> {
        let binary_dir = context.workspace.join(&self.base_name);
        let sources_dir = context.workspace.join(format!("{}-sources", self.base_name));
        reset_directory(&binary_dir)?;
        reset_directory(&sources_dir)?;

        for artifact in &artifacts {
            let summary = unpack_archive(artifact.binary(), &binary_dir, |name| {
                self.is_excluded(name)
            })?;
            debug!(
                "merged {} entries from {} ({} excluded)",
                summary.extracted,
                artifact.binary(),
                summary.skipped
            );

            if let Some(sources) = artifact.sources() {
                unpack_archive(sources, &sources_dir, keep_all)?;
            }
        }

        let names = FatArtifactName::new(&self.base_name, context.version);
        let binary: Utf8PathBuf = context.workspace.join(names.binary());
        let sources: Utf8PathBuf = context.workspace.join(names.sources());
        pack_directory(&binary_dir, &binary)?;
        pack_directory(&sources_dir, &sources)?;

        Ok(vec![MavenArtifact::with_sources(binary, sources)])
    }
}

#[cfg(test)]
#[path = "fat_merge_tests.rs"]
mod tests;
