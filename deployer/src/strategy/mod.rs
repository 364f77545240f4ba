//! Post-processing applied to the working set before deployment.
//!
//! A [`PostProcess`] receives the scanned artifacts and returns the set to
//! deploy. [`Independent`] passes them through unchanged; [`FatMerge`]
//! folds every component into one consolidated artifact pair. The variant
//! is chosen at startup through [`Strategy`].

pub mod fat_merge;
pub mod independent;

pub use fat_merge::FatMerge;
pub use independent::Independent;

use crate::artifact::MavenArtifact;
use crate::config::DeployerConfig;
use crate::error::Result;
use camino::Utf8Path;

/// Inputs shared by every post-processing step.
#[derive(Debug, Clone, Copy)]
pub struct PostProcessContext<'a> {
    /// Workspace root where intermediate directories and outputs are placed.
    pub workspace: &'a Utf8Path,
    /// Global distribution version.
    pub version: &'a str,
}

/// A transform from the scanned working set to the deployable one.
pub trait PostProcess {
    /// Short name used in progress output.
    fn name(&self) -> &'static str;

    /// Transform `artifacts`, returning the set to deploy.
    ///
    /// # Errors
    ///
    /// Returns an error if any intermediate file operation fails; the run
    /// is aborted.
    fn apply(
        &self,
        context: &PostProcessContext<'_>,
        artifacts: Vec<MavenArtifact>,
    ) -> Result<Vec<MavenArtifact>>;
}

/// Strategy selector exposed on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Deploy every component jar as its own artifact.
    #[default]
    Independent,
    /// Merge every component into a single fat artifact.
    FatMerge,
}

impl Strategy {
    /// Build the post-processing step for this strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use gradle_deployer::config::DeployerConfig;
    /// use gradle_deployer::strategy::Strategy;
    ///
    /// let step = Strategy::FatMerge.build(&DeployerConfig::default());
    /// assert_eq!(step.name(), "fat-merge");
    /// ```
    #[must_use]
    pub fn build(self, config: &DeployerConfig) -> Box<dyn PostProcess> {
        match self {
            Self::Independent => Box::new(Independent),
            Self::FatMerge => Box::new(FatMerge::from_config(config)),
        }
    }
}
