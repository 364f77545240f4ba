//! Deployment pipeline orchestration.
//!
//! Drives a run end to end: reset the workspace, download and extract the
//! distribution, scan it into a working set, post-process that set, then
//! deploy each artifact in order. Deployment is strictly sequential and
//! stops at the first failing artifact.

use crate::archive::unpack_archive;
use crate::artifact::{ArtifactNaming, MavenArtifact};
use crate::config::DeployerConfig;
use crate::deploy::{CommandExecutor, DeployRequest};
use crate::download::DistributionDownloader;
use crate::error::{DeployerError, Result};
use crate::output::write_stderr_line;
use crate::scanner::{Distribution, DistributionScanner, locate_distribution};
use crate::strategy::{PostProcess, PostProcessContext};
use crate::workspace::WorkspaceLayout;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::io::Write;
use std::process::ExitStatus;

/// What to do when the deploy command fails for an artifact.
///
/// Both policies stop the loop at the first failure; they differ only in
/// whether the run itself reports failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop deploying and finish the run successfully.
    #[default]
    StopSilently,
    /// Stop deploying and return [`DeployerError::DeployFailed`].
    Propagate,
}

/// Settings for a pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineContext<'a> {
    /// Constants and repository coordinates.
    pub config: &'a DeployerConfig,
    /// Scratch workspace, wiped at the start of the run.
    pub workspace: &'a WorkspaceLayout,
    /// Path to the deploy command (`<maven-home>/bin/mvn`).
    pub deploy_command: &'a Utf8Path,
    /// Behaviour on deploy failure.
    pub failure_policy: FailurePolicy,
    /// Suppress progress output (warnings still shown).
    pub quiet: bool,
}

/// External collaborators and the chosen post-processing step.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    /// Fetches the distribution archive.
    pub downloader: &'a dyn DistributionDownloader,
    /// Runs the deploy command.
    pub executor: &'a dyn CommandExecutor,
    /// Transforms the scanned working set.
    pub post_process: &'a dyn PostProcess,
}

/// The artifact whose deployment failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployFailure {
    /// Published id of the failing artifact.
    pub artifact_id: String,
    /// Exit status reported by the deploy command.
    pub status: ExitStatus,
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentReport {
    /// Global distribution version.
    pub version: String,
    /// Ids deployed successfully, in order.
    pub deployed: Vec<String>,
    /// The failing artifact, if the loop stopped early.
    pub failure: Option<DeployFailure>,
    /// Ids never attempted because an earlier deploy failed.
    pub not_attempted: Vec<String>,
    /// Binary jars that were deployed without a sources jar.
    pub missing_sources: Vec<Utf8PathBuf>,
}

impl DeploymentReport {
    /// Returns true when every artifact in the working set was deployed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Run the whole pipeline.
///
/// # Errors
///
/// Returns an error for any build-side failure: workspace reset, download,
/// extraction, scanning, packing or merging. A failing deploy command is
/// reported through [`DeploymentReport::failure`] unless the context asks
/// for [`FailurePolicy::Propagate`].
pub fn run_pipeline(
    context: &PipelineContext<'_>,
    collaborators: &Collaborators<'_>,
    stderr: &mut dyn Write,
) -> Result<DeploymentReport> {
    let naming = ArtifactNaming::new(context.config.name_prefix.as_str());

    prepare_workspace(context, stderr)?;
    let distribution =
        acquire_distribution(context, collaborators.downloader, &naming, stderr)?;
    let artifacts = build_working_set(context, &distribution, &naming, stderr)?;

    let post_context = PostProcessContext {
        workspace: context.workspace.root(),
        version: distribution.version(),
    };
    progress(
        context,
        stderr,
        format!(
            "Post-processing with {} strategy",
            collaborators.post_process.name()
        ),
    );
    let artifacts = collaborators.post_process.apply(&post_context, artifacts)?;

    let missing_sources = report_missing_sources(&artifacts, stderr);
    let mut report = deploy_artifacts(
        context,
        collaborators.executor,
        &artifacts,
        distribution.version(),
        stderr,
    )?;
    report.missing_sources = missing_sources;

    enforce_failure_policy(context.failure_policy, report)
}

/// Wipe and recreate the workspace root.
///
/// # Errors
///
/// Returns [`DeployerError::WorkspaceReset`] if the workspace cannot be
/// reset.
pub fn prepare_workspace(context: &PipelineContext<'_>, stderr: &mut dyn Write) -> Result<()> {
    progress(context, stderr, "Preparing build directory");
    context.workspace.reset()
}

/// Download the distribution, extract it (minus excluded entries) and
/// locate its root.
///
/// # Errors
///
/// Returns an error if the download, extraction or root discovery fails.
pub fn acquire_distribution(
    context: &PipelineContext<'_>,
    downloader: &dyn DistributionDownloader,
    naming: &ArtifactNaming,
    stderr: &mut dyn Write,
) -> Result<Distribution> {
    let layout = context.workspace;
    let archive = layout.distribution_archive();

    progress(
        context,
        stderr,
        format!("Downloading gradle distribution. Target: {}", layout.root()),
    );
    downloader.download(&context.config.distribution_url, &archive)?;

    let extract_dir = layout.extract_dir();
    std::fs::create_dir_all(&extract_dir)?;
    progress(context, stderr, "Extracting distribution");
    let summary = unpack_archive(&archive, &extract_dir, |name| {
        context.config.is_excluded_from_extraction(name)
    })?;
    debug!(
        "extracted {} entries, skipped {}",
        summary.extracted, summary.skipped
    );

    let root = locate_distribution(&extract_dir)?;
    Distribution::from_root(root, naming)
}

/// Scan the distribution into the initial working set, packing sources.
///
/// # Errors
///
/// Returns an error if scanning or source packing fails.
pub fn build_working_set(
    context: &PipelineContext<'_>,
    distribution: &Distribution,
    naming: &ArtifactNaming,
    stderr: &mut dyn Write,
) -> Result<Vec<MavenArtifact>> {
    let outcome = DistributionScanner::new(naming).scan(distribution)?;
    if outcome.has_source_tree {
        progress(
            context,
            stderr,
            "Source directory exists. Making source artifacts",
        );
    }
    progress(
        context,
        stderr,
        format!(
            "Found {} component jar(s) for version {}",
            outcome.artifacts.len(),
            distribution.version()
        ),
    );
    Ok(outcome.artifacts)
}

/// Warn once for every artifact lacking a sources jar and return their
/// binary paths.
pub fn report_missing_sources(
    artifacts: &[MavenArtifact],
    stderr: &mut dyn Write,
) -> Vec<Utf8PathBuf> {
    artifacts
        .iter()
        .filter(|artifact| artifact.sources().is_none())
        .map(|artifact| {
            write_stderr_line(
                stderr,
                format!("Missing source artifact for: {}", artifact.binary()),
            );
            artifact.binary().to_owned()
        })
        .collect()
}

/// Deploy `artifacts` one by one, stopping at the first failure.
///
/// # Errors
///
/// Returns an error if an artifact path cannot be made absolute or the
/// deploy command cannot be spawned. A non-zero exit status is not an
/// error here; it ends the loop and is recorded in the report.
pub fn deploy_artifacts(
    context: &PipelineContext<'_>,
    executor: &dyn CommandExecutor,
    artifacts: &[MavenArtifact],
    version: &str,
    stderr: &mut dyn Write,
) -> Result<DeploymentReport> {
    let naming = ArtifactNaming::new(context.config.name_prefix.as_str());
    let mut report = DeploymentReport {
        version: version.to_owned(),
        ..DeploymentReport::default()
    };

    progress(context, stderr, "Deploying artifacts");
    for (index, artifact) in artifacts.iter().enumerate() {
        let artifact_id = naming.publish_id(artifact.binary_file_name(), version);
        progress(context, stderr, format!("Deploying {artifact_id}"));

        let file = absolute_path(artifact.binary())?;
        let sources = artifact.sources().map(absolute_path).transpose()?;
        let request = DeployRequest {
            artifact_id: &artifact_id,
            version,
            file: &file,
            sources: sources.as_deref(),
            repository: &context.config.repository,
        };
        let args = request.arguments();
        debug!("{} {}", context.deploy_command, args.join(" "));

        let status = executor.run(context.deploy_command.as_str(), &args)?;
        if status.success() {
            report.deployed.push(artifact_id);
            continue;
        }

        report.not_attempted = artifacts
            .iter()
            .skip(index + 1)
            .map(|rest| naming.publish_id(rest.binary_file_name(), version))
            .collect();
        report.failure = Some(DeployFailure {
            artifact_id,
            status,
        });
        break;
    }

    Ok(report)
}

/// Turn a recorded failure into an error when the policy asks for it.
fn enforce_failure_policy(
    policy: FailurePolicy,
    report: DeploymentReport,
) -> Result<DeploymentReport> {
    match (policy, &report.failure) {
        (FailurePolicy::Propagate, Some(failure)) => Err(DeployerError::DeployFailed {
            artifact_id: failure.artifact_id.clone(),
            status: failure.status,
        }),
        _ => Ok(report),
    }
}

/// Resolve `path` against the working directory.
fn absolute_path(path: &Utf8Path) -> Result<Utf8PathBuf> {
    let absolute = std::path::absolute(path)?;
    Utf8PathBuf::try_from(absolute).map_err(|e| DeployerError::NonUtf8Path {
        path: e.as_path().display().to_string(),
    })
}

fn progress(
    context: &PipelineContext<'_>,
    stderr: &mut dyn Write,
    message: impl std::fmt::Display,
) {
    if !context.quiet {
        write_stderr_line(stderr, message);
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
