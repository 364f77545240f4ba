//! Console output for the deployer CLI.
//!
//! Progress is written line by line to an injected writer (stderr in
//! production) so tests can capture it.

use crate::pipeline::DeploymentReport;
use std::io::Write;

/// Write a line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Summarise a finished deployment loop in one line.
///
/// # Examples
///
/// ```
/// use gradle_deployer::output::deployment_summary;
/// use gradle_deployer::pipeline::DeploymentReport;
///
/// let report = DeploymentReport {
///     version: "8.0".to_owned(),
///     deployed: vec!["gradle-core".to_owned()],
///     ..DeploymentReport::default()
/// };
/// assert_eq!(deployment_summary(&report), "Deployed 1 artifact for version 8.0");
/// ```
#[must_use]
pub fn deployment_summary(report: &DeploymentReport) -> String {
    let count = report.deployed.len();
    let plural = if count == 1 { "artifact" } else { "artifacts" };
    match &report.failure {
        None => format!("Deployed {count} {plural} for version {}", report.version),
        Some(failure) => format!(
            "Deployed {count} {plural} for version {}; stopped at {} ({}), {} not attempted",
            report.version,
            failure.artifact_id,
            failure.status,
            report.not_attempted.len()
        ),
    }
}
