//! Maven deploy invocation.
//!
//! Each artifact is published by running `mvn deploy:deploy-file` with the
//! artifact's coordinates and file paths. The process inherits the
//! deployer's standard streams; only its exit status is inspected.

use crate::config::RepositoryConfig;
use crate::error::{DeployerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::process::{Command, ExitStatus};

/// The Maven goal used for every artifact.
const DEPLOY_GOAL: &str = "deploy:deploy-file";

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments, inheriting stdio, and waits for it to
    /// exit.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning the command.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gradle_deployer::deploy::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let status = executor.run("mvn", &["--version".to_owned()])?;
    /// assert!(status.success());
    /// # Ok::<(), gradle_deployer::error::DeployerError>(())
    /// ```
    fn run(&self, cmd: &str, args: &[String]) -> Result<ExitStatus>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[String]) -> Result<ExitStatus> {
        Command::new(cmd)
            .args(args)
            .status()
            .map_err(DeployerError::from)
    }
}

/// Path to the `mvn` launcher inside a Maven installation.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use gradle_deployer::deploy::mvn_command;
///
/// let command = mvn_command(Utf8Path::new("/opt/maven"));
/// assert!(command.as_str().starts_with("/opt/maven/bin/mvn"));
/// ```
#[must_use]
pub fn mvn_command(maven_home: &Utf8Path) -> Utf8PathBuf {
    let launcher = if cfg!(windows) { "mvn.cmd" } else { "mvn" };
    maven_home.join("bin").join(launcher)
}

/// One `deploy:deploy-file` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest<'a> {
    /// Published artifact id.
    pub artifact_id: &'a str,
    /// Published version.
    pub version: &'a str,
    /// Absolute path to the binary jar.
    pub file: &'a Utf8Path,
    /// Absolute path to the sources jar, if any.
    pub sources: Option<&'a Utf8Path>,
    /// Target repository coordinates.
    pub repository: &'a RepositoryConfig,
}

impl DeployRequest<'_> {
    /// Render the Maven arguments for this request.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use gradle_deployer::config::RepositoryConfig;
    /// use gradle_deployer::deploy::DeployRequest;
    ///
    /// let repository = RepositoryConfig::default();
    /// let request = DeployRequest {
    ///     artifact_id: "gradle-core",
    ///     version: "8.0",
    ///     file: Utf8Path::new("/build/lib/gradle-core-8.0.jar"),
    ///     sources: None,
    ///     repository: &repository,
    /// };
    /// let args = request.arguments();
    /// assert_eq!(args.first().map(String::as_str), Some("deploy:deploy-file"));
    /// assert!(args.contains(&"-DartifactId=gradle-core".to_owned()));
    /// ```
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        let mut args = vec![
            DEPLOY_GOAL.to_owned(),
            format!("-DgroupId={}", self.repository.group_id),
            format!("-DartifactId={}", self.artifact_id),
            format!("-Dversion={}", self.version),
            format!("-Dpackaging={}", self.repository.packaging),
            format!("-DrepositoryId={}", self.repository.id),
            format!("-Durl={}", self.repository.url),
            format!("-Dfile={}", self.file),
        ];
        if let Some(sources) = self.sources {
            args.push(format!("-Dsources={sources}"));
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repository() -> RepositoryConfig {
        RepositoryConfig::default()
    }

    #[rstest]
    fn arguments_follow_deploy_file_order(repository: RepositoryConfig) {
        let request = DeployRequest {
            artifact_id: "gradle-core",
            version: "8.0",
            file: Utf8Path::new("/w/lib/gradle-core-8.0.jar"),
            sources: Some(Utf8Path::new("/w/src/gradle-core-8.0-sources.jar")),
            repository: &repository,
        };

        assert_eq!(
            request.arguments(),
            vec![
                "deploy:deploy-file",
                "-DgroupId=consulo.internal.gradle.plugin",
                "-DartifactId=gradle-core",
                "-Dversion=8.0",
                "-Dpackaging=jar",
                "-DrepositoryId=consulo",
                "-Durl=https://maven.consulo.io/repository/snapshots/",
                "-Dfile=/w/lib/gradle-core-8.0.jar",
                "-Dsources=/w/src/gradle-core-8.0-sources.jar",
            ]
        );
    }

    #[rstest]
    fn sources_flag_is_omitted_without_sources(repository: RepositoryConfig) {
        let request = DeployRequest {
            artifact_id: "gradle-launcher",
            version: "8.0",
            file: Utf8Path::new("/w/lib/gradle-launcher-8.0.jar"),
            sources: None,
            repository: &repository,
        };

        let args = request.arguments();
        assert_eq!(args.len(), 8);
        assert!(!args.iter().any(|arg| arg.starts_with("-Dsources=")));
    }

    #[rstest]
    fn paths_with_spaces_stay_single_arguments(repository: RepositoryConfig) {
        let request = DeployRequest {
            artifact_id: "gradle-core",
            version: "8.0",
            file: Utf8Path::new("/home/me/My Builds/gradle-core-8.0.jar"),
            sources: None,
            repository: &repository,
        };

        assert!(
            request
                .arguments()
                .contains(&"-Dfile=/home/me/My Builds/gradle-core-8.0.jar".to_owned())
        );
    }

    #[cfg(unix)]
    #[test]
    fn mvn_command_points_into_bin() {
        assert_eq!(
            mvn_command(Utf8Path::new("/opt/maven")),
            Utf8PathBuf::from("/opt/maven/bin/mvn")
        );
    }

    #[cfg(unix)]
    #[test]
    fn system_executor_reports_exit_status() {
        let executor = SystemCommandExecutor;
        let ok = executor.run("true", &[]).expect("spawn true");
        let failed = executor.run("false", &[]).expect("spawn false");
        assert!(ok.success());
        assert!(!failed.success());
    }
}
