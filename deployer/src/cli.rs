//! CLI argument definitions for the Gradle deployer.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::pipeline::FailurePolicy;
use crate::strategy::Strategy;
use crate::workspace::DEFAULT_WORKSPACE;
use camino::Utf8PathBuf;
use clap::Parser;

/// Repackage a Gradle distribution as Maven artifacts and deploy them.
#[derive(Parser, Debug, Clone)]
#[command(name = "gradle-deployer")]
#[command(version, about)]
#[command(long_about = concat!(
    "Repackage a Gradle distribution as Maven artifacts and deploy them.\n\n",
    "The distribution is downloaded into a scratch workspace, extracted, and ",
    "every `gradle-*.jar` under `lib/` becomes one artifact. When the ",
    "distribution ships `src/`, each component's sources are packed into a ",
    "sources jar. Artifacts are then published one by one with ",
    "`mvn deploy:deploy-file`.\n\n",
    "The Maven installation is taken from MAVEN_HOME when set, otherwise from ",
    "the positional argument.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Deploy each component separately:\n",
    "    $ gradle-deployer /opt/maven\n\n",
    "  Deploy one consolidated artifact:\n",
    "    $ gradle-deployer --strategy fat-merge /opt/maven\n\n",
    "  Preview the run without side effects:\n",
    "    $ gradle-deployer --dry-run /opt/maven",
))]
pub struct Cli {
    /// Maven installation directory (MAVEN_HOME takes precedence).
    #[arg(value_name = "MAVEN_HOME")]
    pub maven_home: Option<Utf8PathBuf>,

    /// Post-processing applied before deployment.
    #[arg(short, long, value_enum, default_value_t = Strategy::Independent)]
    pub strategy: Strategy,

    /// TOML file overriding the built-in deployment settings.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Scratch workspace, wiped at the start of every run.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_WORKSPACE)]
    pub workspace: Utf8PathBuf,

    /// Override the distribution download URL.
    #[arg(long, value_name = "URL")]
    pub distribution_url: Option<String>,

    /// Exit non-zero when an artifact fails to deploy.
    #[arg(long)]
    pub strict: bool,

    /// Suppress progress output (warnings and errors still shown).
    #[arg(short, long)]
    pub quiet: bool,

    /// Show the resolved settings and exit without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// The failure policy selected by `--strict`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use gradle_deployer::cli::Cli;
    /// use gradle_deployer::pipeline::FailurePolicy;
    ///
    /// let cli = Cli::parse_from(["gradle-deployer", "--strict"]);
    /// assert_eq!(cli.failure_policy(), FailurePolicy::Propagate);
    /// ```
    #[must_use]
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.strict {
            FailurePolicy::Propagate
        } else {
            FailurePolicy::StopSilently
        }
    }
}

impl Default for Cli {
    /// Creates a `Cli` matching an invocation with no arguments.
    fn default() -> Self {
        Self {
            maven_home: None,
            strategy: Strategy::default(),
            config: None,
            workspace: Utf8PathBuf::from(DEFAULT_WORKSPACE),
            distribution_url: None,
            strict: false,
            quiet: false,
            dry_run: false,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
