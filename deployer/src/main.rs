//! Gradle deployer CLI entrypoint.
//!
//! This binary downloads a Gradle distribution, repackages it as Maven
//! artifacts, and deploys them with the Maven installation named by
//! `MAVEN_HOME` or the positional argument.

use camino::Utf8Path;
use clap::Parser;
use gradle_deployer::cli::Cli;
use gradle_deployer::config::{DeployerConfig, resolve_maven_home};
use gradle_deployer::deploy::{SystemCommandExecutor, mvn_command};
use gradle_deployer::download::HttpDownloader;
use gradle_deployer::error::Result;
use gradle_deployer::output::{deployment_summary, write_stderr_line};
use gradle_deployer::pipeline::{Collaborators, PipelineContext, run_pipeline};
use gradle_deployer::workspace::WorkspaceLayout;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let config = load_config(cli)?;
    let maven_home = resolve_maven_home(cli.maven_home.as_deref())?;
    let deploy_command = mvn_command(&maven_home);
    let workspace = WorkspaceLayout::new(cli.workspace.clone());

    if cli.dry_run {
        print_dry_run_info(cli, &config, &deploy_command, stderr);
        return Ok(());
    }

    let context = PipelineContext {
        config: &config,
        workspace: &workspace,
        deploy_command: &deploy_command,
        failure_policy: cli.failure_policy(),
        quiet: cli.quiet,
    };
    let post_process = cli.strategy.build(&config);
    let collaborators = Collaborators {
        downloader: &HttpDownloader,
        executor: &SystemCommandExecutor,
        post_process: post_process.as_ref(),
    };

    let report = run_pipeline(&context, &collaborators, stderr)?;
    if !cli.quiet {
        write_stderr_line(stderr, deployment_summary(&report));
    }
    Ok(())
}

/// Loads the configuration file, if any, and applies CLI overrides.
fn load_config(cli: &Cli) -> Result<DeployerConfig> {
    let mut config = DeployerConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.distribution_url {
        config.distribution_url.clone_from(url);
    }
    Ok(config)
}

/// Prints the resolved settings without side effects.
fn print_dry_run_info(
    cli: &Cli,
    config: &DeployerConfig,
    deploy_command: &Utf8Path,
    stderr: &mut dyn Write,
) {
    write_stderr_line(stderr, "Dry run - no files will be modified");
    write_stderr_line(stderr, "");
    write_stderr_line(stderr, format!("Distribution: {}", config.distribution_url));
    write_stderr_line(stderr, format!("Workspace: {}", cli.workspace));
    write_stderr_line(stderr, format!("Deploy command: {deploy_command}"));
    write_stderr_line(stderr, format!("Strategy: {}", cli.strategy.build(config).name()));
    write_stderr_line(
        stderr,
        format!(
            "Repository: {} ({})",
            config.repository.id, config.repository.url
        ),
    );
    write_stderr_line(stderr, format!("Group: {}", config.repository.group_id));
    write_stderr_line(stderr, format!("Strict: {}", cli.strict));
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use gradle_deployer::config::MAVEN_HOME_ENV;
    use gradle_deployer::error::DeployerError;
    use gradle_deployer::strategy::Strategy;
    use rstest::rstest;

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let mut stderr = Vec::new();
        let exit_code =
            exit_code_for_run_result(Err(DeployerError::DeployerHomeMissing), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains(MAVEN_HOME_ENV));
    }

    #[test]
    fn load_config_applies_distribution_url_override() {
        let cli = Cli {
            distribution_url: Some("https://example.test/gradle-8.1-all.zip".to_owned()),
            ..Cli::default()
        };

        let config = load_config(&cli).expect("defaults load");
        assert_eq!(
            config.distribution_url,
            "https://example.test/gradle-8.1-all.zip"
        );
    }

    #[rstest]
    #[case::independent(Strategy::Independent, "Strategy: independent")]
    #[case::fat_merge(Strategy::FatMerge, "Strategy: fat-merge")]
    fn dry_run_reports_settings_without_touching_workspace(
        #[case] strategy: Strategy,
        #[case] expected: &str,
    ) {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let workspace =
            Utf8PathBuf::try_from(temp.path().join("build")).expect("utf8 workspace path");
        let cli = Cli {
            maven_home: Some(Utf8PathBuf::from("/opt/maven")),
            strategy,
            workspace: workspace.clone(),
            dry_run: true,
            ..Cli::default()
        };

        let mut stderr = Vec::new();
        temp_env::with_var_unset(MAVEN_HOME_ENV, || {
            run(&cli, &mut stderr).expect("dry run succeeds");
        });

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("Dry run - no files will be modified"));
        assert!(stderr_text.contains(expected));
        assert!(stderr_text.contains("Deploy command: /opt/maven/bin/mvn"));
        assert!(!workspace.exists());
    }

    #[test]
    fn run_fails_without_maven_home() {
        let cli = Cli {
            dry_run: true,
            ..Cli::default()
        };

        let mut stderr = Vec::new();
        let result = temp_env::with_var_unset(MAVEN_HOME_ENV, || run(&cli, &mut stderr));
        assert!(matches!(result, Err(DeployerError::DeployerHomeMissing)));
    }
}
