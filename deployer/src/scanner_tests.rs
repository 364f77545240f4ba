//! Unit tests for distribution scanning.

use super::*;
use crate::test_utils::{write_zip, zip_entries};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    extract: Utf8PathBuf,
    naming: ArtifactNaming,
}

impl Fixture {
    fn distribution_root(&self) -> Utf8PathBuf {
        self.extract.join("gradle-8.0")
    }

    fn add_jar(&self, relative: &str) {
        let path = self.distribution_root().join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        write_zip(&path, &[("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0")]);
    }

    fn add_source(&self, relative: &str, content: &[u8]) {
        let path = self.distribution_root().join("src").join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write source");
    }

    fn distribution(&self) -> Distribution {
        Distribution::from_root(self.distribution_root(), &self.naming).expect("distribution")
    }
}

#[fixture]
fn fixture() -> Fixture {
    let temp = TempDir::new().expect("temp dir");
    let extract = Utf8PathBuf::try_from(temp.path().join("extract")).expect("utf8 path");
    fs::create_dir_all(&extract).expect("mkdir extract");
    Fixture {
        _temp: temp,
        extract,
        naming: ArtifactNaming::new("gradle-"),
    }
}

fn file_names(outcome: &ScanOutcome) -> Vec<String> {
    outcome
        .artifacts
        .iter()
        .map(|a| a.binary_file_name().to_owned())
        .collect()
}

#[rstest]
fn discovers_only_prefixed_jars(fixture: Fixture) {
    fixture.add_jar("lib/gradle-core-8.0.jar");
    fixture.add_jar("lib/gradle-base-services-8.0.jar");
    fixture.add_jar("lib/groovy-3.0.13.jar");
    fs::write(fixture.distribution_root().join("lib/gradle-notes.txt"), b"x").expect("write");

    let outcome = DistributionScanner::new(&fixture.naming)
        .scan(&fixture.distribution())
        .expect("scan");

    assert_eq!(
        file_names(&outcome),
        vec!["gradle-base-services-8.0.jar", "gradle-core-8.0.jar"]
    );
    assert!(!outcome.has_source_tree);
}

#[cfg(unix)]
#[rstest]
fn discovers_symlinked_jars(fixture: Fixture) {
    fixture.add_jar("lib/gradle-core-8.0.jar");
    let shared = fixture.extract.join("gradle-base-8.0.jar");
    write_zip(&shared, &[("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0")]);
    let link = fixture.distribution_root().join("lib/gradle-base-8.0.jar");
    std::os::unix::fs::symlink(&shared, link).expect("symlink");

    let outcome = DistributionScanner::new(&fixture.naming)
        .scan(&fixture.distribution())
        .expect("scan");

    assert_eq!(
        file_names(&outcome),
        vec!["gradle-base-8.0.jar", "gradle-core-8.0.jar"]
    );
}

#[rstest]
fn discovers_jars_in_nested_plugin_directories(fixture: Fixture) {
    fixture.add_jar("lib/gradle-core-8.0.jar");
    fixture.add_jar("lib/plugins/gradle-plugins-8.0.jar");

    let outcome = DistributionScanner::new(&fixture.naming)
        .scan(&fixture.distribution())
        .expect("scan");

    assert_eq!(outcome.artifacts.len(), 2);
    assert!(
        file_names(&outcome)
            .iter()
            .any(|name| name == "gradle-plugins-8.0.jar")
    );
}

#[rstest]
fn packs_matching_source_tree(fixture: Fixture) {
    fixture.add_jar("lib/gradle-core-api-8.0.jar");
    fixture.add_source("core-api/org/gradle/api/Project.java", b"interface Project {}");

    let outcome = DistributionScanner::new(&fixture.naming)
        .scan(&fixture.distribution())
        .expect("scan");

    let artifact = outcome.artifacts.first().expect("one artifact");
    let sources = artifact.sources().expect("sources attached");
    assert_eq!(
        sources,
        fixture
            .distribution_root()
            .join("src/gradle-core-api-8.0-sources.jar")
    );
    assert_eq!(zip_entries(sources), vec!["org/gradle/api/Project.java"]);
    assert!(outcome.has_source_tree);
}

#[rstest]
fn component_without_source_tree_has_no_sources(fixture: Fixture) {
    fixture.add_jar("lib/gradle-core-8.0.jar");
    fixture.add_jar("lib/gradle-launcher-8.0.jar");
    fixture.add_source("core/org/gradle/Core.java", b"class Core {}");

    let outcome = DistributionScanner::new(&fixture.naming)
        .scan(&fixture.distribution())
        .expect("scan");

    let by_name = |name: &str| {
        outcome
            .artifacts
            .iter()
            .find(|a| a.binary_file_name() == name)
            .expect("artifact present")
    };
    assert!(by_name("gradle-core-8.0.jar").sources().is_some());
    assert!(by_name("gradle-launcher-8.0.jar").sources().is_none());
}

#[rstest]
fn stale_sources_jar_is_replaced(fixture: Fixture) {
    fixture.add_jar("lib/gradle-core-8.0.jar");
    fixture.add_source("core/Fresh.java", b"fresh");
    let stale = fixture
        .distribution_root()
        .join("src/gradle-core-8.0-sources.jar");
    write_zip(&stale, &[("Stale.java", b"stale")]);

    DistributionScanner::new(&fixture.naming)
        .scan(&fixture.distribution())
        .expect("scan");

    assert_eq!(zip_entries(&stale), vec!["Fresh.java"]);
}

#[rstest]
fn missing_lib_directory_is_fatal(fixture: Fixture) {
    fs::create_dir_all(fixture.distribution_root()).expect("mkdir");

    let err = DistributionScanner::new(&fixture.naming)
        .scan(&fixture.distribution())
        .expect_err("no lib dir");

    assert!(matches!(err, DeployerError::MissingLibDirectory { .. }));
}

#[rstest]
fn locate_distribution_returns_first_directory(fixture: Fixture) {
    fs::create_dir_all(fixture.distribution_root()).expect("mkdir");
    fs::write(fixture.extract.join("README"), b"not a directory").expect("write");

    let root = locate_distribution(&fixture.extract).expect("located");

    assert_eq!(root, fixture.distribution_root());
}

#[rstest]
fn locate_distribution_fails_on_empty_extract(fixture: Fixture) {
    let err = locate_distribution(&fixture.extract).expect_err("empty extract dir");
    assert!(matches!(err, DeployerError::DistributionNotFound { .. }));
}

#[rstest]
fn distribution_version_comes_from_directory_name(fixture: Fixture) {
    let distribution = fixture.distribution();
    assert_eq!(distribution.version(), "8.0");
    assert_eq!(distribution.lib_dir(), fixture.distribution_root().join("lib"));
}

#[rstest]
fn unprefixed_directory_name_is_taken_as_version(fixture: Fixture) {
    let distribution =
        Distribution::from_root(fixture.extract.join("maven-3.9.0"), &fixture.naming)
            .expect("unprefixed name");
    assert_eq!(distribution.version(), "maven-3.9.0");
}

#[rstest]
fn directory_named_after_prefix_is_rejected(fixture: Fixture) {
    let err = Distribution::from_root(fixture.extract.join("gradle-"), &fixture.naming)
        .expect_err("no version left");
    assert!(matches!(
        err,
        DeployerError::InvalidDistributionName { ref name, .. } if name == "gradle-"
    ));
}
