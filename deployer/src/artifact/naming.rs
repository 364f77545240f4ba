//! Naming rules connecting component jars, source trees and Maven ids.
//!
//! Gradle ships components as `<prefix><component>-<version>.jar` under
//! `lib/`, their sources as `src/<component>/`, and unpacks to a directory
//! named `<prefix><version>`. Every rule here is plain string surgery on
//! those names; the global version is assumed to match every jar.

use std::fmt;

const JAR_EXTENSION: &str = ".jar";
const SOURCES_SUFFIX: &str = "-sources.jar";

/// Naming policy parameterised by the distribution prefix (`gradle-`).
///
/// # Examples
///
/// ```
/// use gradle_deployer::artifact::ArtifactNaming;
///
/// let naming = ArtifactNaming::new("gradle-");
/// assert_eq!(naming.version_from_distribution("gradle-8.0.2"), Some("8.0.2"));
/// assert_eq!(naming.component_id("gradle-core-api-8.0.2.jar", "8.0.2"), Some("core-api"));
/// assert_eq!(naming.publish_id("gradle-core-api-8.0.2.jar", "8.0.2"), "gradle-core-api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNaming {
    prefix: String,
}

impl ArtifactNaming {
    /// Create a policy for the given prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Return the configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Derive the global version from the distribution directory name.
    ///
    /// A name without the prefix is taken whole. Returns `None` only when
    /// nothing is left, i.e. the name is empty or equal to the prefix.
    #[must_use]
    pub fn version_from_distribution<'a>(&self, directory_name: &'a str) -> Option<&'a str> {
        let version = directory_name
            .strip_prefix(self.prefix.as_str())
            .unwrap_or(directory_name);
        (!version.is_empty()).then_some(version)
    }

    /// Returns true for file names shaped like a component jar.
    #[must_use]
    pub fn is_component_jar(&self, file_name: &str) -> bool {
        file_name.starts_with(self.prefix.as_str()) && file_name.ends_with(JAR_EXTENSION)
    }

    /// Derive the bare component id (`core-api`) from a jar file name.
    ///
    /// A trailing `-<version>` is stripped when present; a jar built with a
    /// different version keeps its own suffix and will not match a source
    /// directory. Returns `None` when the name is not a component jar.
    #[must_use]
    pub fn component_id<'a>(&self, jar_file_name: &'a str, version: &str) -> Option<&'a str> {
        let stem = jar_file_name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(JAR_EXTENSION)?;
        let versioned = format!("-{version}");
        Some(stem.strip_suffix(versioned.as_str()).unwrap_or(stem))
    }

    /// File name of the sources jar packed for a component.
    #[must_use]
    pub fn sources_jar_name(&self, component: &str, version: &str) -> String {
        format!("{}{component}-{version}{SOURCES_SUFFIX}", self.prefix)
    }

    /// Derive the published artifact id by removing `-<version>.jar`.
    ///
    /// Names without that suffix are returned unchanged.
    #[must_use]
    pub fn publish_id(&self, binary_file_name: &str, version: &str) -> String {
        let suffix = format!("-{version}{JAR_EXTENSION}");
        binary_file_name
            .strip_suffix(suffix.as_str())
            .unwrap_or(binary_file_name)
            .to_owned()
    }
}

/// File names of the consolidated artifact pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatArtifactName<'a> {
    base: &'a str,
    version: &'a str,
}

impl<'a> FatArtifactName<'a> {
    /// Create the name pair for `base` at `version`.
    #[must_use]
    pub fn new(base: &'a str, version: &'a str) -> Self {
        Self { base, version }
    }

    /// Binary jar file name: `<base>-<version>.jar`.
    #[must_use]
    pub fn binary(&self) -> String {
        self.to_string()
    }

    /// Sources jar file name: `<base>-<version>-sources.jar`.
    #[must_use]
    pub fn sources(&self) -> String {
        format!("{}-{}{SOURCES_SUFFIX}", self.base, self.version)
    }
}

impl fmt::Display for FatArtifactName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}{JAR_EXTENSION}", self.base, self.version)
    }
}
