//! Gradle distribution deployer library.
//!
//! This crate downloads a Gradle binary distribution, repackages its
//! component jars (and their sources) as Maven artifacts, and publishes
//! them through `mvn deploy:deploy-file`. It is used by the
//! `gradle-deployer` CLI binary and can be driven programmatically with
//! stubbed collaborators for testing.
//!
//! # Modules
//!
//! - [`archive`] - Zip packing and unpacking with entry filters
//! - [`artifact`] - Artifact records and naming rules
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Deployment constants and Maven home resolution
//! - [`deploy`] - Maven deploy command construction and execution
//! - [`download`] - Distribution download over HTTP
//! - [`error`] - Error types for the whole run
//! - [`output`] - Progress lines and run summaries
//! - [`pipeline`] - End-to-end orchestration
//! - [`scanner`] - Component and source discovery in a distribution
//! - [`strategy`] - Post-processing of the working set
//! - [`workspace`] - Scratch workspace layout and resets

pub mod archive;
pub mod artifact;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod download;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod scanner;
pub mod strategy;
pub mod workspace;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
