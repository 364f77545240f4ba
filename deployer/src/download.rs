//! Distribution download.
//!
//! Provides a trait-based abstraction for fetching the distribution zip so
//! the pipeline can be exercised without network access.

use camino::Utf8Path;
use log::debug;
use std::sync::OnceLock;
use std::time::Duration;

/// Connection timeout for the distribution download. The body itself is
/// allowed as long as it needs; distributions run to hundreds of megabytes.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for downloading the distribution archive.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use gradle_deployer::download::{DistributionDownloader, HttpDownloader};
///
/// HttpDownloader.download(
///     "https://services.gradle.org/distributions/gradle-8.0.2-all.zip",
///     Utf8Path::new("build/gradle-distribution.zip"),
/// )?;
/// # Ok::<(), gradle_deployer::download::DownloadError>(())
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait DistributionDownloader {
    /// Download `url` into the file at `dest`, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the file cannot be written.
    fn download(&self, url: &str, dest: &Utf8Path) -> Result<(), DownloadError>;
}

/// Errors arising from the distribution download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The distribution was not found (HTTP 404).
    #[error("distribution not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// I/O error writing the downloaded file.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP-based downloader using `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpDownloader;

impl DistributionDownloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Utf8Path) -> Result<(), DownloadError> {
        debug!("GET {url} -> {dest}");
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut file = std::fs::File::create(dest)?;
        std::io::copy(&mut response.into_body().as_reader(), &mut file)
            .map_err(DownloadError::Io)?;
        Ok(())
    }
}

/// Shared `ureq` agent with connection timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_connect(Some(CONNECT_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`DownloadError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(404) => DownloadError::NotFound {
            url: url.to_owned(),
        },
        other => DownloadError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
