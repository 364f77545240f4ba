//! Error types for zip packing and unpacking.
//!
//! Every variant names the archive or file that triggered the failure so the
//! caller can report it without extra context.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Errors arising from archive codec operations.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Reading or writing a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The file or directory being accessed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The zip container could not be read or written.
    #[error("zip error in {archive}: {source}")]
    Zip {
        /// The archive being processed.
        archive: Utf8PathBuf,
        /// The underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry name is absolute or climbs out of the destination.
    #[error("unsafe entry \"{name}\" in {archive}")]
    UnsafeEntry {
        /// The archive holding the entry.
        archive: Utf8PathBuf,
        /// The stored entry name.
        name: String,
    },

    /// Walking the source directory failed.
    #[error("failed to walk {root}: {source}")]
    Walk {
        /// The directory being packed.
        root: Utf8PathBuf,
        /// The underlying traversal error.
        #[source]
        source: walkdir::Error,
    },

    /// A path under the source directory is not valid UTF-8.
    #[error("path under {root} is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// The directory being packed or unpacked into.
        root: Utf8PathBuf,
        /// Lossy rendering of the offending path.
        path: String,
    },
}

impl ArchiveError {
    pub(crate) fn io(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }

    pub(crate) fn zip(archive: &Utf8Path, source: zip::result::ZipError) -> Self {
        Self::Zip {
            archive: archive.to_owned(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsafe_entry_names_archive_and_entry() {
        let err = ArchiveError::UnsafeEntry {
            archive: Utf8PathBuf::from("/tmp/evil.zip"),
            name: "../escape.txt".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("evil.zip"));
        assert!(msg.contains("../escape.txt"));
    }

    #[test]
    fn io_error_preserves_source() {
        let err = ArchiveError::io(
            Utf8Path::new("/tmp/out.jar"),
            std::io::Error::other("disk full"),
        );
        assert!(err.to_string().contains("/tmp/out.jar"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
