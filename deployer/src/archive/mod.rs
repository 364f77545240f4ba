//! Zip archive codec: selective extraction and directory packing.
//!
//! # Sub-modules
//!
//! - [`error`] - Error type shared by packing and unpacking.
//! - [`packing`] - Deterministic directory-to-zip packing.
//! - [`unpacking`] - Predicate-filtered extraction.

pub mod error;
pub mod packing;
pub mod unpacking;

pub use error::ArchiveError;
pub use packing::pack_directory;
pub use unpacking::{UnpackSummary, unpack_archive};

/// A skip predicate that never excludes an entry.
#[must_use]
pub fn keep_all(_name: &str) -> bool {
    false
}
