//! Selective zip extraction.
//!
//! Extracts a zip archive into a destination directory, consulting a skip
//! predicate for every stored entry name before any bytes are written.
//! Files landing on an existing path are overwritten, so when several
//! archives are unpacked into the same directory the last writer wins.

use super::error::ArchiveError;
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use zip::ZipArchive;

/// Counts produced by a single [`unpack_archive`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnpackSummary {
    /// Number of file entries written to disk.
    pub extracted: usize,
    /// Number of entries rejected by the skip predicate.
    pub skipped: usize,
}

/// Extract `archive_path` into `dest_dir`, omitting entries for which `skip`
/// returns `true`.
///
/// The predicate sees the raw stored entry name (forward slashes, as written
/// in the archive). Directory entries create the matching directory if it
/// is missing; file entries create their parent chain and then replace any
/// existing file.
///
/// # Errors
///
/// Returns [`ArchiveError::UnsafeEntry`] if a retained entry would escape
/// `dest_dir`, [`ArchiveError::Zip`] if the archive is malformed, and
/// [`ArchiveError::Io`] on filesystem failures.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use gradle_deployer::archive::unpack_archive;
///
/// let summary = unpack_archive(
///     Utf8Path::new("build/gradle-distribution.zip"),
///     Utf8Path::new("build/extract"),
///     |name| name.contains("examples"),
/// )?;
/// println!("extracted {} entries", summary.extracted);
/// # Ok::<(), gradle_deployer::archive::ArchiveError>(())
/// ```
pub fn unpack_archive<F>(
    archive_path: &Utf8Path,
    dest_dir: &Utf8Path,
    skip: F,
) -> Result<UnpackSummary, ArchiveError>
where
    F: Fn(&str) -> bool,
{
    let file = File::open(archive_path).map_err(|e| ArchiveError::io(archive_path, e))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| ArchiveError::zip(archive_path, e))?;
    let mut summary = UnpackSummary::default();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| ArchiveError::zip(archive_path, e))?;
        let name = entry.name().to_owned();

        if skip(&name) {
            trace!("skipping {name} from {archive_path}");
            summary.skipped += 1;
            continue;
        }

        let enclosed = entry.enclosed_name();
        let relative = enclosed_path(enclosed.as_deref()).ok_or_else(|| {
            ArchiveError::UnsafeEntry {
                archive: archive_path.to_owned(),
                name: name.clone(),
            }
        })?;
        let target = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| ArchiveError::io(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| ArchiveError::io(parent, e))?;
        }
        write_entry(&mut entry, &target)?;
        summary.extracted += 1;
    }

    Ok(summary)
}

/// Convert an entry's enclosed name to a UTF-8 path.
///
/// `enclosed_name` already refuses absolute names and `..` components.
fn enclosed_path(enclosed: Option<&Path>) -> Option<Utf8PathBuf> {
    enclosed.and_then(|path| Utf8PathBuf::try_from(path.to_path_buf()).ok())
}

/// Stream one entry's content to `target`, truncating any existing file.
fn write_entry(entry: &mut impl io::Read, target: &Utf8Path) -> Result<(), ArchiveError> {
    let file = File::create(target).map_err(|e| ArchiveError::io(target, e))?;
    let mut output = BufWriter::new(file);
    io::copy(entry, &mut output).map_err(|e| ArchiveError::io(target, e))?;
    output.flush().map_err(|e| ArchiveError::io(target, e))
}

#[cfg(test)]
#[path = "unpacking_tests.rs"]
mod tests;
