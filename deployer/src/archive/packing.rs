//! Directory-to-zip packing.
//!
//! Packs every regular file below a source directory into a single zip
//! archive. Entries are stored with forward-slash names relative to the
//! source root, sorted by name, and stamped with the zip epoch so identical
//! trees always produce identical archives.

use super::error::ArchiveError;
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// A file scheduled for packing: its stored entry name and its location on
/// disk.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PackEntry {
    name: String,
    source: Utf8PathBuf,
}

/// Pack the contents of `source_dir` into a zip archive at `archive_path`.
///
/// Directories are not stored as entries; they are implied by the file
/// names. An existing file at `archive_path` is truncated. A partially
/// written archive is left in place on failure.
///
/// Returns the number of entries written.
///
/// # Errors
///
/// Returns [`ArchiveError::Walk`] if the source tree cannot be traversed,
/// [`ArchiveError::Io`] if any file cannot be read or the archive cannot be
/// written, and [`ArchiveError::Zip`] on zip container failures.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use gradle_deployer::archive::pack_directory;
///
/// let temp = tempfile::tempdir().expect("temp dir");
/// let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("utf8 path");
/// let tree = root.join("tree");
/// std::fs::create_dir_all(tree.join("org/example")).expect("mkdir");
/// std::fs::write(tree.join("org/example/Main.java"), b"class Main {}").expect("write");
///
/// let count = pack_directory(&tree, &root.join("out.jar")).expect("pack");
/// assert_eq!(count, 1);
/// ```
pub fn pack_directory(
    source_dir: &Utf8Path,
    archive_path: &Utf8Path,
) -> Result<usize, ArchiveError> {
    let entries = collect_entries(source_dir)?;

    let file = File::create(archive_path).map_err(|e| ArchiveError::io(archive_path, e))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = entry_options();

    for entry in &entries {
        writer
            .start_file(entry.name.as_str(), options)
            .map_err(|e| ArchiveError::zip(archive_path, e))?;
        let mut input =
            File::open(&entry.source).map_err(|e| ArchiveError::io(&entry.source, e))?;
        io::copy(&mut input, &mut writer).map_err(|e| ArchiveError::io(&entry.source, e))?;
        trace!("packed {} into {archive_path}", entry.name);
    }

    let mut output = writer
        .finish()
        .map_err(|e| ArchiveError::zip(archive_path, e))?;
    output.flush().map_err(|e| ArchiveError::io(archive_path, e))?;

    Ok(entries.len())
}

/// Options shared by every entry: deflated, with a fixed timestamp.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

/// Walk `source_dir` and return its regular files sorted by entry name.
///
/// Symlinks are followed; a linked file is stored under the link's name
/// with the target's bytes.
fn collect_entries(source_dir: &Utf8Path) -> Result<Vec<PackEntry>, ArchiveError> {
    let mut entries = Vec::new();

    for item in WalkDir::new(source_dir).follow_links(true) {
        let item = item.map_err(|source| ArchiveError::Walk {
            root: source_dir.to_owned(),
            source,
        })?;
        if !item.file_type().is_file() {
            continue;
        }

        let source = Utf8PathBuf::try_from(item.into_path()).map_err(|e| {
            ArchiveError::NonUtf8Path {
                root: source_dir.to_owned(),
                path: e.as_path().display().to_string(),
            }
        })?;
        let name = entry_name(source_dir, &source);
        entries.push(PackEntry { name, source });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Compute the forward-slash entry name of `file` relative to `root`.
///
/// `WalkDir` only yields paths below `root`, so the prefix always strips.
fn entry_name(root: &Utf8Path, file: &Utf8Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let segments: Vec<&str> = relative.components().map(|c| c.as_str()).collect();
    segments.join("/")
}

#[cfg(test)]
#[path = "packing_tests.rs"]
mod tests;
