//! Unit tests for selective extraction.

use super::*;
use crate::archive::keep_all;
use crate::test_utils::write_zip;
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("temp dir creation succeeds")
}

fn utf8_root(temp_dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).expect("utf8 temp path")
}

#[rstest]
fn skip_predicate_excludes_matching_entries(temp_dir: TempDir) {
    let root = utf8_root(&temp_dir);
    let archive = root.join("dist.zip");
    write_zip(&archive, &[("a/b.txt", b"keep"), ("examples/c.txt", b"drop")]);

    let dest = root.join("out");
    let summary =
        unpack_archive(&archive, &dest, |name| name.contains("examples")).expect("unpack");

    assert_eq!(
        summary,
        UnpackSummary {
            extracted: 1,
            skipped: 1
        }
    );
    assert_eq!(fs::read(dest.join("a/b.txt")).expect("read"), b"keep");
    assert!(!dest.join("examples").exists());
}

#[rstest]
fn predicate_sees_raw_forward_slash_names(temp_dir: TempDir) {
    let root = utf8_root(&temp_dir);
    let archive = root.join("lib.jar");
    write_zip(
        &archive,
        &[
            ("org/slf4j/impl/StaticLoggerBinder.class", b"impl"),
            ("org/gradle/Main.class", b"main"),
        ],
    );

    let dest = root.join("out");
    unpack_archive(&archive, &dest, |name| name.starts_with("org/slf4j/")).expect("unpack");

    assert!(dest.join("org/gradle/Main.class").exists());
    assert!(!dest.join("org/slf4j").exists());
}

#[rstest]
fn existing_files_are_overwritten(temp_dir: TempDir) {
    let root = utf8_root(&temp_dir);
    let first = root.join("first.jar");
    let second = root.join("second.jar");
    write_zip(&first, &[("p/x", b"from first")]);
    write_zip(&second, &[("p/x", b"from second")]);

    let dest = root.join("merged");
    unpack_archive(&first, &dest, keep_all).expect("first unpack");
    unpack_archive(&second, &dest, keep_all).expect("second unpack");

    assert_eq!(fs::read(dest.join("p/x")).expect("read"), b"from second");
}

#[rstest]
fn directory_entries_are_created_idempotently(temp_dir: TempDir) {
    let root = utf8_root(&temp_dir);
    let archive = root.join("dirs.zip");
    write_zip(&archive, &[("docs/", b""), ("docs/guide.txt", b"guide")]);

    let dest = root.join("out");
    fs::create_dir_all(dest.join("docs")).expect("pre-create");
    let summary = unpack_archive(&archive, &dest, keep_all).expect("unpack");

    assert_eq!(summary.extracted, 1);
    assert!(dest.join("docs").is_dir());
    assert!(dest.join("docs/guide.txt").is_file());
}

#[rstest]
fn traversal_entries_are_rejected(temp_dir: TempDir) {
    let root = utf8_root(&temp_dir);
    let archive = root.join("evil.zip");
    write_zip(&archive, &[("../escape.txt", b"nope")]);

    let dest = root.join("out");
    let result = unpack_archive(&archive, &dest, keep_all);

    assert!(matches!(result, Err(ArchiveError::UnsafeEntry { .. })));
    assert!(!root.join("escape.txt").exists());
}

#[rstest]
fn skipped_traversal_entries_are_not_an_error(temp_dir: TempDir) {
    let root = utf8_root(&temp_dir);
    let archive = root.join("mixed.zip");
    write_zip(&archive, &[("../examples/escape.txt", b"nope"), ("ok.txt", b"ok")]);

    let dest = root.join("out");
    let summary =
        unpack_archive(&archive, &dest, |name| name.contains("examples")).expect("unpack");

    assert_eq!(summary.extracted, 1);
}

#[rstest]
fn missing_archive_is_an_io_error(temp_dir: TempDir) {
    let root = utf8_root(&temp_dir);
    let result = unpack_archive(&root.join("absent.zip"), &root.join("out"), keep_all);
    assert!(matches!(result, Err(ArchiveError::Io { .. })));
}

#[rstest]
fn corrupt_archive_is_a_zip_error(temp_dir: TempDir) {
    let root = utf8_root(&temp_dir);
    let archive = root.join("corrupt.zip");
    fs::write(&archive, b"this is not a zip file").expect("write");

    let result = unpack_archive(&archive, &root.join("out"), keep_all);
    assert!(matches!(result, Err(ArchiveError::Zip { .. })));
}
