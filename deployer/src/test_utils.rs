//! Shared test utilities for the deployer crate.

use crate::deploy::CommandExecutor;
use crate::error::Result;
use camino::Utf8Path;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs::File;
use std::io::Write;
use std::process::ExitStatus;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// A command invocation observed by [`StubExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The command that was run.
    pub cmd: String,
    /// The arguments passed to it.
    pub args: Vec<String>,
}

impl RecordedCall {
    /// Returns the value of a `-Dkey=value` argument, if present.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        let prefix = format!("-D{key}=");
        self.args
            .iter()
            .find_map(|arg| arg.strip_prefix(prefix.as_str()))
    }
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Returns scripted exit codes in order and records every invocation,
/// allowing tests to verify deployment without spawning processes.
#[derive(Debug)]
pub struct StubExecutor {
    exit_codes: RefCell<VecDeque<i32>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` returning `exit_codes` in order.
    #[must_use]
    pub fn new(exit_codes: Vec<i32>) -> Self {
        Self {
            exit_codes: RefCell::new(exit_codes.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Returns the invocations recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Asserts that every scripted exit code has been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining scripted exit codes.
    pub fn assert_finished(&self) {
        assert!(
            self.exit_codes.borrow().is_empty(),
            "expected no further command invocations"
        );
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, cmd: &str, args: &[String]) -> Result<ExitStatus> {
        let code = self
            .exit_codes
            .borrow_mut()
            .pop_front()
            .expect("unexpected command invocation");
        self.calls.borrow_mut().push(RecordedCall {
            cmd: cmd.to_owned(),
            args: args.to_vec(),
        });
        Ok(exit_status(code))
    }
}

/// Writes a zip archive at `path` holding `entries` in the given order.
///
/// Names ending in `/` are written as directory entries.
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn write_zip(path: &Utf8Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("create archive");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).expect("add directory");
        } else {
            zip.start_file(*name, options).expect("start entry");
            zip.write_all(content).expect("write entry");
        }
    }
    zip.finish().expect("finish archive");
}

/// Lists the entry names of the archive at `path` in stored order.
///
/// # Panics
///
/// Panics if the archive cannot be read.
#[must_use]
pub fn zip_entries(path: &Utf8Path) -> Vec<String> {
    let file = File::open(path).expect("open archive");
    let mut archive = ZipArchive::new(file).expect("read archive");
    (0..archive.len())
        .map(|index| {
            archive
                .by_index(index)
                .expect("read entry")
                .name()
                .to_owned()
        })
        .collect()
}
