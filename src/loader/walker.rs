//! Directory tree → snapshot entries.
//!
//! Every non-directory path under the root becomes one entry: the key is the
//! path relative to the root with components joined by `.`, the value is the
//! file's contents. Failures are collected per entry and never stop the walk;
//! only an unreadable root fails the walk as a whole.
//!
//! Values are kept as `String`: a file whose contents are not valid UTF-8 is
//! skipped and counted as a failure like any other unreadable entry.
//!
//! Distinct files can map to the same key (`a/b.c` and `a.b/c` are both
//! `a.b.c`). The later one in traversal order wins and traversal order is
//! whatever the filesystem returns.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, RuntimeError};
use crate::snapshot::{Entry, Snapshot};

/// Why a single path was skipped.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("unable to list {}: {source}", path.display())]
    List {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("unable to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path {} cannot be used as a key", path.display())]
    Key { path: PathBuf },
}

/// Outcome of one walk.
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Entries written into the snapshot, duplicates included.
    pub loaded: usize,
    pub failures: Vec<EntryError>,
}

/// Recursively loads a directory into a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    root: PathBuf,
}

impl DirectoryWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write every file under the root into `snapshot`.
    ///
    /// Returns `Err` only when the root cannot be walked at all. In that case
    /// `snapshot` is left untouched.
    pub fn walk_into(&self, snapshot: &mut Snapshot) -> Result<WalkReport> {
        let mut report = WalkReport::default();

        for item in WalkDir::new(&self.root) {
            let dent = match item {
                Ok(dent) => dent,
                Err(e) if e.depth() == 0 => {
                    return Err(RuntimeError::WalkRoot {
                        path: self.root.clone(),
                        source: e.into(),
                    });
                }
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    report.failures.push(skip(EntryError::List { path, source: e }));
                    continue;
                }
            };

            if dent.depth() == 0 {
                if !dent.file_type().is_dir() {
                    return Err(RuntimeError::WalkRoot {
                        path: self.root.clone(),
                        source: io::Error::new(io::ErrorKind::Other, "not a directory"),
                    });
                }
                continue;
            }

            if dent.file_type().is_dir() {
                continue;
            }

            match self.load_entry(&dent) {
                Ok((key, entry)) => {
                    debug!(
                        key = %key,
                        value = %entry.raw_value(),
                        integer = entry.integer_value().is_some(),
                        "runtime: adding key"
                    );
                    snapshot.set_entry(key, entry);
                    report.loaded += 1;
                }
                Err(e) => report.failures.push(skip(e)),
            }
        }

        Ok(report)
    }

    fn load_entry(&self, dent: &DirEntry) -> std::result::Result<(String, Entry), EntryError> {
        let path = dent.path();
        debug!(path = %path.display(), "runtime: processing");

        let contents = fs::read_to_string(path).map_err(|source| EntryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let key = key_for(&self.root, path).ok_or_else(|| EntryError::Key {
            path: path.to_path_buf(),
        })?;

        Ok((key, Entry::new(contents)))
    }
}

fn skip(error: EntryError) -> EntryError {
    warn!(error = %error, "runtime: skipping entry");
    error
}

/// Dotted key for `path` relative to `root`, or `None` if `path` is outside
/// the root or not valid UTF-8.
pub fn key_for(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("."))
}
