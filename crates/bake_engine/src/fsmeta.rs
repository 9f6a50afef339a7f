//! Filesystem metadata reads backing staleness decisions.
//!
//! All incremental decisions derive from modification times read here. An
//! [`FsSnapshot`] captures every relevant timestamp once per build, so
//! staleness evaluation is a pure function of (dependency graph, snapshot)
//! and can be re-derived identically given the same filesystem state.

use crate::error::BuildError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Returns a file's modification time, or `None` if the file is absent or
/// its metadata cannot be read.
pub fn mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Lists the files directly inside a directory.
///
/// Returns an empty list if the directory does not exist. Subdirectories are
/// not descended into.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}

/// Creates a directory and any missing parents. Idempotent: an existing
/// directory is not an error, so concurrent callers are safe.
pub fn ensure_dir(path: &Path) -> Result<(), BuildError> {
    std::fs::create_dir_all(path).map_err(|e| BuildError::Filesystem {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Modification times captured at one point in a build.
///
/// Absent files simply have no entry. Timestamps are compared at whatever
/// resolution the filesystem provides; coarse (1-second) filesystems are the
/// minimum supported granularity.
#[derive(Debug, Clone, Default)]
pub struct FsSnapshot {
    mtimes: BTreeMap<PathBuf, SystemTime>,
}

impl FsSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a path's modification time from the filesystem into the
    /// snapshot. Absent files are skipped.
    pub fn record(&mut self, path: &Path) {
        if let Some(t) = mtime(path) {
            self.mtimes.insert(path.to_path_buf(), t);
        }
    }

    /// Inserts a synthetic timestamp. Intended for tests.
    pub fn insert(&mut self, path: impl Into<PathBuf>, t: SystemTime) {
        self.mtimes.insert(path.into(), t);
    }

    /// Returns the captured modification time for a path, or `None` if the
    /// file was absent at capture time.
    pub fn mtime(&self, path: &Path) -> Option<SystemTime> {
        self.mtimes.get(path).copied()
    }

    /// The number of captured timestamps.
    pub fn len(&self) -> usize {
        self.mtimes.len()
    }

    /// Returns whether the snapshot holds no timestamps.
    pub fn is_empty(&self) -> bool {
        self.mtimes.is_empty()
    }
}
