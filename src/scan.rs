//! Directory scanning.
//!
//! [`scan`] lists the immediate entries of one directory and filters them by a
//! [`ScanMode`]. In [`ScanMode::All`] hidden names and platform artifacts are
//! dropped, so files like `.DS_Store` or `Thumbs.db` are never overlaid into a
//! group. The other modes keep every directory or link.
//!
//! [`entries`] lists everything without any filtering and is what cleanup
//! uses: a stale link is removed whatever its name.
//!
//! Results are sorted by file name, which keeps the run trace stable between
//! invocations.

use std::ffi::OsString;
use std::path::Path;

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Names starting with this character are treated as hidden.
pub const HIDDEN_PREFIX: char = '.';

/// Desktop metadata files that never belong to a group.
pub const PLATFORM_ARTIFACTS: &[&str] = &["Thumbs.db", "desktop.ini", "Icon\r", "$RECYCLE.BIN"];

/// Which entries a scan keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Every visible entry.
    All,
    /// Entries that are directories (following links).
    Immediate,
    /// Entries that are themselves symbolic links.
    Links,
}

/// Returns `true` when `name` should appear in [`ScanMode::All`] results.
pub fn is_visible(name: &str) -> bool {
    !name.starts_with(HIDDEN_PREFIX) && !PLATFORM_ARTIFACTS.contains(&name)
}

/// List the names of entries directly inside `directory` that match `mode`.
///
/// Returns [`Error::DirectoryAbsent`] when `directory` does not exist or is
/// not a directory. Callers treat that as an empty result.
pub fn scan(directory: &Path, mode: ScanMode) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in walk(directory)? {
        let entry = entry.map_err(std::io::Error::from)?;

        let Some(name) = entry.file_name().to_str() else {
            warn!("Skipping non UTF-8 entry {}", entry.path().display());
            continue;
        };

        let keep = match mode {
            ScanMode::All => is_visible(name),
            ScanMode::Immediate => entry.path().is_dir(),
            ScanMode::Links => entry.path_is_symlink(),
        };
        if keep {
            names.push(name.to_string());
        }
    }

    debug!(
        "Scanned {} ({:?}): {} entries",
        directory.display(),
        mode,
        names.len()
    );
    Ok(names)
}

/// List every entry directly inside `directory`, unfiltered.
///
/// Names are returned as [`OsString`] so entries that are not valid UTF-8
/// are included too. Returns [`Error::DirectoryAbsent`] like [`scan`].
pub fn entries(directory: &Path) -> Result<Vec<OsString>> {
    let mut names = Vec::new();
    for entry in walk(directory)? {
        let entry = entry.map_err(std::io::Error::from)?;
        names.push(entry.file_name().to_os_string());
    }
    Ok(names)
}

fn walk(directory: &Path) -> Result<WalkDir> {
    if !directory.is_dir() {
        return Err(Error::DirectoryAbsent {
            path: directory.to_path_buf(),
        });
    }

    Ok(WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name())
}

/// Like [`scan`], but an absent directory yields an empty list.
pub fn scan_or_empty(directory: &Path, mode: ScanMode) -> Result<Vec<String>> {
    match scan(directory, mode) {
        Err(Error::DirectoryAbsent { path }) => {
            debug!("Directory {} does not exist", path.display());
            Ok(Vec::new())
        }
        other => other,
    }
}
