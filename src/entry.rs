//! Existence checks that distinguish links from other filesystem entries.
//!
//! Every component asks "is something already at this path, and is it a
//! link?" before acting. [`EntryState::of`] answers with a plain value so the
//! callers can branch on it instead of attempting an operation and reading the
//! failure.

use std::fs;
use std::io;
use std::path::Path;

/// What occupies a path, without following a final symlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Nothing is at the path.
    Absent,
    /// A symbolic link, whether or not its target resolves.
    Link,
    /// A regular file, directory, or any other non-link entry.
    Other,
}

impl EntryState {
    /// Inspect `path` using `symlink_metadata`.
    ///
    /// Errors other than "not found" (for example a permission problem on the
    /// parent directory) are reported as `Other`: something may be there, and
    /// nothing should be created or removed on top of it.
    pub fn of(path: &Path) -> Self {
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_symlink() => EntryState::Link,
            Ok(_) => EntryState::Other,
            Err(e) if e.kind() == io::ErrorKind::NotFound => EntryState::Absent,
            Err(_) => EntryState::Other,
        }
    }

    pub fn exists(self) -> bool {
        self != EntryState::Absent
    }

    pub fn is_link(self) -> bool {
        self == EntryState::Link
    }
}
