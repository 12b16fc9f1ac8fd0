//! Link cleanup.
//!
//! Two kinds of cleanup run at the start of every synchronization:
//!
//! - [`clear_links_only`] removes symbolic links from a directory and leaves
//!   everything else alone. It is used on the working directory and, through
//!   [`clear_exposed_group_links`], on the groups currently exposed there.
//! - [`clear_and_recreate`] wipes a directory entirely and recreates it empty.
//!   It is only ever pointed at the cache root.
//!
//! Cleanup looks at every entry, including hidden names, platform artifacts
//! and names that are not valid UTF-8. Each removal is isolated: a failure is
//! recorded in the trace and the loop moves on to the next entry.

use std::fs;
use std::io;
use std::path::Path;

use crate::entry::EntryState;
use crate::error::Error;
use crate::report::{Outcome, Step, Trace};
use crate::scan::entries;

/// Remove every symbolic link directly inside `directory`.
///
/// Non-link entries are recorded as [`Outcome::NotALink`] and left untouched.
/// An absent directory is recorded as [`Outcome::DirectoryAbsent`].
pub fn clear_links_only(directory: &Path, step: Step, trace: &mut Trace) {
    clear_links_with(directory, step, trace, remove_link);
}

fn clear_links_with<F>(directory: &Path, step: Step, trace: &mut Trace, mut remove: F)
where
    F: FnMut(&Path) -> io::Result<()>,
{
    let names = match entries(directory) {
        Ok(names) => names,
        Err(Error::DirectoryAbsent { path }) => {
            trace.record(step, &path, Outcome::DirectoryAbsent);
            return;
        }
        Err(e) => {
            trace.record(
                step,
                directory,
                Outcome::Failed {
                    message: e.to_string(),
                },
            );
            return;
        }
    };

    for name in names {
        let path = directory.join(&name);
        let outcome = match EntryState::of(&path) {
            EntryState::Link => match remove(&path) {
                Ok(()) => Outcome::Removed,
                Err(e) => Outcome::Failed {
                    message: e.to_string(),
                },
            },
            EntryState::Other => Outcome::NotALink,
            // Vanished between the scan and now.
            EntryState::Absent => continue,
        };
        trace.record(step, &path, outcome);
    }
}

/// Clear the links inside every group currently exposed in `working_dir`.
///
/// Each link in the working directory points at a group directory; the links
/// found one level down are the overlay links placed there by a previous run.
/// This must run before the working directory links themselves are removed.
pub fn clear_exposed_group_links(working_dir: &Path, trace: &mut Trace) {
    let step = Step::CleanWorkingLinks;
    let names = match entries(working_dir) {
        Ok(names) => names,
        Err(Error::DirectoryAbsent { path }) => {
            trace.record(step, &path, Outcome::DirectoryAbsent);
            return;
        }
        Err(e) => {
            trace.record(
                step,
                working_dir,
                Outcome::Failed {
                    message: e.to_string(),
                },
            );
            return;
        }
    };

    for name in names {
        let exposed = working_dir.join(name);
        if EntryState::of(&exposed).is_link() {
            clear_links_only(&exposed, step, trace);
        }
    }
}

/// Delete `directory` with all its contents and recreate it empty.
///
/// This is destructive regardless of what the directory holds. When the
/// directory does not exist, the absence is recorded and an empty directory
/// is created in its place.
pub fn clear_and_recreate(directory: &Path, step: Step, trace: &mut Trace) {
    let removed = match EntryState::of(directory) {
        EntryState::Absent => {
            trace.record(step, directory, Outcome::DirectoryAbsent);
            Ok(())
        }
        EntryState::Link => remove_link(directory),
        EntryState::Other if directory.is_dir() => fs::remove_dir_all(directory),
        EntryState::Other => fs::remove_file(directory),
    };

    let outcome = match removed.and_then(|()| fs::create_dir_all(directory)) {
        Ok(()) => Outcome::Recreated,
        Err(e) => Outcome::Failed {
            message: e.to_string(),
        },
    };
    trace.record(step, directory, outcome);
}

/// Remove a symbolic link without touching its target.
pub(crate) fn remove_link(path: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        // Directory symlinks on Windows are removed like directories.
        fs::remove_file(path).or_else(|_| fs::remove_dir(path))
    }
    #[cfg(not(windows))]
    {
        fs::remove_file(path)
    }
}
