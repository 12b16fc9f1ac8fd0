//! Link creation for overlays and group exposure.
//!
//! Both the overlay step and the expose step boil down to "for each group
//! name, create links in a destination tree that point into a source tree".
//! They differ only in how deep the links go, which [`LinkDepth`] captures:
//!
//! | depth    | link created at                | pointing at                      |
//! |----------|--------------------------------|----------------------------------|
//! | `Top`    | `dest/<group>`                 | `source/<group>`                 |
//! | `Nested` | `dest/<group>/<entry>`         | `source/<group>/<entry>`         |
//!
//! Existing destinations always win: nothing is ever overwritten.

use std::fs;
use std::io;
use std::path::{self, Path, PathBuf};

use log::debug;

use crate::entry::EntryState;
use crate::error::Error;
use crate::report::{Outcome, Step, Trace};
use crate::scan::{scan, ScanMode};

/// How far below each group name links are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDepth {
    /// Link the group directories themselves.
    Top,
    /// Link every visible entry inside each group's source directory.
    Nested,
}

/// Link every group from `source_root` into `dest_root` at the given depth.
pub fn link_groups(
    source_root: &Path,
    dest_root: &Path,
    group_names: &[String],
    depth: LinkDepth,
    step: Step,
    trace: &mut Trace,
) {
    for group in group_names {
        let source = source_root.join(group);
        let dest = dest_root.join(group);

        match depth {
            LinkDepth::Top => link_one(&source, &dest, step, trace),
            LinkDepth::Nested => {
                let entries = match scan(&source, ScanMode::All) {
                    Ok(entries) => entries,
                    Err(Error::DirectoryAbsent { .. }) => {
                        debug!("{}: nothing to link for group {}", step, group);
                        continue;
                    }
                    Err(e) => {
                        trace.record(
                            step,
                            &source,
                            Outcome::Failed {
                                message: e.to_string(),
                            },
                        );
                        continue;
                    }
                };
                for entry in entries {
                    link_one(&source.join(&entry), &dest.join(&entry), step, trace);
                }
            }
        }
    }
}

/// Link the per-group overlay entries into each group directory.
///
/// `overlay_root` mirrors the group names: the contents of
/// `overlay_root/<group>` are linked into `groups_root/<group>`. Groups with
/// no overlay directory are skipped without a trace entry.
pub fn overlay_into(
    overlay_root: &Path,
    groups_root: &Path,
    group_names: &[String],
    trace: &mut Trace,
) {
    link_groups(
        overlay_root,
        groups_root,
        group_names,
        LinkDepth::Nested,
        Step::Overlay,
        trace,
    );
}

/// Link each group directory into the working directory under its own name.
pub fn expose_groups(
    groups_root: &Path,
    working_dir: &Path,
    group_names: &[String],
    trace: &mut Trace,
) {
    link_groups(
        groups_root,
        working_dir,
        group_names,
        LinkDepth::Top,
        Step::Expose,
        trace,
    );
}

/// How a group currently shows up in the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exposure {
    /// A link to the group directory is present.
    Linked,
    /// A link with the group's name points somewhere else.
    LinkedElsewhere(PathBuf),
    /// A non-link entry occupies the group's name.
    Occupied,
    /// Nothing with the group's name exists.
    Missing,
}

/// Inspect `working_dir/<group>` without changing anything.
pub fn exposure_of(groups_root: &Path, working_dir: &Path, group: &str) -> Exposure {
    let slot = working_dir.join(group);
    match EntryState::of(&slot) {
        EntryState::Absent => Exposure::Missing,
        EntryState::Other => Exposure::Occupied,
        EntryState::Link => {
            let expected = path::absolute(groups_root.join(group)).ok();
            match fs::read_link(&slot) {
                Ok(target) if Some(&target) == expected.as_ref() => Exposure::Linked,
                Ok(target) => Exposure::LinkedElsewhere(target),
                Err(_) => Exposure::LinkedElsewhere(PathBuf::new()),
            }
        }
    }
}

/// Create one link at `dest` pointing at the absolute form of `source`.
fn link_one(source: &Path, dest: &Path, step: Step, trace: &mut Trace) {
    if EntryState::of(dest).exists() {
        trace.record(step, dest, Outcome::AlreadyExists);
        return;
    }
    if !EntryState::of(source).exists() {
        trace.record(step, source, Outcome::SourceMissing);
        return;
    }

    let outcome = match path::absolute(source).and_then(|target| create_link(&target, dest)) {
        Ok(()) => Outcome::Created,
        Err(e) => Outcome::Failed {
            message: e.to_string(),
        },
    };
    trace.record(step, dest, outcome);
}

#[cfg(unix)]
fn create_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_link(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(not(any(unix, windows)))]
fn create_link(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}
