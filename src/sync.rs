//! Synchronization driver.
//!
//! A run walks through a fixed sequence of steps and never goes back:
//!
//! 1. **Clean working links**: clear the overlay links inside every group that
//!    is currently exposed in the working directory.
//! 2. **Clean cache**: delete and recreate the cache root.
//! 3. **Clean stale direct links**: remove the links in the working directory
//!    itself (skipped when the working directory is given as `.`).
//! 4. **Enumerate groups**: list the subdirectories of the groups root.
//! 5. **Overlay**: link each group's overlay entries into it.
//! 6. **Expose**: link each group into the working directory.
//!
//! Step 1 has to precede step 3: once the exposure links are gone there is no
//! way to find the groups they pointed at.
//!
//! The driver holds no state between runs. Everything is re-derived from disk,
//! so running twice in a row leaves the same layout as running once.

use std::path::{Component, Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::clean::{clear_and_recreate, clear_exposed_group_links, clear_links_only};
use crate::config::Roots;
use crate::error::Error;
use crate::link::{expose_groups, overlay_into};
use crate::report::{Outcome, Step, Trace};
use crate::scan::{scan, ScanMode};

/// Everything a run needs, resolved up front by the caller.
#[derive(Debug, Clone)]
pub struct SyncContext {
    pub roots: Roots,
    /// Directory that receives one link per group.
    pub working_dir: PathBuf,
}

/// What a run did.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Groups found under the groups root, in link order.
    pub groups: Vec<String>,
    pub trace: Trace,
}

impl SyncContext {
    pub fn new(roots: Roots, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            roots,
            working_dir: working_dir.into(),
        }
    }
}

/// Run every synchronization step in order.
pub fn run(ctx: &SyncContext) -> SyncReport {
    let mut trace = Trace::new();
    info!(
        "Synchronizing {} (groups: {}, overlay: {}, cache: {})",
        ctx.working_dir.display(),
        ctx.roots.groups.display(),
        ctx.roots.overlay.display(),
        ctx.roots.cache.display()
    );

    clear_exposed_group_links(&ctx.working_dir, &mut trace);

    clear_and_recreate(&ctx.roots.cache, Step::CleanCache, &mut trace);

    if is_current_dir_marker(&ctx.working_dir) {
        debug!("Working directory given as current directory marker, keeping its links");
    } else {
        clear_links_only(&ctx.working_dir, Step::CleanStaleDirectLinks, &mut trace);
    }

    let groups = enumerate_groups(&ctx.roots.groups, &mut trace);

    overlay_into(&ctx.roots.overlay, &ctx.roots.groups, &groups, &mut trace);

    expose_groups(&ctx.roots.groups, &ctx.working_dir, &groups, &mut trace);

    info!(
        "Run complete: {} created, {} removed, {} notices, {} failures",
        trace.created(),
        trace.removed(),
        trace.notices(),
        trace.failures()
    );
    SyncReport { groups, trace }
}

/// List the groups under `groups_root`, recording absence in the trace.
pub fn enumerate_groups(groups_root: &Path, trace: &mut Trace) -> Vec<String> {
    match scan(groups_root, ScanMode::Immediate) {
        Ok(groups) => groups,
        Err(Error::DirectoryAbsent { path }) => {
            trace.record(Step::EnumerateGroups, &path, Outcome::DirectoryAbsent);
            Vec::new()
        }
        Err(e) => {
            trace.record(
                Step::EnumerateGroups,
                groups_root,
                Outcome::Failed {
                    message: e.to_string(),
                },
            );
            Vec::new()
        }
    }
}

/// True for `.`, `./.`, and the empty path.
pub fn is_current_dir_marker(path: &Path) -> bool {
    path.components().all(|c| c == Component::CurDir)
}
