//! Per-operation outcomes and the ordered run trace.
//!
//! Every link, unlink, and directory reset performed during a run is recorded
//! as an [`Event`] in a [`Trace`]. The trace is the only report a run
//! produces: the CLI prints it line by line (or as JSON) and tests assert on
//! it directly.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use serde::{Serialize, Serializer};

/// The driver state that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    CleanWorkingLinks,
    CleanCache,
    CleanStaleDirectLinks,
    EnumerateGroups,
    Overlay,
    Expose,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::CleanWorkingLinks => "clean-working-links",
            Step::CleanCache => "clean-cache",
            Step::CleanStaleDirectLinks => "clean-stale-direct-links",
            Step::EnumerateGroups => "enumerate-groups",
            Step::Overlay => "overlay",
            Step::Expose => "expose",
        };
        f.write_str(name)
    }
}

/// Result of a single filesystem operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Outcome {
    /// A link was created.
    Created,
    /// A stale link was removed.
    Removed,
    /// A directory was deleted and recreated empty.
    Recreated,
    /// The destination was already occupied; nothing was written.
    AlreadyExists,
    /// The link source was missing when the link was about to be created.
    SourceMissing,
    /// The entry is not a link and was left untouched.
    NotALink,
    /// The directory to scan or clean does not exist.
    DirectoryAbsent,
    /// The operation was attempted and the filesystem refused it.
    Failed { message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Created | Outcome::Removed | Outcome::Recreated | Outcome::NotALink
        )
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    /// Short human label used in trace lines.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Created => "created",
            Outcome::Removed => "removed",
            Outcome::Recreated => "recreated",
            Outcome::AlreadyExists => "already exists",
            Outcome::SourceMissing => "missing source",
            Outcome::NotALink => "not a link",
            Outcome::DirectoryAbsent => "directory absent",
            Outcome::Failed { .. } => "failed",
        }
    }
}

/// One recorded operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub step: Step,
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Paths that are not valid UTF-8 still end up in the JSON report.
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.step,
            self.outcome.label(),
            self.path.display()
        )?;
        if let Outcome::Failed { message } = &self.outcome {
            write!(f, " ({})", message)?;
        }
        Ok(())
    }
}

/// Events of one run, in execution order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Trace {
    events: Vec<Event>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and mirror it to the log.
    pub fn record(&mut self, step: Step, path: &Path, outcome: Outcome) {
        match &outcome {
            Outcome::Failed { message } => {
                error!("{}: failed on {}: {}", step, path.display(), message)
            }
            Outcome::AlreadyExists | Outcome::SourceMissing | Outcome::DirectoryAbsent => {
                warn!("{}: {} {}", step, outcome.label(), path.display())
            }
            Outcome::NotALink => debug!("{}: kept {}", step, path.display()),
            _ => info!("{}: {} {}", step, outcome.label(), path.display()),
        }

        self.events.push(Event {
            step,
            path: path.to_path_buf(),
            outcome,
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events produced by one step.
    pub fn for_step(&self, step: Step) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.step == step)
    }

    /// Look up the most recent outcome recorded for `path`.
    pub fn outcome_for(&self, path: &Path) -> Option<&Outcome> {
        self.events
            .iter()
            .rev()
            .find(|e| e.path == path)
            .map(|e| &e.outcome)
    }

    pub fn created(&self) -> usize {
        self.count(|o| *o == Outcome::Created)
    }

    pub fn removed(&self) -> usize {
        self.count(|o| *o == Outcome::Removed)
    }

    /// Skipped operations that are worth telling the user about.
    pub fn notices(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                Outcome::AlreadyExists | Outcome::SourceMissing | Outcome::DirectoryAbsent
            )
        })
    }

    pub fn failures(&self) -> usize {
        self.count(Outcome::is_failure)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.outcome)).count()
    }
}
