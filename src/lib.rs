//! # linkswitch
//!
//! This library keeps several interchangeable "groups" of files on disk and
//! makes them visible in a working directory through symbolic links, while
//! injecting a set of always-present overlay files into every group. It
//! backs the `linkswitch` command-line tool.
//!
//! ## Quick Example
//!
//! ```no_run
//! use linkswitch::config::Config;
//! use linkswitch::sync::{self, SyncContext};
//! use std::path::Path;
//!
//! let work = Path::new("/srv/app");
//! let config = Config::from_file(&work.join("linkswitch.ini")).unwrap();
//! let roots = config.resolve(work).unwrap();
//!
//! let report = sync::run(&SyncContext::new(roots, work));
//! for event in report.trace.events() {
//!     println!("{}", event);
//! }
//! ```
//!
//! ## Directory Roles
//!
//! - **Working directory**: receives one link per group. Anything that is not
//!   a link is never touched.
//! - **Overlay root** (`always`): one subdirectory per group whose entries are
//!   linked into that group unless the group already has an entry by the
//!   same name.
//! - **Cache root** (`cache`): scratch space, emptied on every run.
//! - **Groups root** (`path`): one subdirectory per switchable group.
//!
//! ## Execution Flow
//!
//! [`sync::run`] cleans stale links and the cache, enumerates the groups,
//! overlays, then exposes. Every attempted operation lands in a
//! [`report::Trace`]; individual failures are recorded and the run carries
//! on. Running twice leaves the same layout as running once.

pub mod clean;
pub mod config;
pub mod defaults;
pub mod entry;
pub mod error;
pub mod link;
pub mod output;
pub mod platform;
pub mod report;
pub mod scan;
pub mod suggestions;
pub mod sync;
