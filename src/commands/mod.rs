//! # CLI Command Implementations
//!
//! Each subcommand of the `linkswitch` tool lives in its own file and
//! typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `linkswitch` library.

pub mod completions;
pub mod init;
pub mod status;
pub mod sync;
