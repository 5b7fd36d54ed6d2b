//! # himaya-cli
//!
//! Shell front end for the `himaya` path checks, for use in scripts and
//! hooks that receive paths from untrusted sources.
//!
//! Exit status: `0` when the path is accepted, `1` when it is refused,
//! `2` when the command itself fails.
//!
//! ```text
//! $ himaya check ../../etc/passwd; echo $?
//! 1
//! $ himaya join --base /srv/uploads alice/avatar.png
//! /srv/uploads/alice/avatar.png
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, ContainsArgs, Format, JoinArgs};
pub use commands::Verdict;
pub use error::CliError;
pub use output::OutputFormat;
