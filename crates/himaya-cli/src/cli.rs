//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Himaya - check and confine untrusted filesystem paths.
#[derive(Parser, Debug, Clone)]
#[command(name = "himaya")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table, global = true)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check that a path stays relative and never climbs (exit 1 if unsafe).
    Check {
        /// Path to check.
        path: String,
    },

    /// Print the normalized, forward-slash form of a path.
    ///
    /// The output may still start with `..`; it is not a safety check.
    Sanitize {
        /// Path to rewrite.
        path: String,
    },

    /// Check that a candidate stays inside an existing base directory (exit 1 if not).
    Contains(ContainsArgs),

    /// Join a relative path onto a base directory, refusing escapes (exit 1 on escape).
    Join(JoinArgs),

    /// Show the library version.
    Version,
}

/// Arguments for the contains command.
#[derive(Parser, Debug, Clone)]
pub struct ContainsArgs {
    /// Base directory; must exist.
    #[arg(short, long, env = "HIMAYA_BASE")]
    pub base: PathBuf,

    /// Candidate path, read relative to the base.
    pub candidate: String,

    /// Also resolve symlinks in the candidate (it must exist).
    #[arg(short, long)]
    pub resolve: bool,
}

/// Arguments for the join command.
#[derive(Parser, Debug, Clone)]
pub struct JoinArgs {
    /// Trusted base directory; need not exist.
    #[arg(short, long, env = "HIMAYA_BASE")]
    pub base: String,

    /// Untrusted relative path.
    pub relative: String,
}
