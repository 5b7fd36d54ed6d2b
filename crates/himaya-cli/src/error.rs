//! CLI error types.

use thiserror::Error;

/// CLI-specific errors.
///
/// A denied path is not an error; commands report it through
/// [`Verdict`](crate::commands::Verdict).
#[derive(Debug, Error)]
pub enum CliError {
    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
