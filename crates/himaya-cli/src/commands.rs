//! CLI command implementations.
//!
//! Each command writes a report and returns a [`Verdict`] that `main` turns
//! into the process exit code.

use std::io::Write;
use std::process::ExitCode;

use himaya::paths;
use tracing::info;

use crate::cli::{Commands, ContainsArgs, JoinArgs};
use crate::error::CliError;
use crate::output::{
    CheckReport, ContainsReport, JoinReport, OutputFormat, SanitizeReport, VersionReport,
};

/// Outcome of a command, for the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The path was accepted, or the command makes no decision.
    Allowed,
    /// The path was refused.
    Denied,
}

impl Verdict {
    fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allowed } else { Self::Denied }
    }
}

impl From<Verdict> for ExitCode {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Allowed => Self::SUCCESS,
            Verdict::Denied => Self::from(1_u8),
        }
    }
}

/// Run a parsed command, writing its report to `writer`.
///
/// # Errors
///
/// Returns an error if the report cannot be written.
pub fn execute<W: Write>(
    command: &Commands,
    writer: &mut W,
    format: &OutputFormat,
) -> Result<Verdict, CliError> {
    match command {
        Commands::Check { path } => check(path, writer, format),
        Commands::Sanitize { path } => sanitize(path, writer, format),
        Commands::Contains(args) => contains(args, writer, format),
        Commands::Join(args) => join(args, writer, format),
        Commands::Version => {
            let report = VersionReport {
                version: himaya::version().to_string(),
            };
            format.write(writer, &report)?;
            Ok(Verdict::Allowed)
        }
    }
}

fn check<W: Write>(path: &str, writer: &mut W, format: &OutputFormat) -> Result<Verdict, CliError> {
    let report = CheckReport {
        path: path.to_string(),
        normalized: himaya::normalize(path),
        safe: paths::is_path_safe(path),
    };
    format.write(writer, &report)?;
    Ok(Verdict::from_bool(report.safe))
}

fn sanitize<W: Write>(
    path: &str,
    writer: &mut W,
    format: &OutputFormat,
) -> Result<Verdict, CliError> {
    let report = SanitizeReport {
        path: path.to_string(),
        sanitized: paths::sanitize_path(path),
    };
    format.write(writer, &report)?;
    Ok(Verdict::Allowed)
}

fn contains<W: Write>(
    args: &ContainsArgs,
    writer: &mut W,
    format: &OutputFormat,
) -> Result<Verdict, CliError> {
    let inside = if args.resolve {
        paths::is_within_directory_resolved(&args.base, &args.candidate)
    } else {
        paths::is_within_directory(&args.base, &args.candidate)
    };

    let report = ContainsReport {
        base: args.base.display().to_string(),
        candidate: args.candidate.clone(),
        resolved: args.resolve,
        inside,
    };
    format.write(writer, &report)?;
    Ok(Verdict::from_bool(inside))
}

fn join<W: Write>(args: &JoinArgs, writer: &mut W, format: &OutputFormat) -> Result<Verdict, CliError> {
    let (path, error) = match paths::create_safe_path(&args.base, &args.relative) {
        Ok(path) => (Some(path), None),
        Err(e) => {
            info!(base = %args.base, relative = %args.relative, error = %e, "join refused");
            (None, Some(e.kind.to_string()))
        }
    };

    let verdict = Verdict::from_bool(path.is_some());
    let report = JoinReport {
        base: args.base.clone(),
        relative: args.relative.clone(),
        path,
        error,
    };
    format.write(writer, &report)?;
    Ok(verdict)
}
