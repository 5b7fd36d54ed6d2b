//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Result of `himaya check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Path as given.
    pub path: String,
    /// Normalized form the decision was made on.
    pub normalized: String,
    /// Whether the path is safe.
    pub safe: bool,
}

impl TableDisplay for CheckReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Path:        {}", self.path)?;
        writeln!(writer, "Normalized:  {}", self.normalized)?;
        writeln!(writer, "Safe:        {}", yes_no(self.safe))?;
        Ok(())
    }
}

/// Result of `himaya sanitize`.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizeReport {
    /// Path as given.
    pub path: String,
    /// Rewritten path.
    pub sanitized: String,
}

impl TableDisplay for SanitizeReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.sanitized)?;
        Ok(())
    }
}

/// Result of `himaya contains`.
#[derive(Debug, Clone, Serialize)]
pub struct ContainsReport {
    /// Base directory as given.
    pub base: String,
    /// Candidate as given.
    pub candidate: String,
    /// Whether symlinks in the candidate were resolved.
    pub resolved: bool,
    /// Whether the candidate stays inside the base.
    pub inside: bool,
}

impl TableDisplay for ContainsReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Base:        {}", self.base)?;
        writeln!(writer, "Candidate:   {}", self.candidate)?;
        writeln!(writer, "Resolved:    {}", yes_no(self.resolved))?;
        writeln!(writer, "Inside:      {}", yes_no(self.inside))?;
        Ok(())
    }
}

/// Result of `himaya join`.
#[derive(Debug, Clone, Serialize)]
pub struct JoinReport {
    /// Base directory as given.
    pub base: String,
    /// Relative path as given.
    pub relative: String,
    /// Joined path, when accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Rejection reason, when refused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableDisplay for JoinReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        match (&self.path, &self.error) {
            (Some(path), _) => writeln!(writer, "{path}")?,
            (None, Some(error)) => writeln!(writer, "refused: {error}")?,
            (None, None) => writeln!(writer, "refused")?,
        }
        Ok(())
    }
}

/// Result of `himaya version`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionReport {
    /// Library version.
    pub version: String,
}

impl TableDisplay for VersionReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "himaya {}", self.version)?;
        Ok(())
    }
}
