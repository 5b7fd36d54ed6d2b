//! Validation error types with detailed rejection reasons.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The kind of validation error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Input exceeded maximum allowed length.
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length of input.
        actual: usize,
    },
    /// Input still contained a parent reference after normalization.
    PathTraversal {
        /// The traversal pattern found.
        pattern: String,
    },
    /// Input was rooted (`/`, `\`) or carried a drive letter (`C:\`).
    AbsolutePath,
    /// Input contained null bytes.
    NullByte,
    /// The joined path landed outside the base directory.
    BaseEscape,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { max, actual } => {
                write!(f, "input too long: {actual} bytes exceeds max of {max}")
            }
            Self::PathTraversal { pattern } => {
                write!(f, "path traversal pattern '{pattern}' detected")
            }
            Self::AbsolutePath => write!(f, "absolute paths are not allowed"),
            Self::NullByte => write!(f, "input contains null byte"),
            Self::BaseEscape => write!(f, "path escapes base directory"),
        }
    }
}

/// Error returned when a path is rejected.
#[derive(Debug, Clone, Error)]
#[error("validation failed for '{field}': {kind}")]
pub struct ValidationError {
    /// The name of the argument that failed validation.
    pub field: String,
    /// The kind of validation error.
    pub kind: ValidationErrorKind,
    /// The offending path (if applicable).
    pub path: Option<PathBuf>,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
            path: None,
        }
    }

    /// Create a "too long" validation error.
    #[must_use]
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::new(field, ValidationErrorKind::TooLong { max, actual })
    }

    /// Create a "path traversal" validation error.
    #[must_use]
    pub fn path_traversal(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(
            field,
            ValidationErrorKind::PathTraversal {
                pattern: pattern.into(),
            },
        )
    }

    /// Create an "absolute path" validation error.
    #[must_use]
    pub fn absolute_path(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::AbsolutePath)
    }

    /// Create a "null byte" validation error.
    #[must_use]
    pub fn null_byte(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::NullByte)
    }

    /// Create a "base escape" validation error.
    #[must_use]
    pub fn base_escape(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::BaseEscape)
    }

    /// Set the path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Check if this error means the path would leave its base directory.
    ///
    /// Length and null byte rejections are input errors, not escapes.
    #[must_use]
    pub fn is_escape(&self) -> bool {
        matches!(
            self.kind,
            ValidationErrorKind::PathTraversal { .. }
                | ValidationErrorKind::AbsolutePath
                | ValidationErrorKind::BaseEscape
        )
    }

    /// Check if this is a security-related error.
    #[must_use]
    pub fn is_security_error(&self) -> bool {
        self.is_escape() || matches!(self.kind, ValidationErrorKind::NullByte)
    }
}
