//! Path traversal protection and input validation.
//!
//! Himaya keeps file access confined to an intended base directory by
//! classifying, rewriting and joining untrusted path strings.
//!
//! # Path Security
//!
//! ```
//! use himaya::paths::{create_safe_path, is_path_safe, sanitize_path};
//!
//! // Syntactic filter
//! assert!(is_path_safe("documents/file.txt"));
//! assert!(!is_path_safe("../../../etc/passwd"));
//!
//! // Tidy rewrite (not a safety check on its own)
//! assert_eq!(sanitize_path("path//to///file.txt"), "path/to/file.txt");
//!
//! // Join onto a trusted base
//! let target = create_safe_path("/srv/uploads", "alice/avatar.png")?;
//! assert_eq!(target, "/srv/uploads/alice/avatar.png");
//! # Ok::<(), himaya::ValidationError>(())
//! ```
//!
//! For containment against a directory that exists on disk, see
//! [`paths::is_within_directory`].
//!
//! # Input Validation
//!
//! ```
//! use himaya::input;
//!
//! assert!(input::is_valid_email("user@example.com"));
//! assert!(input::is_valid_username("alice42"));
//! assert!(input::contains_dangerous_chars("<script>"));
//! ```
//!
//! # Logging
//!
//! Every rejection is recorded as a `tracing` debug event. The library never
//! installs a subscriber.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod input;
pub mod normalize;
pub mod paths;

pub use error::{ValidationError, ValidationErrorKind};
pub use normalize::normalize;
pub use paths::{
    create_safe_path, is_path_safe, is_within_directory, is_within_directory_resolved,
    sanitize_path,
};

/// Maximum accepted length for untrusted paths, in bytes.
pub const MAX_PATH_LENGTH: usize = 4096;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version.
#[must_use]
pub fn version() -> &'static str {
    VERSION
}


#[cfg(test)]
mod smoke {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_path_reexports() {
        assert!(is_path_safe("documents/file.txt"));
        assert!(!is_path_safe("../../../etc/passwd"));
        assert_eq!(sanitize_path("../documents/file.txt"), "../documents/file.txt");
    }

    #[test]
    fn test_input_module() {
        assert!(input::is_valid_email("user@example.com"));
        assert!(!input::is_valid_email("invalid-email"));
        assert!(input::is_alphanumeric("abc123"));
        assert!(!input::is_alphanumeric("abc-123"));
        assert_eq!(input::sanitize_input("<script>alert('xss')</script>"), "");
    }
}
