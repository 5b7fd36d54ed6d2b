//! Input shape validators.
//!
//! Simple predicates for common user-supplied strings. None of them know
//! anything about paths; use [`crate::paths`] for those.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum username length in characters.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length in characters.
pub const MAX_USERNAME_LENGTH: usize = 30;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Substrings that suggest markup or SQL injection, matched case-insensitively.
const DANGEROUS_PATTERNS: &[&str] = &[
    "<script",
    "</script>",
    "javascript:",
    "onload=",
    "onerror=",
    "onclick=",
    "onmouseover=",
    "'",
    "\"",
    ";",
    "--",
    "/*",
    "*/",
];

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .unwrap_or_else(|_| unreachable!())
});

static SCRIPT_BLOCK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<script[^>]*>.*?</script>").unwrap_or_else(|_| unreachable!()));

static EVENT_HANDLER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"on\w+\s*=").unwrap_or_else(|_| unreachable!()));

static MARKUP_CHARS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>"'&]"#).unwrap_or_else(|_| unreachable!()));

/// Check an email address against a conservative `local@domain.tld` shape.
///
/// Surrounding whitespace is ignored.
///
/// ```
/// use himaya::input::is_valid_email;
///
/// assert!(is_valid_email("user@example.com"));
/// assert!(!is_valid_email("user@domain"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && EMAIL_REGEX.is_match(email)
}

/// Non-empty and ASCII letters or digits only.
#[must_use]
pub fn is_alphanumeric(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Non-empty and ASCII letters only.
#[must_use]
pub fn is_alphabetic(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_alphabetic())
}

/// Non-empty and ASCII digits only. Signs and decimal points are rejected.
#[must_use]
pub fn is_numeric(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_digit())
}

/// Check that the character count lies in `min..=max`.
#[must_use]
pub fn is_valid_length(input: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&input.chars().count())
}

/// Check for markup, script or SQL fragments such as `<script`, `'` or `--`.
#[must_use]
pub fn contains_dangerous_chars(input: &str) -> bool {
    let lower = input.to_lowercase();
    DANGEROUS_PATTERNS.iter().any(|pattern| lower.contains(pattern))
}

/// Strip script blocks, `javascript:` schemes, inline event handlers and
/// markup characters, then trim.
///
/// This is a best-effort scrub for display purposes, not an HTML sanitizer.
///
/// ```
/// use himaya::input::sanitize_input;
///
/// assert_eq!(sanitize_input("<script>alert('xss')</script>"), "");
/// assert_eq!(sanitize_input("onload=alert('xss')"), "alert(xss)");
/// ```
#[must_use]
pub fn sanitize_input(input: &str) -> String {
    let without_scripts = SCRIPT_BLOCK_REGEX.replace_all(input, "");
    let without_scheme = without_scripts.replace("javascript:", "");
    let without_handlers = EVENT_HANDLER_REGEX.replace_all(&without_scheme, "");
    let without_markup = MARKUP_CHARS_REGEX.replace_all(&without_handlers, "");
    without_markup.trim().to_string()
}

/// Usernames are 3 to 30 ASCII alphanumeric characters.
#[must_use]
pub fn is_valid_username(username: &str) -> bool {
    is_valid_length(username, MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH)
        && is_alphanumeric(username)
        && !contains_dangerous_chars(username)
}

/// Passwords need at least 8 characters with one ASCII letter and one digit.
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}
