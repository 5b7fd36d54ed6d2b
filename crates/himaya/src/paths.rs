//! Path traversal protection.
//!
//! Four operations built on [`normalize`]:
//!
//! - [`is_path_safe`]: syntactic filter, no base directory involved.
//! - [`sanitize_path`]: rewrite into a tidy relative form. Not a safety check.
//! - [`is_within_directory`]: containment against an existing base directory.
//! - [`create_safe_path`]: join an untrusted relative path onto a trusted base.
//!
//! # Example
//!
//! ```
//! use himaya::paths;
//!
//! assert!(paths::is_path_safe("documents/file.txt"));
//! assert!(!paths::is_path_safe("../../../etc/passwd"));
//! assert!(!paths::is_path_safe(r"C:\Windows\System32"));
//!
//! let joined = paths::create_safe_path("/srv/uploads", "alice/./avatar.png")?;
//! assert_eq!(joined, "/srv/uploads/alice/avatar.png");
//! assert!(paths::create_safe_path("/srv/uploads", "../../etc/passwd").is_err());
//! # Ok::<(), himaya::ValidationError>(())
//! ```
//!
//! # Symlinks
//!
//! Only [`is_within_directory`] and [`is_within_directory_resolved`] consult
//! the filesystem, and only the latter follows symlinks in the candidate. A
//! symlink placed inside the base that points elsewhere passes
//! [`is_within_directory`]; use the resolved variant when the tree is not
//! trusted.
//!
//! Both containment checks block on filesystem I/O. Async callers should run
//! them on a blocking thread.

use std::path::Path;

use tracing::debug;

use crate::error::ValidationError;
use crate::normalize::{
    has_drive_prefix, has_parent_segment, has_root, normalize, starts_with_segments,
    unify_separators,
};
use crate::MAX_PATH_LENGTH;

/// Check a normalized relative path for anything that could leave its base.
fn check_relative(field: &str, original: &str, normalized: &str) -> Result<(), ValidationError> {
    if original.contains('\0') {
        return Err(ValidationError::null_byte(field).with_path(original));
    }

    if original.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::too_long(field, MAX_PATH_LENGTH, original.len())
            .with_path(original));
    }

    if has_parent_segment(normalized) {
        return Err(ValidationError::path_traversal(field, "..").with_path(original));
    }

    if has_root(normalized) || has_drive_prefix(normalized) {
        return Err(ValidationError::absolute_path(field).with_path(original));
    }

    Ok(())
}

/// Check that a path stays relative and never climbs above its starting point.
///
/// The path is normalized first, so `a/../b` is safe while `a/../../b` is
/// not. Rooted paths (`/etc`, `\Windows`), drive paths (`C:\`), paths with
/// null bytes and paths over [`MAX_PATH_LENGTH`] bytes are all unsafe.
///
/// This knows nothing about any base directory. When one is available, gate
/// on [`is_within_directory`] or [`create_safe_path`] instead.
#[must_use]
pub fn is_path_safe(path: &str) -> bool {
    let normalized = normalize(path);
    match check_relative("path", path, &normalized) {
        Ok(()) => true,
        Err(e) => {
            debug!(path, reason = %e.kind, "path rejected");
            false
        }
    }
}

/// Rewrite a path into a relative, forward-slash form.
///
/// Steps: normalize, turn every run of backslashes into one `/`, collapse
/// runs of `/`, drop one leading `/`, trim surrounding whitespace.
///
/// The result never contains a backslash or a doubled separator. It may
/// still start with `..` (e.g. `"../file.txt"` is returned unchanged), so
/// the output must still go through [`is_path_safe`] or a containment
/// check before it is used to touch the filesystem.
#[must_use]
pub fn sanitize_path(path: &str) -> String {
    let unified = unify_separators(&normalize(path));

    let mut collapsed = String::with_capacity(unified.len());
    for ch in unified.chars() {
        if ch == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(ch);
    }

    let relative = collapsed.strip_prefix('/').unwrap_or(&collapsed);
    relative.trim().to_string()
}

/// Canonicalize a path into the normalized, forward-slash form used for
/// containment comparisons.
fn canonical_anchor(path: &Path) -> Option<String> {
    let canonical = match path.canonicalize() {
        Ok(canonical) => canonical,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot canonicalize path");
            return None;
        }
    };

    let Some(canonical) = canonical.to_str() else {
        debug!(path = %canonical.display(), "canonical path is not valid UTF-8");
        return None;
    };

    Some(normalize(&unify_separators(canonical)))
}

/// Join `candidate` onto an anchor, always treating it as relative.
fn join_under(anchor: &str, candidate: &str) -> String {
    normalize(&format!("{anchor}/{}", unify_separators(candidate)))
}

/// Check that `candidate`, read relative to `base`, stays inside `base`.
///
/// `base` is canonicalized first (symlinks followed, so it must exist). The
/// candidate is joined onto the canonical base and normalized syntactically;
/// a leading `/` or backslashes in the candidate do not let it restart from
/// another root. Returns `true` iff the result is `base` itself or lies
/// below it.
///
/// Any failure to resolve `base` (missing, permission denied, not UTF-8)
/// returns `false`. The candidate is not resolved through symlinks; see
/// [`is_within_directory_resolved`].
///
/// # Example
///
/// ```no_run
/// use himaya::paths::is_within_directory;
///
/// assert!(is_within_directory("/srv/uploads", "alice/avatar.png"));
/// assert!(!is_within_directory("/srv/uploads", "../secrets.txt"));
/// ```
#[must_use]
pub fn is_within_directory<P: AsRef<Path>>(base: P, candidate: &str) -> bool {
    let base = base.as_ref();
    if candidate.contains('\0') {
        debug!(base = %base.display(), "candidate contains null byte");
        return false;
    }

    let Some(anchor) = canonical_anchor(base) else {
        return false;
    };

    let joined = join_under(&anchor, candidate);
    let inside = starts_with_segments(&joined, &anchor);
    if !inside {
        debug!(base = %anchor, candidate, resolved = %joined, "candidate escapes base directory");
    }
    inside
}

/// Like [`is_within_directory`], but the candidate is canonicalized as well.
///
/// This closes the gap left by symlinks inside the base that point outside
/// it. The candidate must exist: a missing target or a dangling symlink
/// returns `false`.
#[must_use]
pub fn is_within_directory_resolved<P: AsRef<Path>>(base: P, candidate: &str) -> bool {
    let base = base.as_ref();
    if candidate.contains('\0') {
        debug!(base = %base.display(), "candidate contains null byte");
        return false;
    }

    let Some(anchor) = canonical_anchor(base) else {
        return false;
    };

    let joined = join_under(&anchor, candidate);
    if !starts_with_segments(&joined, &anchor) {
        debug!(base = %anchor, candidate, resolved = %joined, "candidate escapes base directory");
        return false;
    }

    let target = base.join(unify_separators(candidate).trim_start_matches('/'));
    match canonical_anchor(&target) {
        Some(resolved) if starts_with_segments(&resolved, &anchor) => true,
        Some(resolved) => {
            debug!(base = %anchor, candidate, %resolved, "candidate resolves outside base directory");
            false
        }
        None => false,
    }
}

/// Join an untrusted relative path onto a trusted base directory.
///
/// `relative` is normalized and rejected outright if it still climbs (`..`),
/// is rooted, or carries a drive letter. Otherwise it is joined onto the
/// normalized `base`, normalized again, and the result is checked to still
/// lie under `base`.
///
/// Nothing is read from the filesystem, so `base` does not have to exist.
/// This makes it suitable for building paths of files about to be created.
///
/// # Errors
///
/// Returns a [`ValidationError`] for which
/// [`is_escape`](ValidationError::is_escape) holds when the path would
/// leave `base`, and a `NullByte` or `TooLong` error for malformed input.
pub fn create_safe_path(base: &str, relative: &str) -> Result<String, ValidationError> {
    if base.contains('\0') {
        return Err(ValidationError::null_byte("base").with_path(base));
    }

    let normalized_relative = normalize(relative);
    if let Err(e) = check_relative("relative_path", relative, &normalized_relative) {
        debug!(base, relative, reason = %e.kind, "relative path rejected");
        return Err(e);
    }

    let normalized_base = normalize(base);
    let combined = normalize(&format!("{normalized_base}/{normalized_relative}"));

    if !starts_with_segments(&combined, &normalized_base) {
        debug!(base, relative, %combined, "joined path escapes base directory");
        return Err(ValidationError::base_escape("relative_path").with_path(relative));
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use std::fs;
    use tempfile::TempDir;

    fn temp_dir() -> TempDir {
        TempDir::new().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"))
    }

    // ==========================================================================
    // is_path_safe
    // ==========================================================================

    #[test]
    fn test_safe_relative_paths() {
        assert!(is_path_safe("documents/file.txt"));
        assert!(is_path_safe("images/photo.jpg"));
        assert!(is_path_safe("file.txt"));
        assert!(is_path_safe("a/b/../c"));
        assert!(is_path_safe("./config"));
    }

    #[test]
    fn test_unsafe_paths() {
        assert!(!is_path_safe("../../../etc/passwd"));
        assert!(!is_path_safe(r"..\..\windows\system32"));
        assert!(!is_path_safe("/etc/passwd"));
        assert!(!is_path_safe(r"C:\Windows\System32"));
        assert!(!is_path_safe("docs/../../secret"));
    }

    #[test]
    fn test_dot_and_empty_are_safe() {
        assert!(is_path_safe("."));
        assert!(is_path_safe(""));
        assert!(is_path_safe("a/.."));
    }

    #[test]
    fn test_dots_inside_names_are_safe() {
        assert!(is_path_safe("file..txt"));
        assert!(is_path_safe("..hidden"));
        assert!(is_path_safe("a/.../b"));
    }

    #[test]
    fn test_null_byte_is_unsafe() {
        assert!(!is_path_safe("config\0.toml"));
    }

    #[test]
    fn test_overlong_path_is_unsafe() {
        let long = "a/".repeat(MAX_PATH_LENGTH);
        assert!(!is_path_safe(&long));
    }

    // ==========================================================================
    // sanitize_path
    // ==========================================================================

    #[test]
    fn test_sanitize_collapses_separators() {
        assert_eq!(sanitize_path("path//to///file.txt"), "path/to/file.txt");
        assert_eq!(sanitize_path(r"path\\to\\file.txt"), "path/to/file.txt");
        assert_eq!(sanitize_path(r"path\to/\file.txt"), "path/to/file.txt");
    }

    #[test]
    fn test_sanitize_strips_leading_slash() {
        assert_eq!(sanitize_path("/path/to/file.txt"), "path/to/file.txt");
        assert_eq!(sanitize_path(r"\path\to"), "path/to");
        assert_eq!(sanitize_path("/"), "");
    }

    #[test]
    fn test_sanitize_resolves_inner_parents() {
        assert_eq!(
            sanitize_path("documents/../documents/file.txt"),
            "documents/file.txt"
        );
    }

    #[test]
    fn test_sanitize_preserves_leading_parent() {
        assert_eq!(sanitize_path("../file.txt"), "../file.txt");
        assert_eq!(sanitize_path("../documents/file.txt"), "../documents/file.txt");
        assert!(!is_path_safe(&sanitize_path("../file.txt")));
    }

    #[test]
    fn test_sanitize_trims_whitespace() {
        assert_eq!(sanitize_path("  docs/file.txt  "), "docs/file.txt");
    }

    // ==========================================================================
    // is_within_directory
    // ==========================================================================

    #[test]
    fn test_within_directory_existing_and_missing_children() {
        let temp = temp_dir();
        fs::create_dir(temp.path().join("sub"))
            .unwrap_or_else(|e| panic!("failed to create dir: {e}"));
        fs::write(temp.path().join("test.txt"), "test")
            .unwrap_or_else(|e| panic!("failed to write file: {e}"));

        assert!(is_within_directory(temp.path(), "test.txt"));
        assert!(is_within_directory(temp.path(), "sub/file.txt"));
        assert!(is_within_directory(temp.path(), "subfolder/test.txt"));
        assert!(is_within_directory(temp.path(), "."));
        assert!(is_within_directory(temp.path(), ""));
    }

    #[test]
    fn test_within_directory_rejects_escape() {
        let temp = temp_dir();
        assert!(!is_within_directory(temp.path(), ".."));
        assert!(!is_within_directory(temp.path(), "../outside.txt"));
        assert!(!is_within_directory(temp.path(), "sub/../../outside.txt"));
        assert!(!is_within_directory(temp.path(), r"..\..\etc\passwd"));
    }

    #[test]
    fn test_within_directory_resolves_inner_parents() {
        let temp = temp_dir();
        assert!(is_within_directory(temp.path(), "a/b/../../c.txt"));
    }

    #[test]
    fn test_within_directory_treats_rooted_candidate_as_relative() {
        let temp = temp_dir();
        assert!(is_within_directory(temp.path(), "/etc/passwd"));
        assert!(!is_within_directory(temp.path(), "/../etc/passwd"));
    }

    #[test]
    fn test_within_directory_rejects_sibling_prefix() {
        let temp = temp_dir();
        let base = temp.path().join("data");
        fs::create_dir(&base).unwrap_or_else(|e| panic!("failed to create dir: {e}"));
        fs::create_dir(temp.path().join("data2"))
            .unwrap_or_else(|e| panic!("failed to create dir: {e}"));

        assert!(!is_within_directory(&base, "../data2/file.txt"));
    }

    #[test]
    fn test_within_directory_missing_base() {
        let temp = temp_dir();
        let missing = temp.path().join("does-not-exist");
        assert!(!is_within_directory(&missing, "file.txt"));
    }

    #[test]
    fn test_within_directory_null_byte_candidate() {
        let temp = temp_dir();
        assert!(!is_within_directory(temp.path(), "file\0.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_within_directory_follows_symlinked_base() {
        use std::os::unix::fs::symlink;

        let temp = temp_dir();
        let real = temp.path().join("real");
        fs::create_dir(&real).unwrap_or_else(|e| panic!("failed to create dir: {e}"));
        let link = temp.path().join("link");
        symlink(&real, &link).unwrap_or_else(|e| panic!("failed to create symlink: {e}"));

        assert!(is_within_directory(&link, "file.txt"));
        assert!(!is_within_directory(&link, "../real2/file.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_inner_symlink_gap_and_resolved_check() {
        use std::os::unix::fs::symlink;

        let outside = temp_dir();
        fs::write(outside.path().join("secret.txt"), "secret")
            .unwrap_or_else(|e| panic!("failed to write file: {e}"));

        let temp = temp_dir();
        symlink(outside.path(), temp.path().join("escape_link"))
            .unwrap_or_else(|e| panic!("failed to create symlink: {e}"));

        // syntactic containment cannot see through the link
        assert!(is_within_directory(temp.path(), "escape_link/secret.txt"));
        assert!(!is_within_directory_resolved(temp.path(), "escape_link/secret.txt"));
    }

    #[test]
    fn test_resolved_requires_existing_candidate() {
        let temp = temp_dir();
        fs::write(temp.path().join("present.txt"), "x")
            .unwrap_or_else(|e| panic!("failed to write file: {e}"));

        assert!(is_within_directory_resolved(temp.path(), "present.txt"));
        assert!(!is_within_directory_resolved(temp.path(), "absent.txt"));
        assert!(!is_within_directory_resolved(temp.path(), "../present.txt"));
    }

    // ==========================================================================
    // create_safe_path
    // ==========================================================================

    #[test]
    fn test_create_safe_path_joins() {
        let temp = temp_dir();
        let base = temp.path().to_string_lossy().into_owned();

        let joined = create_safe_path(&base, "documents/file.txt")
            .unwrap_or_else(|e| panic!("unexpected error: {e}"));
        assert!(joined.starts_with(&base));
        assert!(joined.ends_with("documents/file.txt"));
    }

    #[test]
    fn test_create_safe_path_does_not_need_existing_base() {
        let joined = create_safe_path("/nonexistent/root/", "./a/b/../c.txt")
            .unwrap_or_else(|e| panic!("unexpected error: {e}"));
        assert_eq!(joined, "/nonexistent/root/a/c.txt");
    }

    #[test]
    fn test_create_safe_path_relative_and_root_bases() {
        assert_eq!(
            create_safe_path("data", "x.txt").unwrap_or_else(|e| panic!("unexpected error: {e}")),
            "data/x.txt"
        );
        assert_eq!(
            create_safe_path(".", "x.txt").unwrap_or_else(|e| panic!("unexpected error: {e}")),
            "x.txt"
        );
        assert_eq!(
            create_safe_path("/", "x.txt").unwrap_or_else(|e| panic!("unexpected error: {e}")),
            "/x.txt"
        );
    }

    #[test]
    fn test_create_safe_path_empty_relative_is_base() {
        assert_eq!(
            create_safe_path("/srv/data", "").unwrap_or_else(|e| panic!("unexpected error: {e}")),
            "/srv/data"
        );
    }

    #[test]
    fn test_create_safe_path_rejects_traversal() {
        for base in ["/srv/data", ".", "relative/base", "/"] {
            let err = create_safe_path(base, "../../etc/passwd")
                .err()
                .unwrap_or_else(|| panic!("expected escape for base {base}"));
            assert!(err.is_escape());
            assert!(matches!(err.kind, ValidationErrorKind::PathTraversal { .. }));
        }
    }

    #[test]
    fn test_create_safe_path_rejects_absolute() {
        for relative in ["/etc/passwd", r"\Windows", r"C:\Windows\System32", "c:/x"] {
            let err = create_safe_path("/srv/data", relative)
                .err()
                .unwrap_or_else(|| panic!("expected escape for {relative}"));
            assert!(matches!(err.kind, ValidationErrorKind::AbsolutePath));
            assert_eq!(err.path.as_deref(), Some(Path::new(relative)));
        }
    }

    #[test]
    fn test_create_safe_path_rejects_backslash_traversal() {
        let err = create_safe_path("/srv/data", r"docs\..\..\secret")
            .err()
            .unwrap_or_else(|| panic!("expected escape"));
        assert!(err.is_escape());
    }

    #[test]
    fn test_create_safe_path_rejects_null_bytes() {
        let err = create_safe_path("/srv/data", "a\0b")
            .err()
            .unwrap_or_else(|| panic!("expected error"));
        assert!(matches!(err.kind, ValidationErrorKind::NullByte));
        assert!(!err.is_escape());

        let err = create_safe_path("/srv/\0data", "a")
            .err()
            .unwrap_or_else(|| panic!("expected error"));
        assert_eq!(err.field, "base");
    }
}
