//! Syntactic path normalization.
//!
//! Everything here works on strings and never touches the filesystem. The
//! root and drive predicates are explicit patterns rather than
//! [`std::path::Path::is_absolute`], so `/etc/passwd` and `C:\Windows` are
//! classified the same way on every host.

/// Resolve `.` and `..` segments of a `/`-separated path.
///
/// - `.` segments and empty segments (from `//` or a trailing `/`) are dropped.
/// - Each `..` cancels the nearest preceding real segment.
/// - A `..` with nothing to cancel is kept at the front of a relative path,
///   and dropped directly under the root of an absolute one.
/// - A relative path that resolves to nothing becomes `"."`.
///
/// Backslashes are ordinary characters here; rewriting them is
/// [`sanitize_path`](crate::paths::sanitize_path)'s job.
///
/// # Example
///
/// ```
/// use himaya::normalize;
///
/// assert_eq!(normalize("a/./b/../c"), "a/c");
/// assert_eq!(normalize("../a/../../b"), "../../b");
/// assert_eq!(normalize("/../etc"), "/etc");
/// assert_eq!(normalize(""), ".");
/// ```
#[must_use]
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // the parent of the root is the root
                _ if absolute => {}
                _ => segments.push(".."),
            },
            name => segments.push(name),
        }
    }

    let body = segments.join("/");
    if absolute {
        format!("/{body}")
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

/// Check whether any segment, split on `/` or `\`, is a parent reference.
#[must_use]
pub fn has_parent_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "..")
}

/// Check whether a path starts with a root separator (`/` or `\`).
#[must_use]
pub fn has_root(path: &str) -> bool {
    path.starts_with(['/', '\\'])
}

/// Check whether a path starts with a drive letter such as `C:\` or `d:/`.
///
/// A bare `C:` also counts, since a drive designator on its own still
/// addresses another volume.
#[must_use]
pub fn has_drive_prefix(path: &str) -> bool {
    match path.as_bytes() {
        [letter, b':'] | [letter, b':', b'/' | b'\\', ..] => letter.is_ascii_alphabetic(),
        _ => false,
    }
}

/// Rewrite every backslash to a forward slash.
#[must_use]
pub fn unify_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Segment-aligned prefix test between two normalized paths.
///
/// `path` starts with `base` when it equals `base` or continues it with a
/// `/` and further non-`..` segments. `/srv/data2` does not start with
/// `/srv/data`. A base of `"."` accepts any relative path that does not climb.
#[must_use]
pub fn starts_with_segments(path: &str, base: &str) -> bool {
    if path == base {
        return true;
    }

    let rest = match base {
        "." if !path.starts_with('/') => Some(path),
        "/" => path.strip_prefix('/'),
        _ => path.strip_prefix(base).and_then(|rest| rest.strip_prefix('/')),
    };

    rest.is_some_and(|rest| rest.split('/').all(|segment| segment != ".."))
}
