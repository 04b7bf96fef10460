//! String helpers for `/`-separated virtual paths.
//!
//! Virtual paths are plain strings, independent of the host's path syntax.
//! They follow the same segment rules as [`Vfs::find_node`](super::Vfs::find_node):
//! `.` is skipped and `..` jumps back to the root.

pub const SEPARATOR: char = '/';
pub const ROOT: &str = "/";

/// Splits a path into its segments after trimming leading and trailing slashes.
///
/// The root (`""` or `"/"`) has no segments.
pub fn segments(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches(SEPARATOR);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split(SEPARATOR).collect()
}

/// Path of the containing directory, computed lexically by dropping the last segment.
pub fn parent_path(path: &str) -> String {
    let parts = segments(path);
    if parts.len() <= 1 {
        return ROOT.to_string();
    }
    format!("{ROOT}{}", parts[..parts.len() - 1].join("/"))
}

/// Last segment of the path, or an empty string for the root.
pub fn name_from_path(path: &str) -> &str {
    segments(path).last().copied().unwrap_or_default()
}

/// Resolves `path` against `base` unless it is already absolute.
pub fn join(base: &str, path: &str) -> String {
    if path.starts_with(SEPARATOR) {
        return path.to_string();
    }
    let base = base.trim_end_matches(SEPARATOR);
    if base.is_empty() {
        format!("{ROOT}{path}")
    } else {
        format!("{base}{SEPARATOR}{path}")
    }
}

/// Canonical absolute spelling of `path` under virtual path rules.
pub fn normalize(path: &str) -> String {
    let mut canonical: Vec<&str> = Vec::new();
    for part in segments(path) {
        match part {
            "" | "." => {}
            ".." => canonical.clear(),
            name => canonical.push(name),
        }
    }
    format!("{ROOT}{}", canonical.join("/"))
}
