// src/watch/path_utils.rs

//! Utility functions for path handling in filters and hierarchies.

/// Normalize a path string to the form used as a hierarchy key.
///
/// - Backslashes become forward slashes.
/// - Trailing slashes are dropped, except for the file-system root `/`.
pub fn normalize_path(path: &str) -> String {
    let s = path.replace('\\', "/");
    let trimmed = s.trim_end_matches('/');
    if trimmed.is_empty() && s.starts_with('/') {
        return "/".to_string();
    }
    trimmed.to_string()
}

/// Returns true if `path` is `root` itself or nested below it.
///
/// Both arguments are expected to be normalized. The check is
/// component-aware: `/project` contains `/project/a` but not `/projectx`.
pub fn is_within(root: &str, path: &str) -> bool {
    if root == "/" {
        return path.starts_with('/');
    }
    match path.strip_prefix(root) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}
