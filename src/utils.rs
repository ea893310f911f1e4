//! Common utility functions shared across the codebase.

use std::path::Path;

/// Checks if the text looks like a dotted translation key.
///
/// A dotted key has at least two segments, and every segment is a
/// non-empty run of ASCII letters, digits, `_` or `-`.
///
/// # Examples
///
/// ```
/// use i18n_report::utils::is_valid_dotted_key;
///
/// assert!(is_valid_dotted_key("action.refresh"));
/// assert!(is_valid_dotted_key("containerEngine.tabs.general"));
/// assert!(!is_valid_dotted_key("single"));
/// assert!(!is_valid_dotted_key("double..dot"));
/// ```
pub fn is_valid_dotted_key(text: &str) -> bool {
    let mut segments = 0;
    for segment in text.split('.') {
        if !is_key_segment(segment) {
            return false;
        }
        segments += 1;
    }
    segments >= 2
}

/// Checks if the text is a single key segment (`[A-Za-z0-9_-]+`).
pub fn is_key_segment(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Render `path` relative to `root` with forward slashes.
///
/// Falls back to the full path when `path` is not under `root`.
pub fn relative_display(root: &Path, path: &Path) -> String {
    let Ok(rel) = path.strip_prefix(root) else {
        return path.to_string_lossy().into_owned();
    };
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
