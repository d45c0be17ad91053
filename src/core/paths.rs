//! Path normalization utilities
//!
//! Ensures all paths are normalized to use '/' as separator and are relative to root.

use std::path::Path;

/// Extensions treated as HTML documents.
const HTML_EXTENSIONS: &[&str] = &["html", "htm", "xhtml"];

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Whether a path looks like an HTML document by extension.
pub fn is_html_candidate(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| HTML_EXTENSIONS.iter().any(|c| e.eq_ignore_ascii_case(c)))
        .unwrap_or(false)
}
