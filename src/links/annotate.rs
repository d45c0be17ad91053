//! Annotation engine
//!
//! The single pass at the heart of linktab: walk an ordered set of anchors,
//! test each resolved URL against `^https?://`, and assign the tab name to
//! the target attribute of every match. Non-matching anchors (including
//! anchors whose href never resolved to an absolute URL) are left alone.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tab name used when the caller supplies none (or an empty string).
pub const DEFAULT_TAB_NAME: &str = "new";

/// Static regex classifying external links.
/// Case-sensitive and anchored: resolved URLs carry lowercase schemes.
pub static EXTERNAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://").expect("Invalid EXTERNAL_RE regex"));

/// An anchor as seen by the annotation pass: a resolved absolute URL
/// (None when the raw href could not be resolved) and a mutable
/// browsing-context target.
///
/// The document layer implements this for real HTML anchors; tests implement
/// it for synthetic fixtures.
pub trait AnchorTarget {
    /// Resolved absolute URL, or None if resolution failed.
    fn resolved_url(&self) -> Option<&str>;

    /// Assign the browsing-context target for this anchor.
    fn set_target(&mut self, name: &str);
}

/// Whether a resolved URL classifies as external.
pub fn is_external(resolved_url: &str) -> bool {
    EXTERNAL_RE.is_match(resolved_url)
}

/// Effective tab name for an optional caller-supplied value.
/// Omitted or empty falls back to [`DEFAULT_TAB_NAME`].
pub fn effective_tab_name(tab_name: Option<&str>) -> &str {
    match tab_name {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_TAB_NAME,
    }
}

/// Run the annotation pass over anchors in order.
///
/// Every anchor whose resolved URL matches `^https?://` gets its target set
/// to the tab name; every other anchor is untouched. Returns the number of
/// anchors assigned. The pass has no failure modes: unresolvable hrefs are a
/// filtering outcome, not an error, and an empty slice is a no-op.
pub fn annotate<A: AnchorTarget>(anchors: &mut [A], tab_name: Option<&str>) -> usize {
    let tab = effective_tab_name(tab_name);

    let mut assigned = 0;
    for anchor in anchors.iter_mut() {
        let external = anchor.resolved_url().map(is_external).unwrap_or(false);
        if external {
            anchor.set_target(tab);
            assigned += 1;
        }
    }

    assigned
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeAnchor {
        resolved: Option<String>,
        target: Option<String>,
    }

    impl FakeAnchor {
        fn new(resolved: Option<&str>, target: Option<&str>) -> Self {
            Self {
                resolved: resolved.map(String::from),
                target: target.map(String::from),
            }
        }
    }

    impl AnchorTarget for FakeAnchor {
        fn resolved_url(&self) -> Option<&str> {
            self.resolved.as_deref()
        }

        fn set_target(&mut self, name: &str) {
            self.target = Some(name.to_string());
        }
    }

    #[test]
    fn test_annotate_mixed_document() {
        let mut anchors = vec![
            FakeAnchor::new(Some("https://example.com"), None),
            FakeAnchor::new(None, None), // unresolvable relative href
            FakeAnchor::new(Some("mailto:x@y.com"), None),
        ];

        let assigned = annotate(&mut anchors, None);
        assert_eq!(assigned, 1);
        assert_eq!(anchors[0].target.as_deref(), Some("new"));
        assert_eq!(anchors[1].target, None);
        assert_eq!(anchors[2].target, None);
    }

    #[test]
    fn test_annotate_overwrites_existing_target() {
        let mut anchors = vec![FakeAnchor::new(Some("http://foo.com"), Some("_self"))];

        annotate(&mut anchors, Some("popup"));
        assert_eq!(anchors[0].target.as_deref(), Some("popup"));
    }

    #[test]
    fn test_annotate_empty_is_noop() {
        let mut anchors: Vec<FakeAnchor> = Vec::new();
        assert_eq!(annotate(&mut anchors, None), 0);
    }

    #[test]
    fn test_annotate_empty_tab_name_defaults() {
        let mut anchors = vec![FakeAnchor::new(Some("https://example.com"), None)];

        annotate(&mut anchors, Some(""));
        assert_eq!(anchors[0].target.as_deref(), Some("new"));
    }

    #[test]
    fn test_annotate_is_idempotent() {
        let mut anchors = vec![
            FakeAnchor::new(Some("https://example.com"), None),
            FakeAnchor::new(Some("ftp://files.example.com"), Some("keep")),
        ];

        annotate(&mut anchors, Some("tab"));
        let after_first: Vec<_> = anchors.iter().map(|a| a.target.clone()).collect();

        annotate(&mut anchors, Some("tab"));
        let after_second: Vec<_> = anchors.iter().map(|a| a.target.clone()).collect();

        assert_eq!(after_first, after_second);
        assert_eq!(anchors[1].target.as_deref(), Some("keep"));
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("http://example.com"));
        assert!(is_external("https://example.com/path?q=1"));
        assert!(!is_external("mailto:a@b.com"));
        assert!(!is_external("ftp://example.com"));
        assert!(!is_external("javascript:void(0)"));
        assert!(!is_external("/local/page"));
        // The pattern is case-sensitive; resolution lowercases schemes
        // before the pass ever sees them.
        assert!(!is_external("HTTPS://example.com"));
    }

    #[test]
    fn test_effective_tab_name() {
        assert_eq!(effective_tab_name(None), "new");
        assert_eq!(effective_tab_name(Some("")), "new");
        assert_eq!(effective_tab_name(Some("popup")), "popup");
    }
}
