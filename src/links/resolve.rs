//! Href resolution
//!
//! Computes the absolute form of a raw href the way a browser would: joined
//! against a base URL when one is known, parsed directly otherwise. A href
//! that cannot be made absolute yields None, which the annotation pass
//! treats as non-matching.

use url::Url;

/// Resolve a raw href to an absolute URL string.
///
/// With a base, relative hrefs join against it (`/local/page` on
/// `http://site/` becomes `http://site/local/page`). Without one, only
/// already-absolute hrefs resolve. Scheme casing is normalized to lowercase
/// by the parser, matching browser behavior.
pub fn resolve_href(base: Option<&Url>, href: &str) -> Option<String> {
    match base {
        Some(base) => base.join(href).ok().map(|u| u.to_string()),
        None => Url::parse(href).ok().map(|u| u.to_string()),
    }
}

/// Parse a base URL from caller input (CLI flag or `<base href>` value).
/// Relative or malformed values yield None rather than an error.
pub fn parse_base(raw: &str) -> Option<Url> {
    Url::parse(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_without_base() {
        assert_eq!(
            resolve_href(None, "https://example.com/a"),
            Some("https://example.com/a".to_string())
        );
        assert_eq!(
            resolve_href(None, "mailto:a@b.com"),
            Some("mailto:a@b.com".to_string())
        );
    }

    #[test]
    fn test_resolve_relative_without_base() {
        assert_eq!(resolve_href(None, "/local/page"), None);
        assert_eq!(resolve_href(None, "docs/readme.html"), None);
        assert_eq!(resolve_href(None, "#section"), None);
    }

    #[test]
    fn test_resolve_relative_with_base() {
        let base = parse_base("http://site.example/dir/").unwrap();
        assert_eq!(
            resolve_href(Some(&base), "/local/page"),
            Some("http://site.example/local/page".to_string())
        );
        assert_eq!(
            resolve_href(Some(&base), "child.html"),
            Some("http://site.example/dir/child.html".to_string())
        );
    }

    #[test]
    fn test_resolve_absolute_with_base_ignores_base() {
        let base = parse_base("http://site.example/").unwrap();
        assert_eq!(
            resolve_href(Some(&base), "https://other.example/"),
            Some("https://other.example/".to_string())
        );
    }

    #[test]
    fn test_resolve_normalizes_scheme_case() {
        assert_eq!(
            resolve_href(None, "HTTPS://EXAMPLE.com/Path"),
            Some("https://example.com/Path".to_string())
        );
    }

    #[test]
    fn test_parse_base_rejects_relative() {
        assert!(parse_base("/not/absolute").is_none());
        assert!(parse_base("http://ok.example/").is_some());
    }
}
