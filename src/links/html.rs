//! HTML document layer
//!
//! Provides the anchor source the annotation engine runs against: a
//! lightweight start-tag scanner that finds `<a>` elements, extracts their
//! href/target attributes, resolves hrefs to absolute URLs, and splices
//! rewritten start tags back into the document. Only the start tags of
//! anchors whose target actually changed are touched; every other byte of
//! the document is preserved exactly, so re-running over already-annotated
//! output is byte-stable.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::links::annotate::{annotate, AnchorTarget};
use crate::links::resolve::{parse_base, resolve_href};

/// Static regex for anchor start tags. Tag names are ASCII
/// case-insensitive in HTML.
static A_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a(?:\s[^>]*)?>").expect("Invalid A_TAG_RE regex"));

/// Static regex for the document's `<base>` tag.
static BASE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<base(?:\s[^>]*)?>").expect("Invalid BASE_TAG_RE regex"));

/// href attribute with double-quoted, single-quoted, or unquoted value.
static HREF_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\shref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
        .expect("Invalid HREF_ATTR_RE regex")
});

/// target attribute with double-quoted, single-quoted, or unquoted value.
static TARGET_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\starget\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
        .expect("Invalid TARGET_ATTR_RE regex")
});

/// An anchor element found in a document.
#[derive(Debug, Clone)]
pub struct HtmlAnchor {
    /// Byte range of the start tag within the document.
    pub span: (usize, usize),

    /// 1-indexed line of the start tag.
    pub line: u32,

    /// Raw href attribute value, if present.
    pub href: Option<String>,

    /// Resolved absolute URL, if resolution succeeded.
    pub resolved_url: Option<String>,

    /// Current target attribute value.
    target: Option<String>,

    /// Whether the pass assigned a target different from the original.
    dirty: bool,
}

impl HtmlAnchor {
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

impl AnchorTarget for HtmlAnchor {
    fn resolved_url(&self) -> Option<&str> {
        self.resolved_url.as_deref()
    }

    fn set_target(&mut self, name: &str) {
        if self.target.as_deref() != Some(name) {
            self.target = Some(name.to_string());
            self.dirty = true;
        }
    }
}

/// A parsed document: original content plus its anchors in document order.
#[derive(Debug)]
pub struct HtmlDocument {
    content: String,
    base: Option<Url>,
    pub anchors: Vec<HtmlAnchor>,
}

impl HtmlDocument {
    /// Parse a document, resolving hrefs against `base_override` when given,
    /// otherwise against the document's own `<base href>` tag if it has one.
    pub fn parse(content: &str, base_override: Option<&Url>) -> Self {
        let base = base_override.cloned().or_else(|| document_base(content));

        let mut anchors = Vec::new();
        for m in A_TAG_RE.find_iter(content) {
            let tag = m.as_str();
            let href = extract_attr(tag, &HREF_ATTR_RE);
            let resolved_url = href.as_deref().and_then(|h| resolve_href(base.as_ref(), h));
            let line = content[..m.start()].bytes().filter(|&b| b == b'\n').count() as u32 + 1;

            anchors.push(HtmlAnchor {
                span: (m.start(), m.end()),
                line,
                href,
                resolved_url,
                target: extract_attr(tag, &TARGET_ATTR_RE),
                dirty: false,
            });
        }

        Self {
            content: content.to_string(),
            base,
            anchors,
        }
    }

    /// Base URL in effect for this document, if any.
    #[allow(dead_code)]
    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// Run the annotation pass. Returns the number of anchors whose
    /// resolved URL matched the external pattern.
    pub fn annotate(&mut self, tab_name: Option<&str>) -> usize {
        annotate(&mut self.anchors, tab_name)
    }

    /// Whether rendering would produce different bytes than the input.
    pub fn is_modified(&self) -> bool {
        self.anchors.iter().any(|a| a.dirty)
    }

    /// Render the document with rewritten start tags spliced in.
    ///
    /// Anchors are applied bottom to top so earlier spans stay valid.
    pub fn render(&self) -> String {
        let mut output = self.content.clone();

        for anchor in self.anchors.iter().rev() {
            if !anchor.dirty {
                continue;
            }
            let Some(target) = anchor.target.as_deref() else {
                continue;
            };

            let (start, end) = anchor.span;
            let rewritten = set_tag_target(&self.content[start..end], target);
            output.replace_range(start..end, &rewritten);
        }

        output
    }
}

/// Extract the document's base URL from its `<base href>` tag, if present
/// and absolute.
fn document_base(content: &str) -> Option<Url> {
    let tag = BASE_TAG_RE.find(content)?;
    let href = extract_attr(tag.as_str(), &HREF_ATTR_RE)?;
    parse_base(&href)
}

/// Extract an attribute value from a start tag using one of the attribute
/// regexes above.
fn extract_attr(tag: &str, re: &Regex) -> Option<String> {
    let caps = re.captures(tag)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_string())
}

/// Rewrite a start tag so its target attribute equals `name`.
///
/// An existing target attribute is replaced in place (normalized to
/// double-quoted form); a missing one is inserted before the closing `>`.
fn set_tag_target(tag: &str, name: &str) -> String {
    let attr = format!("target=\"{}\"", name.replace('"', "&quot;"));

    if let Some(m) = TARGET_ATTR_RE.find(tag) {
        // The match includes the leading whitespace; keep a single space.
        let mut out = String::with_capacity(tag.len() + attr.len());
        out.push_str(&tag[..m.start()]);
        out.push(' ');
        out.push_str(&attr);
        out.push_str(&tag[m.end()..]);
        return out;
    }

    let body = tag.strip_suffix('>').unwrap_or(tag);
    let (body, self_closing) = match body.strip_suffix('/') {
        Some(b) => (b, true),
        None => (body, false),
    };

    let mut out = String::from(body.trim_end());
    out.push(' ');
    out.push_str(&attr);
    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
    out
}
