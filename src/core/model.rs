//! Unified Result Model
//!
//! Every command maps its outcome to this model before rendering, so the
//! output shape is the same whether a run scanned documents, listed links,
//! or rewrote files.

use serde::{Deserialize, Serialize};

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// A candidate document discovered by scan
    File,
    /// A single anchor element found in a document
    Link,
    /// The outcome of annotating one document
    Annotate,
    Error,
}

/// 1-indexed line range within a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

impl Range {
    pub fn lines(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn line(line: u32) -> Self {
        Self {
            start: line,
            end: line,
        }
    }
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Modification time in milliseconds since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtime_ms: Option<i64>,

    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// XXH3 hash of the document content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// Error information for a result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinktabError {
    pub code: String,
    pub message: String,
}

impl LinktabError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item every command produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Path relative to root, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Line range within the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,

    /// Short human-readable excerpt (href, summary line, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Structured payload (link details, annotation counts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Metadata
    #[serde(default)]
    pub meta: Meta,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<LinktabError>,
}

impl ResultItem {
    /// Create a new file result
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            kind: Kind::File,
            path: Some(path.into()),
            range: None,
            excerpt: None,
            data: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a new link result
    pub fn link(path: impl Into<String>, range: Range, excerpt: impl Into<String>) -> Self {
        Self {
            kind: Kind::Link,
            path: Some(path.into()),
            range: Some(range),
            excerpt: Some(excerpt.into()),
            data: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a new annotate result
    pub fn annotate(path: impl Into<String>) -> Self {
        Self {
            kind: Kind::Annotate,
            path: Some(path.into()),
            range: None,
            excerpt: None,
            data: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a new error result
    pub fn error(error: LinktabError) -> Self {
        Self {
            kind: Kind::Error,
            path: None,
            range: None,
            excerpt: None,
            data: None,
            meta: Meta::default(),
            errors: vec![error],
        }
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Set structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the excerpt
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    #[allow(dead_code)]
    pub fn extend(&mut self, items: impl IntoIterator<Item = ResultItem>) {
        self.items.extend(items);
    }

    /// Sort items by path and range start for stable output
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| {
            match (&a.path, &b.path) {
                (Some(pa), Some(pb)) => {
                    let path_cmp = pa.cmp(pb);
                    if path_cmp != std::cmp::Ordering::Equal {
                        return path_cmp;
                    }
                    // Same document: keep document order by range start
                    match (&a.range, &b.range) {
                        (Some(ra), Some(rb)) => ra.start.cmp(&rb.start),
                        (Some(_), None) => std::cmp::Ordering::Less,
                        (None, Some(_)) => std::cmp::Ordering::Greater,
                        (None, None) => std::cmp::Ordering::Equal,
                    }
                }
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
