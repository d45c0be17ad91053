//! Unified document reading
//!
//! Consistent handling for non-UTF-8, binary, and oversized documents.
//! Because documents feed a rewrite-and-save cycle, content is never
//! truncated: an oversized file is skipped outright. Lossy UTF-8 conversion
//! is allowed for read-only inspection but flagged, so the annotate path can
//! refuse to write back bytes that no longer match the original.

use std::fs;
use std::path::Path;

/// Maximum document size in bytes (16 MB)
pub const MAX_DOCUMENT_SIZE: u64 = 16 * 1024 * 1024;

/// Result of reading a document
#[derive(Debug, Clone)]
pub struct DocumentReadResult {
    /// The document content (if successfully read)
    pub content: Option<String>,

    /// Whether lossy conversion was used
    pub lossy_conversion: bool,

    /// Reason for skipping (if skipped)
    pub skip_reason: Option<String>,
}

impl DocumentReadResult {
    pub fn success(content: String) -> Self {
        Self {
            content: Some(content),
            lossy_conversion: false,
            skip_reason: None,
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            content: None,
            lossy_conversion: false,
            skip_reason: Some(reason.into()),
        }
    }

    #[allow(dead_code)]
    pub fn is_skipped(&self) -> bool {
        self.skip_reason.is_some()
    }
}

/// Read a document for link processing.
///
/// Skips files over [`MAX_DOCUMENT_SIZE`] and files that look binary
/// (null bytes in the first 8 KB). Invalid UTF-8 is converted lossily and
/// flagged via `lossy_conversion`.
pub fn read_document(path: &Path) -> DocumentReadResult {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => return DocumentReadResult::skipped(format!("Cannot read metadata: {}", e)),
    };

    if metadata.len() > MAX_DOCUMENT_SIZE {
        return DocumentReadResult::skipped(format!(
            "Document size {} exceeds limit {}",
            metadata.len(),
            MAX_DOCUMENT_SIZE
        ));
    }

    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => return DocumentReadResult::skipped(format!("Cannot read file: {}", e)),
    };

    let check_len = std::cmp::min(8192, bytes.len());
    if bytes[..check_len].contains(&0) {
        return DocumentReadResult::skipped("Binary file (contains null bytes)");
    }

    match String::from_utf8(bytes) {
        Ok(content) => DocumentReadResult::success(content),
        Err(e) => {
            let content = String::from_utf8_lossy(e.as_bytes()).into_owned();
            DocumentReadResult {
                content: Some(content),
                lossy_conversion: true,
                skip_reason: None,
            }
        }
    }
}
