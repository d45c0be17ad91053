//! Document discovery
//!
//! Walks the tree with the ignore crate (gitignore rules honored by
//! default) and emits candidate HTML documents in stable sorted order. The
//! links and annotate commands build on the same traversal.

use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::paths::{is_html_candidate, make_relative};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{get_file_size, get_mtime_ms};

/// Traversal options for document discovery
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub max_depth: Option<usize>,
    pub hidden: bool,
    pub no_ignore: bool,
    /// Include every file, not just HTML candidates
    pub all: bool,
}

/// Collect candidate documents under a directory, sorted by relative path.
pub fn scan_documents(root: &Path, scope: Option<&Path>, opts: ScanOptions) -> Result<Vec<PathBuf>> {
    let scan_path = match scope {
        Some(s) if s.is_absolute() => s.to_path_buf(),
        Some(s) => root.join(s),
        None => root.to_path_buf(),
    };

    let mut builder = WalkBuilder::new(&scan_path);
    builder
        .hidden(!opts.hidden)
        .git_ignore(!opts.no_ignore)
        .git_global(!opts.no_ignore)
        .git_exclude(!opts.no_ignore);

    if let Some(depth) = opts.max_depth {
        builder.max_depth(Some(depth));
    }

    let mut paths = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if !opts.all && !is_html_candidate(path) {
            continue;
        }

        paths.push(path.to_path_buf());
    }

    paths.sort();
    Ok(paths)
}

/// Resolve explicit scope arguments into concrete document paths.
///
/// A scope naming a file is taken as-is (no candidate filter: an explicit
/// file is processed even with an unusual extension); a scope naming a
/// directory is scanned for candidates.
pub fn collect_documents(root: &Path, scopes: &[PathBuf], opts: ScanOptions) -> Result<Vec<PathBuf>> {
    if scopes.is_empty() {
        return scan_documents(root, None, opts);
    }

    let mut paths = Vec::new();
    for scope in scopes {
        let full = if scope.is_absolute() {
            scope.clone()
        } else {
            root.join(scope)
        };

        if full.is_dir() {
            paths.extend(scan_documents(root, Some(scope.as_path()), opts)?);
        } else {
            paths.push(full);
        }
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// Run the scan command
pub fn run_scan(
    root: &Path,
    scope: Option<&Path>,
    opts: ScanOptions,
    config: RenderConfig,
) -> Result<()> {
    let mut result_set = ResultSet::new();

    for path in scan_documents(root, scope, opts)? {
        let relative = match make_relative(&path, root) {
            Some(r) => r,
            None => continue,
        };

        let mut meta = Meta::default();
        if let Ok(size) = get_file_size(&path) {
            meta.size = Some(size);
        }
        if let Ok(mtime) = get_mtime_ms(&path) {
            meta.mtime_ms = Some(mtime);
        }

        result_set.push(ResultItem::file(relative).with_meta(meta));
    }

    result_set.sort();

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_filters_to_html_candidates() {
        let temp = tempdir().unwrap();
        write(temp.path(), "index.html", "<html></html>");
        write(temp.path(), "style.css", "body {}");
        write(temp.path(), "sub/page.htm", "<html></html>");

        let paths = scan_documents(temp.path(), None, ScanOptions::default()).unwrap();
        let rels: Vec<_> = paths
            .iter()
            .map(|p| make_relative(p, temp.path()).unwrap())
            .collect();

        assert_eq!(rels, vec!["index.html", "sub/page.htm"]);
    }

    #[test]
    fn test_scan_all_includes_everything() {
        let temp = tempdir().unwrap();
        write(temp.path(), "index.html", "<html></html>");
        write(temp.path(), "style.css", "body {}");

        let opts = ScanOptions {
            all: true,
            ..Default::default()
        };
        let paths = scan_documents(temp.path(), None, opts).unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_scan_max_depth() {
        let temp = tempdir().unwrap();
        write(temp.path(), "top.html", "x");
        write(temp.path(), "deep/nested/page.html", "x");

        let opts = ScanOptions {
            max_depth: Some(1),
            ..Default::default()
        };
        let paths = scan_documents(temp.path(), None, opts).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_collect_documents_explicit_file_bypasses_filter() {
        let temp = tempdir().unwrap();
        write(temp.path(), "page.txt", "<a href=\"https://a.example\">x</a>");

        let paths = collect_documents(
            temp.path(),
            &[PathBuf::from("page.txt")],
            ScanOptions::default(),
        )
        .unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_collect_documents_directory_scope() {
        let temp = tempdir().unwrap();
        write(temp.path(), "docs/a.html", "x");
        write(temp.path(), "docs/b.css", "x");
        write(temp.path(), "other/c.html", "x");

        let paths = collect_documents(
            temp.path(),
            &[PathBuf::from("docs")],
            ScanOptions::default(),
        )
        .unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("docs/a.html"));
    }
}
