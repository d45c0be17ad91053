//! Link API - list and annotate operations over documents on disk

use anyhow::{bail, Context, Result};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::core::file_reader::read_document;
use crate::core::model::{LinktabError, Meta, Range, ResultItem, ResultSet};
use crate::core::paths::{make_relative, normalize_path};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{get_mtime_ms, hash_bytes};
use crate::links::annotate::is_external;
use crate::links::html::HtmlDocument;
use crate::links::resolve::parse_base;
use crate::scan::{collect_documents, ScanOptions};

/// Parse the --base-url flag. An unparseable value is a usage error, unlike
/// malformed hrefs inside documents (which just classify as non-matching).
fn base_from_flag(base_url: Option<&str>) -> Result<Option<Url>> {
    match base_url {
        None => Ok(None),
        Some(raw) => match parse_base(raw) {
            Some(url) => Ok(Some(url)),
            None => bail!("Invalid base URL: {}", raw),
        },
    }
}

fn relative_or_display(path: &Path, root: &Path) -> String {
    make_relative(path, root).unwrap_or_else(|| normalize_path(path))
}

/// List anchors found in documents under the given scopes.
pub fn list_links(
    root: &Path,
    scopes: &[PathBuf],
    external_only: bool,
    base_url: Option<&str>,
) -> Result<ResultSet> {
    let base = base_from_flag(base_url)?;
    let mut result_set = ResultSet::new();

    for path in collect_documents(root, scopes, ScanOptions::default())? {
        let rel = relative_or_display(&path, root);

        let read = read_document(&path);
        let Some(content) = read.content else {
            let reason = read.skip_reason.unwrap_or_else(|| "unreadable".to_string());
            result_set.push(ResultItem::error(LinktabError::new("READ_SKIPPED", reason)).with_path(rel));
            continue;
        };

        let doc = HtmlDocument::parse(&content, base.as_ref());
        for anchor in &doc.anchors {
            let external = anchor
                .resolved_url
                .as_deref()
                .map(is_external)
                .unwrap_or(false);
            if external_only && !external {
                continue;
            }

            let excerpt = anchor
                .resolved_url
                .clone()
                .or_else(|| anchor.href.clone())
                .unwrap_or_else(|| "(no href)".to_string());

            result_set.push(
                ResultItem::link(rel.clone(), Range::line(anchor.line), excerpt).with_data(json!({
                    "href": anchor.href,
                    "resolved_url": anchor.resolved_url,
                    "target": anchor.target(),
                    "external": external,
                })),
            );
        }
    }

    result_set.sort();
    Ok(result_set)
}

/// Annotate documents under the given scopes, writing changed files back
/// unless `dry_run` is set. Emits one result item per document.
pub fn annotate_documents(
    root: &Path,
    scopes: &[PathBuf],
    tab_name: Option<&str>,
    base_url: Option<&str>,
    dry_run: bool,
) -> Result<ResultSet> {
    let base = base_from_flag(base_url)?;
    let mut result_set = ResultSet::new();

    for path in collect_documents(root, scopes, ScanOptions::default())? {
        let rel = relative_or_display(&path, root);

        let read = read_document(&path);
        let Some(content) = read.content else {
            let reason = read.skip_reason.unwrap_or_else(|| "unreadable".to_string());
            result_set.push(ResultItem::error(LinktabError::new("READ_SKIPPED", reason)).with_path(rel));
            continue;
        };

        // A lossy read no longer matches the bytes on disk; writing it back
        // would corrupt the document.
        if read.lossy_conversion && !dry_run {
            result_set.push(
                ResultItem::error(LinktabError::new(
                    "LOSSY_CONVERSION",
                    "Document is not valid UTF-8; refusing to rewrite (use --dry-run to inspect)",
                ))
                .with_path(rel),
            );
            continue;
        }

        let mut doc = HtmlDocument::parse(&content, base.as_ref());
        let links_total = doc.anchors.len();
        let links_annotated = doc.annotate(tab_name);
        let changed = doc.is_modified();
        let rendered = doc.render();

        if changed && !dry_run {
            if let Err(e) = fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write document: {}", rel))
            {
                result_set.push(
                    ResultItem::error(LinktabError::new("WRITE_FAILED", e.to_string()))
                        .with_path(rel),
                );
                continue;
            }
        }

        let mut meta = Meta {
            size: Some(rendered.len() as u64),
            hash: Some(hash_bytes(rendered.as_bytes())),
            ..Default::default()
        };
        if let Ok(mtime) = get_mtime_ms(&path) {
            meta.mtime_ms = Some(mtime);
        }

        let excerpt = if changed {
            format!("{} of {} links set to open in a new tab", links_annotated, links_total)
        } else {
            "no changes".to_string()
        };

        result_set.push(
            ResultItem::annotate(rel)
                .with_data(json!({
                    "links_total": links_total,
                    "links_annotated": links_annotated,
                    "changed": changed,
                    "dry_run": dry_run,
                }))
                .with_meta(meta)
                .with_excerpt(excerpt),
        );
    }

    result_set.sort();
    Ok(result_set)
}

/// Run the links command
pub fn run_links(
    root: &Path,
    scopes: &[PathBuf],
    external_only: bool,
    base_url: Option<&str>,
    config: RenderConfig,
) -> Result<()> {
    let result_set = list_links(root, scopes, external_only, base_url)?;

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    Ok(())
}

/// Run the annotate command
pub fn run_annotate(
    root: &Path,
    scopes: &[PathBuf],
    tab_name: Option<&str>,
    base_url: Option<&str>,
    dry_run: bool,
    config: RenderConfig,
) -> Result<()> {
    let result_set = annotate_documents(root, scopes, tab_name, base_url, dry_run)?;

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    Ok(())
}
