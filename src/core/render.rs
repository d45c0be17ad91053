//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use crate::core::model::{Kind, ResultItem, ResultSet};
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render to a writer
    #[allow(dead_code)]
    pub fn render_to<W: Write>(
        &self,
        result_set: &ResultSet,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render(result_set);
        writer.write_all(output.as_bytes())
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        // Group by kind
        let mut files = Vec::new();
        let mut links = Vec::new();
        let mut annotations = Vec::new();
        let mut errors = Vec::new();

        for item in &result_set.items {
            match item.kind {
                Kind::File => files.push(item),
                Kind::Link => links.push(item),
                Kind::Annotate => annotations.push(item),
                Kind::Error => errors.push(item),
            }
        }

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}\n", error.code, error.message));
                }
            }
            output.push('\n');
        }

        if !files.is_empty() {
            output.push_str("## Documents\n\n");
            for item in files {
                if let Some(path) = &item.path {
                    output.push_str(&format!("- `{}`", path));
                    if let Some(size) = item.meta.size {
                        output.push_str(&format!(" ({} bytes)", size));
                    }
                    output.push('\n');
                }
            }
            output.push('\n');
        }

        if !links.is_empty() {
            output.push_str("## Links\n\n");
            for item in links {
                self.render_link_md(&mut output, item);
            }
            output.push('\n');
        }

        if !annotations.is_empty() {
            output.push_str("## Annotated\n\n");
            for item in annotations {
                self.render_annotate_md(&mut output, item);
            }
            output.push('\n');
        }

        output
    }

    fn render_link_md(&self, output: &mut String, item: &ResultItem) {
        let path = item.path.as_deref().unwrap_or("?");
        let line = item
            .range
            .map(|r| format!(":{}", r.start))
            .unwrap_or_default();
        let url = item.excerpt.as_deref().unwrap_or("");

        let external = item
            .data
            .as_ref()
            .and_then(|d| d.get("external"))
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let marker = if external { " (external)" } else { "" };

        output.push_str(&format!("- `{}{}`: {}{}\n", path, line, url, marker));
    }

    fn render_annotate_md(&self, output: &mut String, item: &ResultItem) {
        let path = item.path.as_deref().unwrap_or("?");
        let annotated = item
            .data
            .as_ref()
            .and_then(|d| d.get("links_annotated"))
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        let total = item
            .data
            .as_ref()
            .and_then(|d| d.get("links_total"))
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        output.push_str(&format!("- `{}`: {}/{} links annotated", path, annotated, total));
        if let Some(excerpt) = &item.excerpt {
            output.push_str(&format!(" ({})", excerpt));
        }
        output.push('\n');
    }

    /// Render as raw output (for debugging)
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| item.excerpt.clone())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
