//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::render::{OutputFormat, RenderConfig};
use crate::scan::ScanOptions;

/// linktab - retarget external links in HTML documents to open in a new tab.
#[derive(Parser, Debug)]
#[command(name = "linktab")]
#[command(
    author,
    version,
    about,
    long_about = r#"linktab scans HTML documents for anchor elements, resolves each href to an
absolute URL, and sets the target attribute of every link whose resolved URL
starts with http:// or https:// so it opens in a separate tab. Same-page,
relative, and non-http(s) links (mailto:, ftp:, javascript:) are left
untouched.

Every command prints a ResultSet in the selected format (default: jsonl).

Output formats:
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON array
- md: human-friendly Markdown
- raw: excerpts only (unstable; intended for debugging)

Examples:
    linktab scan
    linktab links --external-only
    linktab annotate --dry-run
    linktab annotate docs --tab popup --base-url https://site.example/
"#
)]
pub struct Cli {
    /// Root directory for all operations.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory for all operations (defaults to the current directory).\n\n\
All paths emitted in results are relative to this root, and positional\n\
scopes are interpreted relative to it."
    )]
    pub root: PathBuf,

    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on md/raw formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan for candidate HTML documents and output a stable list of paths.
    #[command(
        long_about = "Scan the filesystem under ROOT (or an optional --scope) and emit one\n\
result item per candidate document (.html/.htm/.xhtml). Output is sorted\n\
for stability. Gitignore rules are honored unless --no-ignore is given.\n\n\
Examples:\n\
  linktab scan\n\
  linktab scan --scope docs --max-depth 2\n\
  linktab scan --hidden --no-ignore --all\n"
    )]
    Scan {
        /// Limit scanning to a subdirectory under ROOT.
        #[arg(long, value_name = "PATH")]
        scope: Option<PathBuf>,

        /// Maximum directory depth from the scan start.
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,

        /// Include hidden files/directories (dotfiles).
        #[arg(long)]
        hidden: bool,

        /// Disable .gitignore and other ignore rules.
        #[arg(long)]
        no_ignore: bool,

        /// List every file, not just HTML candidates.
        #[arg(long)]
        all: bool,
    },

    /// List anchor elements found in documents.
    #[command(
        long_about = "Parse candidate documents and emit one result item per anchor element,\n\
in document order, with its raw href, resolved URL, current target, and\n\
whether it classifies as external (resolved URL starting with http:// or\n\
https://). This shows exactly what a subsequent annotate run would touch.\n\n\
Examples:\n\
  linktab links\n\
  linktab links docs/index.html --external-only\n\
  linktab links --base-url https://site.example/\n"
    )]
    Links {
        /// Files or directories to inspect (default: scan ROOT).
        #[arg(value_name = "SCOPE")]
        scopes: Vec<PathBuf>,

        /// Only emit anchors classified as external.
        #[arg(long)]
        external_only: bool,

        /// Base URL used to resolve relative hrefs.
        #[arg(
            long,
            value_name = "URL",
            long_help = "Absolute base URL used to resolve relative hrefs, the way a browser\n\
resolves them against the page URL. Overrides any <base href> tag in the\n\
document. Without a base, relative hrefs stay unresolved and classify as\n\
non-external."
        )]
        base_url: Option<String>,
    },

    /// Set the target attribute of external links so they open in a new tab.
    #[command(
        long_about = "Run the annotation pass over candidate documents: every anchor whose\n\
resolved URL starts with http:// or https:// gets its target attribute set\n\
to the tab name (default \"new\"); all other anchors are left byte-for-byte\n\
untouched. Changed documents are written back in place unless --dry-run is\n\
given. Re-running is safe: already-annotated documents come out unchanged.\n\n\
Examples:\n\
  linktab annotate --dry-run\n\
  linktab annotate docs\n\
  linktab annotate index.html --tab popup\n"
    )]
    Annotate {
        /// Files or directories to annotate (default: scan ROOT).
        #[arg(value_name = "SCOPE")]
        scopes: Vec<PathBuf>,

        /// Tab name assigned to external links (empty falls back to "new").
        #[arg(
            long,
            value_name = "NAME",
            long_help = "Browsing-context name assigned to external links. Links sharing a name\n\
reuse the same tab; omit (or pass an empty string) to use the default\n\
\"new\"."
        )]
        tab: Option<String>,

        /// Base URL used to resolve relative hrefs.
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Report what would change without writing any file.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);

    match cli.command {
        Commands::Scan {
            scope,
            max_depth,
            hidden,
            no_ignore,
            all,
        } => {
            let opts = ScanOptions {
                max_depth,
                hidden,
                no_ignore,
                all,
            };
            crate::scan::run_scan(&root, scope.as_deref(), opts, render_config)
        }

        Commands::Links {
            scopes,
            external_only,
            base_url,
        } => crate::links::api::run_links(
            &root,
            &scopes,
            external_only,
            base_url.as_deref(),
            render_config,
        ),

        Commands::Annotate {
            scopes,
            tab,
            base_url,
            dry_run,
        } => crate::links::api::run_annotate(
            &root,
            &scopes,
            tab.as_deref(),
            base_url.as_deref(),
            dry_run,
            render_config,
        ),
    }
}
