//! linktab - retarget external links in HTML documents
//!
//! linktab provides:
//! - Document scanning with configurable ignore patterns
//! - Anchor enumeration with browser-style href resolution
//! - An annotation pass that makes external (http/https) links open in a
//!   new tab, leaving every other link untouched
//! - Unified output format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod links;
mod scan;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
