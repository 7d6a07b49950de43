//! osmelt-shape: reshape an OSM XML extract into five CSV tables.
//!
//! Usage:
//!   # Write nodes.csv, nodes_tags.csv, ways.csv, ways_nodes.csv and
//!   # ways_tags.csv next to the extract
//!   osmelt-shape ruegen.osm
//!
//!   # Validate every shaped record against the table contract first
//!   # (slower; abort on the first mismatch)
//!   osmelt-shape --validate ruegen.osm

// Large extracts are allocation-heavy; mimalloc helps noticeably.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "osmelt-shape")]
#[command(about = "Reshape an OSM extract into relational CSV tables", long_about = None)]
struct Args {
    /// Path to the OSM XML extract
    #[arg(value_name = "EXTRACT")]
    input: PathBuf,

    /// Check each shaped record against the table schema before writing
    #[arg(long)]
    validate: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let stats = osmelt::process_extract(&args.input, args.validate)
        .with_context(|| format!("failed to process {}", args.input.display()))?;

    println!(
        "nodes: {} ({} tags)\nways: {} ({} tags, {} node refs)\nskipped tags: {}",
        stats.nodes,
        stats.node_tags,
        stats.ways,
        stats.way_tags,
        stats.way_nodes,
        stats.skipped_tags
    );
    Ok(())
}
