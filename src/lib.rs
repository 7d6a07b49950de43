//! # osmelt: OSM extract auditing and tabular reshaping
//!
//! A batch toolkit that audits free-text address tags in an OpenStreetMap
//! XML extract and reshapes its element graph into five flat CSV tables
//! (`nodes`, `nodes_tags`, `ways`, `ways_nodes`, `ways_tags`) ready for
//! bulk loading into a relational store.
//!
//! ## Modules
//!
//! - **reader**: streaming pull of point/way elements, one at a time
//! - **keys**: tag key classification and namespace splitting
//! - **normalize**: city/street/postcode correction rules
//! - **shape**: relational projection of elements plus the CSV sink
//! - **audit**: tallies for the reporting tools
//!
//! ## Quick start
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> Result<(), osmelt::Error> {
//! let stats = osmelt::process_extract(Path::new("ruegen.osm"), true)?;
//! println!("{} nodes, {} ways", stats.nodes, stats.ways);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod error;
pub mod keys;
pub mod normalize;
pub mod reader;
pub mod shape;

pub use error::{Error, ValidationFailure};
pub use keys::{classify, is_unproblematic, split_namespace, KeyCategory, DEFAULT_NAMESPACE};
pub use reader::ElementReader;
pub use shape::{shape_element, CsvSink, GeoElement, ShapedElement};

use log::{debug, info};
use std::path::Path;

/// Row counts from one shaping run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeStats {
    pub nodes: u64,
    pub ways: u64,
    pub node_tags: u64,
    pub way_tags: u64,
    pub way_nodes: u64,
    /// Tags dropped because their key carries a problem character.
    pub skipped_tags: u64,
}

/// Main entry point: stream the extract at `path`, shape every point and
/// way, and write the five CSV files next to the source.
///
/// With `validate` set, every shaped element is checked against the fixed
/// table contract before writing; the first mismatch aborts the run. All
/// rows of an element are written before the next element is read, and
/// nothing is kept in memory across elements.
pub fn process_extract(path: &Path, validate: bool) -> Result<ShapeStats, Error> {
    let out_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut sink = CsvSink::create(out_dir)?;
    let mut stats = ShapeStats::default();

    for element in ElementReader::open(path)? {
        let element = element?;
        let raw_tags = element.tags().len() as u64;
        let shaped = shape_element(&element);
        if validate {
            shape::validate(&shaped)?;
        }
        match &shaped {
            ShapedElement::Node(node) => {
                stats.nodes += 1;
                stats.node_tags += node.tags.len() as u64;
                stats.skipped_tags += raw_tags - node.tags.len() as u64;
            }
            ShapedElement::Way(way) => {
                stats.ways += 1;
                stats.way_tags += way.tags.len() as u64;
                stats.way_nodes += way.nodes.len() as u64;
                stats.skipped_tags += raw_tags - way.tags.len() as u64;
            }
        }
        sink.write(&shaped)?;
        if (stats.nodes + stats.ways) % 100_000 == 0 {
            debug!("processed {} nodes, {} ways", stats.nodes, stats.ways);
        }
    }

    sink.flush()?;
    info!(
        "wrote {} nodes ({} tags), {} ways ({} tags, {} node refs) to {}; {} tags skipped",
        stats.nodes,
        stats.node_tags,
        stats.ways,
        stats.way_tags,
        stats.way_nodes,
        out_dir.display(),
        stats.skipped_tags
    );
    Ok(stats)
}
