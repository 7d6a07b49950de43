//! Output row types for the five tables.
//!
//! Field declaration order matches the column order of the SQL schema the
//! CSVs are bulk-loaded into; the `csv` writer serializes fields in this
//! order, so reordering a field here reorders a column there.

use serde::Serialize;

/// One row of the `nodes` table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NodeRow {
    pub id: String,
    pub lat: String,
    pub lon: String,
    pub user: String,
    pub uid: String,
    pub version: String,
    pub changeset: String,
    pub timestamp: String,
}

/// One row of the `ways` table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WayRow {
    pub id: String,
    pub user: String,
    pub uid: String,
    pub version: String,
    pub changeset: String,
    pub timestamp: String,
}

/// One row of `nodes_tags` or `ways_tags`: a normalized attribute.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagRow {
    /// Foreign key to the owning element.
    pub id: String,
    /// Local key, namespace stripped.
    pub key: String,
    /// Corrected value.
    pub value: String,
    /// Namespace, "regular" for un-namespaced keys.
    #[serde(rename = "type")]
    pub tag_type: String,
}

/// One row of `ways_nodes`: a way's point reference at a given position.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WayNodeRow {
    pub id: String,
    pub node_id: String,
    pub position: usize,
}

/// All rows produced from a single point element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedNode {
    pub row: NodeRow,
    pub tags: Vec<TagRow>,
}

/// All rows produced from a single way element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedWay {
    pub row: WayRow,
    pub nodes: Vec<WayNodeRow>,
    pub tags: Vec<TagRow>,
}

/// The shaped projection of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapedElement {
    Node(ShapedNode),
    Way(ShapedWay),
}
