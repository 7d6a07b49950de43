//! Owned representations of extract elements.
//!
//! One of these is built per `node`/`way` element by the streaming reader
//! and dropped as soon as its rows have been written; nothing is shared
//! across elements.

/// Scalar provenance fields common to points and ways. Absent source
/// attributes are kept as empty strings so output columns never go missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementMeta {
    pub id: String,
    pub user: String,
    pub uid: String,
    pub version: String,
    pub changeset: String,
    pub timestamp: String,
}

/// A raw key/value tag as it appears in the source, order-preserving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub key: String,
    pub value: String,
}

impl RawTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        RawTag {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A point element with coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Point {
    pub meta: ElementMeta,
    pub lat: String,
    pub lon: String,
    pub tags: Vec<RawTag>,
}

/// A way element: an ordered sequence of point references plus tags.
/// The `node_refs` order defines the way's shape and must survive into the
/// output positions untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Way {
    pub meta: ElementMeta,
    pub node_refs: Vec<String>,
    pub tags: Vec<RawTag>,
}

/// A geographic element from the extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoElement {
    Point(Point),
    Way(Way),
}

impl GeoElement {
    pub fn meta(&self) -> &ElementMeta {
        match self {
            GeoElement::Point(p) => &p.meta,
            GeoElement::Way(w) => &w.meta,
        }
    }

    pub fn tags(&self) -> &[RawTag] {
        match self {
            GeoElement::Point(p) => &p.tags,
            GeoElement::Way(w) => &w.tags,
        }
    }
}
