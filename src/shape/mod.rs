//! Reshaping of extract elements into flat relational rows.
//!
//! This module turns one [`GeoElement`] at a time into the rows of the five
//! output tables, applying key classification and value normalization per
//! tag along the way.

pub mod element;
pub mod records;
pub mod schema;
pub mod shaper;
pub mod writer;

pub use element::{ElementMeta, GeoElement, Point, RawTag, Way};
pub use records::{NodeRow, ShapedElement, TagRow, WayNodeRow, WayRow};
pub use schema::validate;
pub use shaper::shape_element;
pub use writer::CsvSink;
