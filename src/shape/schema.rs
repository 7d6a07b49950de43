//! Fixed column contract for the output tables.
//!
//! Validation is optional and meant as a pre-load safety net: the loader's
//! SQL schema types these columns, so a row that fails here would fail or
//! silently corrupt the bulk insert later. A failure aborts the whole run,
//! since one bad row means the extract itself is structurally off.

use crate::error::ValidationFailure;
use crate::shape::records::{NodeRow, ShapedElement, TagRow, WayNodeRow, WayRow};

/// Column value types the loader distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Must parse as a signed integer.
    Integer,
    /// Must parse as a float, or be empty. Coordinates are optional on the
    /// source element and absent ones are carried as empty strings.
    FloatOrEmpty,
    /// Any string, including empty.
    Text,
}

fn check(
    table: &'static str,
    field: &'static str,
    ty: ColumnType,
    value: &str,
) -> Result<(), ValidationFailure> {
    let ok = match ty {
        ColumnType::Integer => value.parse::<i64>().is_ok(),
        ColumnType::FloatOrEmpty => value.is_empty() || value.parse::<f64>().is_ok(),
        ColumnType::Text => true,
    };
    if ok {
        Ok(())
    } else {
        Err(ValidationFailure {
            table,
            field,
            reason: match ty {
                ColumnType::Integer => "is not an integer",
                ColumnType::FloatOrEmpty => "is not a float",
                ColumnType::Text => "is not text",
            },
            value: value.to_string(),
        })
    }
}

fn validate_node(row: &NodeRow) -> Result<(), ValidationFailure> {
    check("nodes", "id", ColumnType::Integer, &row.id)?;
    check("nodes", "lat", ColumnType::FloatOrEmpty, &row.lat)?;
    check("nodes", "lon", ColumnType::FloatOrEmpty, &row.lon)?;
    Ok(())
}

fn validate_way(row: &WayRow) -> Result<(), ValidationFailure> {
    check("ways", "id", ColumnType::Integer, &row.id)
}

fn validate_tag(table: &'static str, row: &TagRow) -> Result<(), ValidationFailure> {
    check(table, "id", ColumnType::Integer, &row.id)?;
    check(table, "value", ColumnType::Text, &row.value)?;
    if row.key.is_empty() {
        return Err(ValidationFailure {
            table,
            field: "key",
            reason: "is empty",
            value: String::new(),
        });
    }
    if row.tag_type.is_empty() {
        return Err(ValidationFailure {
            table,
            field: "type",
            reason: "is empty",
            value: String::new(),
        });
    }
    Ok(())
}

fn validate_way_node(row: &WayNodeRow) -> Result<(), ValidationFailure> {
    check("ways_nodes", "id", ColumnType::Integer, &row.id)?;
    check("ways_nodes", "node_id", ColumnType::Integer, &row.node_id)?;
    Ok(())
}

/// Validate every row of a shaped element against the table contract.
/// Returns the first mismatch, identifying table, field and offending value.
pub fn validate(shaped: &ShapedElement) -> Result<(), ValidationFailure> {
    match shaped {
        ShapedElement::Node(node) => {
            validate_node(&node.row)?;
            for tag in &node.tags {
                validate_tag("nodes_tags", tag)?;
            }
        }
        ShapedElement::Way(way) => {
            validate_way(&way.row)?;
            for nd in &way.nodes {
                validate_way_node(nd)?;
            }
            for tag in &way.tags {
                validate_tag("ways_tags", tag)?;
            }
        }
    }
    Ok(())
}
