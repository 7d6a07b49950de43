//! Tabular sink: five CSV streams with fixed headers.

use crate::shape::records::ShapedElement;
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const NODES_FILE: &str = "nodes.csv";
pub const NODE_TAGS_FILE: &str = "nodes_tags.csv";
pub const WAYS_FILE: &str = "ways.csv";
pub const WAY_NODES_FILE: &str = "ways_nodes.csv";
pub const WAY_TAGS_FILE: &str = "ways_tags.csv";

// Header order must match the column order of the SQL table schema.
const NODE_FIELDS: [&str; 8] = [
    "id",
    "lat",
    "lon",
    "user",
    "uid",
    "version",
    "changeset",
    "timestamp",
];
const NODE_TAGS_FIELDS: [&str; 4] = ["id", "key", "value", "type"];
const WAY_FIELDS: [&str; 6] = ["id", "user", "uid", "version", "changeset", "timestamp"];
const WAY_NODES_FIELDS: [&str; 3] = ["id", "node_id", "position"];
const WAY_TAGS_FIELDS: [&str; 4] = ["id", "key", "value", "type"];

/// Writes shaped elements into the five output streams.
///
/// Headers are written up front so every stream has them even when no row
/// of that kind occurs. All rows of one element are written before the
/// call returns, so the streams stay element-aligned for crash inspection.
pub struct CsvSink<W: Write> {
    nodes: Writer<W>,
    node_tags: Writer<W>,
    ways: Writer<W>,
    way_nodes: Writer<W>,
    way_tags: Writer<W>,
}

impl CsvSink<File> {
    /// Create the five CSV files inside `dir` (typically the directory of
    /// the source extract).
    pub fn create(dir: &Path) -> Result<Self, csv::Error> {
        let open = |name: &str| -> Result<Writer<File>, csv::Error> {
            Ok(WriterBuilder::new()
                .has_headers(false)
                .from_path(dir.join(name))?)
        };
        Self::with_writers(
            open(NODES_FILE)?,
            open(NODE_TAGS_FILE)?,
            open(WAYS_FILE)?,
            open(WAY_NODES_FILE)?,
            open(WAY_TAGS_FILE)?,
        )
    }
}

impl<W: Write> CsvSink<W> {
    fn with_writers(
        mut nodes: Writer<W>,
        mut node_tags: Writer<W>,
        mut ways: Writer<W>,
        mut way_nodes: Writer<W>,
        mut way_tags: Writer<W>,
    ) -> Result<Self, csv::Error> {
        nodes.write_record(NODE_FIELDS)?;
        node_tags.write_record(NODE_TAGS_FIELDS)?;
        ways.write_record(WAY_FIELDS)?;
        way_nodes.write_record(WAY_NODES_FIELDS)?;
        way_tags.write_record(WAY_TAGS_FIELDS)?;
        Ok(CsvSink {
            nodes,
            node_tags,
            ways,
            way_nodes,
            way_tags,
        })
    }

    /// Write all rows of one shaped element to their streams.
    pub fn write(&mut self, shaped: &ShapedElement) -> Result<(), csv::Error> {
        match shaped {
            ShapedElement::Node(node) => {
                self.nodes.serialize(&node.row)?;
                for tag in &node.tags {
                    self.node_tags.serialize(tag)?;
                }
            }
            ShapedElement::Way(way) => {
                self.ways.serialize(&way.row)?;
                for nd in &way.nodes {
                    self.way_nodes.serialize(nd)?;
                }
                for tag in &way.tags {
                    self.way_tags.serialize(tag)?;
                }
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.nodes.flush()?;
        self.node_tags.flush()?;
        self.ways.flush()?;
        self.way_nodes.flush()?;
        self.way_tags.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::records::{NodeRow, ShapedNode, TagRow};

    fn sink_into_buffers() -> CsvSink<Vec<u8>> {
        let writer = || WriterBuilder::new().has_headers(false).from_writer(Vec::new());
        CsvSink::with_writers(writer(), writer(), writer(), writer(), writer()).unwrap()
    }

    fn finish(writer: Writer<Vec<u8>>) -> String {
        match writer.into_inner() {
            Ok(buf) => String::from_utf8(buf).unwrap(),
            Err(_) => panic!("writer flush failed"),
        }
    }

    #[test]
    fn headers_are_written_even_without_rows() {
        let mut sink = sink_into_buffers();
        sink.flush().unwrap();
        assert_eq!(
            finish(sink.nodes),
            "id,lat,lon,user,uid,version,changeset,timestamp\n"
        );
        assert_eq!(finish(sink.way_nodes), "id,node_id,position\n");
    }

    #[test]
    fn node_rows_and_tags_land_in_their_streams() {
        let mut sink = sink_into_buffers();
        let shaped = ShapedElement::Node(ShapedNode {
            row: NodeRow {
                id: "1".into(),
                lat: "54.4".into(),
                lon: "13.4".into(),
                user: "mapper".into(),
                uid: "42".into(),
                version: "2".into(),
                changeset: "7".into(),
                timestamp: "2020-04-16T00:00:00Z".into(),
            },
            tags: vec![TagRow {
                id: "1".into(),
                key: "city".into(),
                value: "Binz".into(),
                tag_type: "addr".into(),
            }],
        });
        sink.write(&shaped).unwrap();
        sink.flush().unwrap();

        let nodes = finish(sink.nodes);
        assert!(nodes.ends_with("1,54.4,13.4,mapper,42,2,7,2020-04-16T00:00:00Z\n"));
        assert_eq!(
            finish(sink.node_tags),
            "id,key,value,type\n1,city,Binz,addr\n"
        );
    }
}
