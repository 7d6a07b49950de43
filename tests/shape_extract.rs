//! End-to-end test: a small extract through shaping to the five CSV files.

use osmelt::{process_extract, Error};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="test">
  <bounds minlat="54.0" minlon="13.0" maxlat="55.0" maxlon="14.0"/>
  <node id="1" lat="54.40" lon="13.60" user="mapper" uid="42" version="2" changeset="7" timestamp="2020-04-16T00:00:00Z">
    <tag k="addr:city" v="Ostseebad Binz/Prora"/>
    <tag k="addr:street" v="Bahnhofstr. 5"/>
    <tag k="note,old" v="should never appear"/>
    <tag k="openGeoDB:postal_codes" v="18609"/>
  </node>
  <node id="2" lat="54.50" lon="13.50"/>
  <way id="10" user="mapper" uid="42" version="1" changeset="8" timestamp="2020-04-16T00:00:00Z">
    <nd ref="2"/>
    <nd ref="1"/>
    <nd ref="2"/>
    <tag k="seamark:light:orientation" v="45"/>
    <tag k="highway" v="residential"/>
  </way>
  <relation id="100">
    <member type="way" ref="10" role="outer"/>
    <tag k="type" v="multipolygon"/>
  </relation>
</osm>
"#;

fn write_sample(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("sample.osm");
    fs::write(&path, SAMPLE).unwrap();
    path
}

fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

#[test]
fn shapes_extract_into_five_tables() {
    let dir = tempdir().unwrap();
    let source = write_sample(dir.path());

    let stats = process_extract(&source, true).unwrap();
    assert_eq!(stats.nodes, 2);
    assert_eq!(stats.ways, 1);
    assert_eq!(stats.node_tags, 3); // "note,old" dropped
    assert_eq!(stats.way_tags, 2);
    assert_eq!(stats.way_nodes, 3);
    assert_eq!(stats.skipped_tags, 1); // exactly the "note,old" tag

    // nodes.csv: fixed column order, empty strings for missing provenance.
    let (headers, rows) = read_rows(&dir.path().join("nodes.csv"));
    assert_eq!(
        headers,
        vec!["id", "lat", "lon", "user", "uid", "version", "changeset", "timestamp"]
    );
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        vec!["1", "54.40", "13.60", "mapper", "42", "2", "7", "2020-04-16T00:00:00Z"]
    );
    assert_eq!(rows[1], vec!["2", "54.50", "13.50", "", "", "", "", ""]);

    // nodes_tags.csv: normalized values, source tag order, no problematic key.
    let (headers, rows) = read_rows(&dir.path().join("nodes_tags.csv"));
    assert_eq!(headers, vec!["id", "key", "value", "type"]);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["1", "city", "Binz", "addr"]);
    assert_eq!(rows[1], vec!["1", "street", "Bahnhofstraße", "addr"]);
    assert_eq!(rows[2], vec!["1", "postal_codes", "18609", "openGeoDB"]);
    assert!(rows.iter().all(|row| !row[2].contains("should never appear")));

    // ways.csv
    let (headers, rows) = read_rows(&dir.path().join("ways.csv"));
    assert_eq!(
        headers,
        vec!["id", "user", "uid", "version", "changeset", "timestamp"]
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "10");

    // ways_nodes.csv: contiguous positions in document order, repeats kept.
    let (headers, rows) = read_rows(&dir.path().join("ways_nodes.csv"));
    assert_eq!(headers, vec!["id", "node_id", "position"]);
    assert_eq!(
        rows,
        vec![
            vec!["10", "2", "0"],
            vec!["10", "1", "1"],
            vec!["10", "2", "2"],
        ]
    );

    // ways_tags.csv: first colon splits, the rest stays in the local key.
    let (_, rows) = read_rows(&dir.path().join("ways_tags.csv"));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["10", "light:orientation", "45", "seamark"]);
    assert_eq!(rows[1], vec!["10", "highway", "residential", "regular"]);
}

#[test]
fn node_without_coordinates_survives_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nocoord.osm");
    fs::write(
        &path,
        r#"<osm><node id="1" user="mapper" uid="42" version="1" changeset="7" timestamp="2020-04-16T00:00:00Z"/></osm>"#,
    )
    .unwrap();

    let stats = process_extract(&path, true).unwrap();
    assert_eq!(stats.nodes, 1);
    let (_, rows) = read_rows(&dir.path().join("nodes.csv"));
    assert_eq!(rows[0][0], "1");
    assert_eq!(rows[0][1], "");
    assert_eq!(rows[0][2], "");
}

#[test]
fn validation_failure_aborts_the_run() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.osm");
    fs::write(
        &path,
        r#"<osm><node id="1" lat="north" lon="13.5"/></osm>"#,
    )
    .unwrap();

    let err = process_extract(&path, true).unwrap_err();
    match err {
        Error::Validation(failure) => {
            assert_eq!(failure.table, "nodes");
            assert_eq!(failure.field, "lat");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn validation_disabled_passes_odd_rows_through() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("odd.osm");
    fs::write(
        &path,
        r#"<osm><node id="1" lat="north" lon="13.5"/></osm>"#,
    )
    .unwrap();

    let stats = process_extract(&path, false).unwrap();
    assert_eq!(stats.nodes, 1);
    let (_, rows) = read_rows(&dir.path().join("nodes.csv"));
    assert_eq!(rows[0][1], "north");
}

#[test]
fn malformed_extract_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.osm");
    fs::write(&path, "<osm><node id=\"1\"").unwrap();

    let err = process_extract(&path, false).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedSource(_) | Error::UnclosedElement(_)
    ));
}
