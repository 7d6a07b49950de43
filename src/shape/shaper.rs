//! Projection of one element into its relational rows.

use crate::keys::{is_unproblematic, split_namespace};
use crate::normalize::{is_city_key, is_street_key, normalize_city, normalize_street};
use crate::shape::element::{GeoElement, RawTag};
use crate::shape::records::{
    NodeRow, ShapedElement, ShapedNode, ShapedWay, TagRow, WayNodeRow, WayRow,
};

/// Shape one element into the rows of its target tables.
///
/// Tags with problematic keys are dropped silently; the remaining tags keep
/// their source order. Way point references get contiguous zero-based
/// positions in document order, whether or not the referenced points exist
/// (reference validation is the loader's job).
pub fn shape_element(element: &GeoElement) -> ShapedElement {
    match element {
        GeoElement::Point(point) => ShapedElement::Node(ShapedNode {
            row: NodeRow {
                id: point.meta.id.clone(),
                lat: point.lat.clone(),
                lon: point.lon.clone(),
                user: point.meta.user.clone(),
                uid: point.meta.uid.clone(),
                version: point.meta.version.clone(),
                changeset: point.meta.changeset.clone(),
                timestamp: point.meta.timestamp.clone(),
            },
            tags: shape_tags(&point.tags, &point.meta.id),
        }),
        GeoElement::Way(way) => ShapedElement::Way(ShapedWay {
            row: WayRow {
                id: way.meta.id.clone(),
                user: way.meta.user.clone(),
                uid: way.meta.uid.clone(),
                version: way.meta.version.clone(),
                changeset: way.meta.changeset.clone(),
                timestamp: way.meta.timestamp.clone(),
            },
            nodes: way
                .node_refs
                .iter()
                .enumerate()
                .map(|(position, node_id)| WayNodeRow {
                    id: way.meta.id.clone(),
                    node_id: node_id.clone(),
                    position,
                })
                .collect(),
            tags: shape_tags(&way.tags, &way.meta.id),
        }),
    }
}

fn shape_tags(tags: &[RawTag], element_id: &str) -> Vec<TagRow> {
    tags.iter()
        .filter_map(|tag| shape_tag(tag, element_id))
        .collect()
}

/// Normalize one raw tag, or `None` if its key is problematic.
fn shape_tag(tag: &RawTag, element_id: &str) -> Option<TagRow> {
    if !is_unproblematic(&tag.key) {
        return None;
    }
    let (namespace, local) = split_namespace(&tag.key);
    let value = if is_city_key(&tag.key) {
        normalize_city(&tag.value)
    } else if is_street_key(&tag.key) {
        normalize_street(&tag.value)
    } else {
        tag.value.clone()
    };
    Some(TagRow {
        id: element_id.to_string(),
        key: local.to_string(),
        value,
        tag_type: namespace.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::element::{ElementMeta, Point, Way};

    fn meta(id: &str) -> ElementMeta {
        ElementMeta {
            id: id.to_string(),
            user: "mapper".to_string(),
            uid: "42".to_string(),
            version: "2".to_string(),
            changeset: "7".to_string(),
            timestamp: "2020-04-16T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn point_keeps_all_columns_even_when_empty() {
        let point = Point {
            meta: ElementMeta {
                id: "1".to_string(),
                ..ElementMeta::default()
            },
            lat: "54.4".to_string(),
            lon: "13.4".to_string(),
            tags: vec![],
        };
        let shaped = shape_element(&GeoElement::Point(point));
        let ShapedElement::Node(node) = shaped else {
            panic!("expected node");
        };
        assert_eq!(node.row.id, "1");
        assert_eq!(node.row.user, "");
        assert_eq!(node.row.timestamp, "");
    }

    #[test]
    fn city_and_street_tags_are_normalized() {
        let point = Point {
            meta: meta("5"),
            lat: "54.4".to_string(),
            lon: "13.4".to_string(),
            tags: vec![
                RawTag::new("addr:city", "Ostseebad Binz/Prora"),
                RawTag::new("addr:street", "Bahnhofstr. 5"),
                RawTag::new("building", "yes"),
            ],
        };
        let ShapedElement::Node(node) = shape_element(&GeoElement::Point(point)) else {
            panic!("expected node");
        };
        assert_eq!(node.tags.len(), 3);
        assert_eq!(node.tags[0].key, "city");
        assert_eq!(node.tags[0].tag_type, "addr");
        assert_eq!(node.tags[0].value, "Binz");
        assert_eq!(node.tags[1].value, "Bahnhofstraße");
        assert_eq!(node.tags[2].key, "building");
        assert_eq!(node.tags[2].tag_type, "regular");
        assert_eq!(node.tags[2].value, "yes");
    }

    #[test]
    fn problematic_keys_are_dropped() {
        let point = Point {
            meta: meta("6"),
            lat: "54.0".to_string(),
            lon: "13.0".to_string(),
            tags: vec![
                RawTag::new("note,old", "gone"),
                RawTag::new("name", "kept"),
            ],
        };
        let ShapedElement::Node(node) = shape_element(&GeoElement::Point(point)) else {
            panic!("expected node");
        };
        assert_eq!(node.tags.len(), 1);
        assert_eq!(node.tags[0].key, "name");
    }

    #[test]
    fn namespaced_key_splits_on_first_colon_only() {
        let point = Point {
            meta: meta("7"),
            lat: String::new(),
            lon: String::new(),
            tags: vec![RawTag::new("seamark:light:orientation", "45")],
        };
        let ShapedElement::Node(node) = shape_element(&GeoElement::Point(point)) else {
            panic!("expected node");
        };
        assert_eq!(node.tags[0].tag_type, "seamark");
        assert_eq!(node.tags[0].key, "light:orientation");
    }

    #[test]
    fn way_node_positions_are_contiguous_in_source_order() {
        let way = Way {
            meta: meta("10"),
            node_refs: vec!["3".into(), "1".into(), "8".into()],
            tags: vec![RawTag::new("highway", "residential")],
        };
        let ShapedElement::Way(way) = shape_element(&GeoElement::Way(way)) else {
            panic!("expected way");
        };
        assert_eq!(way.row.id, "10");
        let got: Vec<(usize, &str)> = way
            .nodes
            .iter()
            .map(|n| (n.position, n.node_id.as_str()))
            .collect();
        assert_eq!(got, vec![(0, "3"), (1, "1"), (2, "8")]);
    }
}
