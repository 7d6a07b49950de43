//! Streaming traversal of the source extract.
//!
//! [`ElementReader`] walks the XML event stream and yields one owned
//! [`GeoElement`] per `node`/`way` element. Nothing is retained between
//! yields, so peak memory stays bounded by the largest single element no
//! matter how big the extract is. The sequence is lazy, finite and cannot
//! be restarted; malformed markup ends it with an error.

use crate::error::Error;
use crate::shape::element::{ElementMeta, GeoElement, Point, RawTag, Way};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Pull-based iterator over the point and way elements of an extract.
pub struct ElementReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    done: bool,
}

impl ElementReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, Error> {
        Ok(Self::from_reader(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> ElementReader<R> {
    pub fn from_reader(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(true);
        ElementReader {
            reader,
            buf: Vec::new(),
            done: false,
        }
    }

    /// Consume child events of a `node` or `way` until its end tag,
    /// collecting `tag` children (and `nd` children when `node_refs` is
    /// given). Unknown nested elements are traversed and dropped.
    fn read_children(
        &mut self,
        container: &'static str,
        tags: &mut Vec<RawTag>,
        mut node_refs: Option<&mut Vec<String>>,
    ) -> Result<(), Error> {
        let mut depth = 0usize;
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(start) => {
                    if depth == 0 {
                        collect_child(&start, tags, &mut node_refs)?;
                    }
                    depth += 1;
                }
                Event::Empty(start) => {
                    if depth == 0 {
                        collect_child(&start, tags, &mut node_refs)?;
                    }
                }
                Event::End(_) => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                Event::Eof => return Err(Error::UnclosedElement(container)),
                _ => {}
            }
        }
    }
}

fn collect_child(
    start: &BytesStart<'_>,
    tags: &mut Vec<RawTag>,
    node_refs: &mut Option<&mut Vec<String>>,
) -> Result<(), Error> {
    match start.name().as_ref() {
        b"tag" => {
            tags.push(RawTag {
                key: attr_value(start, b"k")?,
                value: attr_value(start, b"v")?,
            });
        }
        b"nd" => {
            if let Some(refs) = node_refs {
                refs.push(attr_value(start, b"ref")?);
            }
        }
        _ => {}
    }
    Ok(())
}

// What the current event asks of the iterator, computed while the event
// still borrows the read buffer.
enum Step {
    Yield(GeoElement),
    FillPoint(Point),
    FillWay(Way),
    Skip,
    Done,
}

impl<R: BufRead> Iterator for ElementReader<R> {
    type Item = Result<GeoElement, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            let step = match self.reader.read_event_into(&mut self.buf) {
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
                Ok(Event::Eof) => Step::Done,
                Ok(Event::Start(start)) => match start.name().as_ref() {
                    b"node" => match point_from(&start) {
                        Ok(point) => Step::FillPoint(point),
                        Err(err) => {
                            self.done = true;
                            return Some(Err(err));
                        }
                    },
                    b"way" => match way_from(&start) {
                        Ok(way) => Step::FillWay(way),
                        Err(err) => {
                            self.done = true;
                            return Some(Err(err));
                        }
                    },
                    // Traverse through relations, bounds, ... without
                    // yielding; their children are skipped by name.
                    _ => Step::Skip,
                },
                Ok(Event::Empty(start)) => match start.name().as_ref() {
                    b"node" => match point_from(&start) {
                        Ok(point) => Step::Yield(GeoElement::Point(point)),
                        Err(err) => {
                            self.done = true;
                            return Some(Err(err));
                        }
                    },
                    b"way" => match way_from(&start) {
                        Ok(way) => Step::Yield(GeoElement::Way(way)),
                        Err(err) => {
                            self.done = true;
                            return Some(Err(err));
                        }
                    },
                    _ => Step::Skip,
                },
                Ok(_) => Step::Skip,
            };

            match step {
                Step::Done => {
                    self.done = true;
                    return None;
                }
                Step::Skip => continue,
                Step::Yield(element) => return Some(Ok(element)),
                Step::FillPoint(mut point) => {
                    if let Err(err) = self.read_children("node", &mut point.tags, None) {
                        self.done = true;
                        return Some(Err(err));
                    }
                    return Some(Ok(GeoElement::Point(point)));
                }
                Step::FillWay(mut way) => {
                    if let Err(err) =
                        self.read_children("way", &mut way.tags, Some(&mut way.node_refs))
                    {
                        self.done = true;
                        return Some(Err(err));
                    }
                    return Some(Ok(GeoElement::Way(way)));
                }
            }
        }
    }
}

/// Look up one attribute on an element, unescaped. Absent attributes come
/// back as the empty string so output columns never go missing.
fn attr_value(start: &BytesStart<'_>, name: &[u8]) -> Result<String, Error> {
    for attr in start.attributes().with_checks(false) {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == name {
            return Ok(attr.unescape_value().map_err(quick_xml::Error::from)?.into_owned());
        }
    }
    Ok(String::new())
}

fn meta_from(start: &BytesStart<'_>) -> Result<ElementMeta, Error> {
    Ok(ElementMeta {
        id: attr_value(start, b"id")?,
        user: attr_value(start, b"user")?,
        uid: attr_value(start, b"uid")?,
        version: attr_value(start, b"version")?,
        changeset: attr_value(start, b"changeset")?,
        timestamp: attr_value(start, b"timestamp")?,
    })
}

fn point_from(start: &BytesStart<'_>) -> Result<Point, Error> {
    Ok(Point {
        meta: meta_from(start)?,
        lat: attr_value(start, b"lat")?,
        lon: attr_value(start, b"lon")?,
        tags: Vec::new(),
    })
}

fn way_from(start: &BytesStart<'_>) -> Result<Way, Error> {
    Ok(Way {
        meta: meta_from(start)?,
        node_refs: Vec::new(),
        tags: Vec::new(),
    })
}
