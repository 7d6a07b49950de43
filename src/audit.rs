//! Audit accumulators for the reporting tools.
//!
//! Audits characterize the raw data instead of failing on it: each one is
//! an append-only tally fed one tag at a time while streaming the extract.
//! They never rewrite anything and are independent of the shaping pipeline.

use crate::keys::{classify, KeyCategory};
use crate::normalize::{
    city_has_addon, has_trailing_house_number, is_city_key, is_postcode_key, is_street_key,
    is_valid_postcode, matched_abbreviation, street_type_bucket,
};
use crate::shape::element::{GeoElement, RawTag};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Per-category census of tag keys.
#[derive(Debug, Default)]
pub struct KeyCensus {
    counts: BTreeMap<&'static str, BTreeMap<String, u64>>,
}

impl KeyCensus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, tag: &RawTag) {
        let category = classify(&tag.key).label();
        *self
            .counts
            .entry(category)
            .or_default()
            .entry(tag.key.clone())
            .or_insert(0) += 1;
    }

    pub fn category(&self, category: KeyCategory) -> Option<&BTreeMap<String, u64>> {
        self.counts.get(category.label())
    }
}

impl fmt::Display for KeyCensus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in KeyCategory::ALL {
            writeln!(f, "\n*** {} ***\n", category.label())?;
            if let Some(keys) = self.counts.get(category.label()) {
                // Most frequent first, key name breaking ties.
                let mut entries: Vec<(&String, &u64)> = keys.iter().collect();
                entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
                for (key, count) in entries {
                    writeln!(f, "{key} {count}")?;
                }
            }
        }
        Ok(())
    }
}

/// Street-name audits: abbreviations, trailing house numbers and street
/// types, collected together since they all watch `addr:street`.
#[derive(Debug, Default)]
pub struct StreetAudit {
    pub abbreviations: BTreeMap<String, BTreeSet<String>>,
    pub trailing_numbers: BTreeSet<String>,
    pub types: BTreeMap<String, BTreeSet<String>>,
}

impl StreetAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, tag: &RawTag) {
        if !is_street_key(&tag.key) {
            return;
        }
        let name = tag.value.as_str();
        if let Some(abbrev) = matched_abbreviation(name) {
            self.abbreviations
                .entry(abbrev.to_string())
                .or_default()
                .insert(name.to_string());
        }
        if has_trailing_house_number(name) {
            self.trailing_numbers.insert(name.to_string());
        }
        self.types
            .entry(street_type_bucket(name))
            .or_default()
            .insert(name.to_string());
    }
}

impl fmt::Display for StreetAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== abbreviations ===")?;
        for (abbrev, names) in &self.abbreviations {
            writeln!(f, "\n{abbrev}:")?;
            for name in names {
                writeln!(f, "    {name}")?;
            }
        }
        writeln!(f, "\n=== trailing house numbers ===\n")?;
        for name in &self.trailing_numbers {
            writeln!(f, "{name}")?;
        }
        writeln!(f, "\n=== street types ===")?;
        for (bucket, names) in &self.types {
            writeln!(f, "\n{bucket}:")?;
            for name in names {
                writeln!(f, "    {name}")?;
            }
        }
        Ok(())
    }
}

/// City names carrying extra describing words or odd characters.
#[derive(Debug, Default)]
pub struct CityAudit {
    pub flagged: BTreeMap<String, u64>,
}

impl CityAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, tag: &RawTag) {
        if is_city_key(&tag.key) && city_has_addon(&tag.value) {
            *self.flagged.entry(tag.value.clone()).or_insert(0) += 1;
        }
    }
}

impl fmt::Display for CityAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, count) in &self.flagged {
            writeln!(f, "{name} {count}")?;
        }
        Ok(())
    }
}

/// Postal codes outside the regional range, grouped by the key they were
/// tagged under.
#[derive(Debug, Default)]
pub struct PostcodeAudit {
    pub invalid: BTreeMap<String, BTreeSet<String>>,
}

impl PostcodeAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, tag: &RawTag) {
        if is_postcode_key(&tag.key) && !is_valid_postcode(&tag.value) {
            self.invalid
                .entry(tag.key.clone())
                .or_default()
                .insert(tag.value.clone());
        }
    }
}

impl fmt::Display for PostcodeAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, values) in &self.invalid {
            writeln!(f, "\n{}: {} not ok", key, values.len())?;
            for value in values {
                writeln!(f, "    {value}")?;
            }
        }
        Ok(())
    }
}

/// Run all tag audits over a stream of elements.
#[derive(Debug, Default)]
pub struct TagAudits {
    pub keys: KeyCensus,
    pub streets: StreetAudit,
    pub cities: CityAudit,
    pub postcodes: PostcodeAudit,
}

impl TagAudits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_element(&mut self, element: &GeoElement) {
        for tag in element.tags() {
            self.keys.observe(tag);
            self.streets.observe(tag);
            self.cities.observe(tag);
            self.postcodes.observe(tag);
        }
    }
}

/// Census of raw XML element names across the whole document, counted at
/// end/empty events. Unlike the tag audits this looks below the node/way
/// level, so it reads the event stream directly.
pub fn count_element_names<R: std::io::BufRead>(
    source: R,
) -> Result<BTreeMap<String, u64>, crate::error::Error> {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_reader(source);
    reader.trim_text(true);
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                *counts.entry(name).or_insert(0) += 1;
            }
            Event::Empty(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                *counts.entry(name).or_insert(0) += 1;
            }
            _ => {}
        }
    }
    Ok(counts)
}
