//! Value normalizers for address tags.
//!
//! Each normalizer is a pure function paired with a key predicate. The
//! rewriting ones (city, street) run during shaping; the rest only support
//! the audit tools and never change data.
//!
//! The rules are tuned for the Rügen region of Mecklenburg-Vorpommern:
//! resort prefixes like "Ostseebad", German street suffixes, and the 184xx
//! to 186xx postal code range.

use once_cell::sync::Lazy;
use regex::Regex;

/// Keys whose values are postal codes, in any of the tagging conventions
/// found in the wild.
pub const POSTCODE_KEYS: [&str; 5] = [
    "addr:postcode",
    "postal_code",
    "openGeoDB:postal_codes",
    "object:postcode",
    "boundary:postal_code",
];

// Leading resort/island prefix, or a slash (plus any space before it) and
// everything after.
static RE_CITY_CLEANUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Ostseebad *|^Insel *| */.*$").unwrap());

// City names needing review: resort prefixes or characters outside German
// letters, hyphen and space.
static RE_CITY_WITH_ADDON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Ostseebad|^Insel|[^ a-zäöüßA-ZÄÖÜ-]").unwrap());

// Abbreviation fixes, applied in declaration order; later rules see the
// output of earlier ones. The abbreviated forms only count at the end of
// the name proper, i.e. at end of string or before a space (a trailing
// house number may still follow).
static ABBREV_RULES: Lazy<[(Regex, &'static str); 4]> = Lazy::new(|| {
    [
        (Regex::new(r"Str\.(\s|$)").unwrap(), "Straße${1}"),
        (Regex::new(r"str\.(\s|$)").unwrap(), "straße${1}"),
        (Regex::new(r"Strasse").unwrap(), "Straße"),
        (Regex::new(r"strasse").unwrap(), "straße"),
    ]
});

static RE_ABBREV: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Str\.$|str\.$|Strasse|strasse").unwrap());

// Trailing house numbers: latin digits or roman numerals using I, V and X.
static RE_HOUSENUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+(\d+|[IVX]+)\s*$").unwrap());

// Postal codes of the region (zone 18, districts 4-6).
static RE_POSTCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^18[456]\d{2}$").unwrap());

// Typical street types of the region, most specific first.
static RE_STREET_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(Am|An) |^(Zum|Zur|Zu) |Straße|Weg$|Ring$|Chaussee$|Allee$|Platz|hof$|berg$",
    )
    .unwrap()
});

pub fn is_city_key(key: &str) -> bool {
    key == "addr:city"
}

pub fn is_street_key(key: &str) -> bool {
    key == "addr:street"
}

pub fn is_postcode_key(key: &str) -> bool {
    POSTCODE_KEYS.contains(&key)
}

/// Clean a city name: drop a leading `Ostseebad ` or `Insel ` prefix and
/// truncate at the first slash (removing any space right before it).
pub fn normalize_city(value: &str) -> String {
    RE_CITY_CLEANUP.replace_all(value, "").into_owned()
}

/// Audit predicate: does this city name carry extra describing words or
/// unexpected characters?
pub fn city_has_addon(value: &str) -> bool {
    RE_CITY_WITH_ADDON.is_match(value)
}

/// Expand common street-name abbreviations (`Str.` → `Straße` and friends).
pub fn expand_street_abbreviations(value: &str) -> String {
    let mut out = value.to_string();
    for (pattern, replacement) in ABBREV_RULES.iter() {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    out
}

/// Audit helper: the abbreviation a street name matches, if any.
pub fn matched_abbreviation(value: &str) -> Option<&str> {
    RE_ABBREV.find(value).map(|m| m.as_str())
}

/// Strip a trailing house number (digits or roman numerals) from a street
/// name. Not idempotent for values with several trailing number groups:
/// "Weg 3 4" strips to "Weg 3", and a second pass would strip again.
pub fn strip_house_number(value: &str) -> String {
    RE_HOUSENUM.replace(value, "").into_owned()
}

/// Audit predicate: does this street name end in a house number?
pub fn has_trailing_house_number(value: &str) -> bool {
    RE_HOUSENUM.is_match(value)
}

/// Full street cleanup as applied during shaping: abbreviation expansion
/// first, then house-number stripping on the result.
pub fn normalize_street(value: &str) -> String {
    strip_house_number(&expand_street_abbreviations(value))
}

/// Audit-only check: is this a plausible postal code for the region?
pub fn is_valid_postcode(value: &str) -> bool {
    RE_POSTCODE.is_match(value)
}

/// Bucket a street name by its street type, or `__other__` if none of the
/// regional patterns match.
pub fn street_type_bucket(value: &str) -> String {
    match RE_STREET_TYPE.find(value) {
        Some(m) => m.as_str().to_lowercase(),
        None => "__other__".to_string(),
    }
}
