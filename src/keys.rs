//! Tag key classification and namespace splitting.
//!
//! OSM tag keys are free-form. Before emission each key is classified into
//! one of four categories (only problematic keys are dropped) and split into
//! a namespace and a local part on its first colon.

use once_cell::sync::Lazy;
use regex::Regex;

/// Namespace assigned to keys without a colon.
pub const DEFAULT_NAMESPACE: &str = "regular";

// Simple keys like "building", all lowercase.
static RE_PLAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z_]+$").unwrap());

// Colon-structured keys like "seamark:light:orientation".
static RE_NAMESPACED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(([a-z_]+):)+([a-z_]+)$").unwrap());

// Characters that would break downstream consumers of the key column.
static RE_PROBLEM_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[=\+/&<>;'"\?%#$@,\. \t\r\n]"#).unwrap());

/// Category of a raw tag key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCategory {
    /// Lowercase letters and underscores only.
    Plain,
    /// Lowercase/underscore segments joined by colons.
    Namespaced,
    /// Contains at least one problem character.
    Problematic,
    /// Anything else (uppercase letters, digits, ...).
    Other,
}

impl KeyCategory {
    /// All categories, in reporting order.
    pub const ALL: [KeyCategory; 4] = [
        KeyCategory::Plain,
        KeyCategory::Namespaced,
        KeyCategory::Problematic,
        KeyCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            KeyCategory::Plain => "plain",
            KeyCategory::Namespaced => "namespaced",
            KeyCategory::Problematic => "problematic",
            KeyCategory::Other => "other",
        }
    }
}

/// Classify a raw key. Case-sensitive: an uppercase letter routes a key to
/// [`KeyCategory::Other`] unless a problem character also appears.
pub fn classify(key: &str) -> KeyCategory {
    if RE_PLAIN.is_match(key) {
        KeyCategory::Plain
    } else if RE_NAMESPACED.is_match(key) {
        KeyCategory::Namespaced
    } else if RE_PROBLEM_CHARS.is_match(key) {
        KeyCategory::Problematic
    } else {
        KeyCategory::Other
    }
}

/// Emission gate: a key is acceptable as long as it carries no problem
/// character. Deliberately looser than [`classify`]: mixed-case keys like
/// `openGeoDB:postal_codes` classify as Other but are still emitted.
pub fn is_unproblematic(key: &str) -> bool {
    !RE_PROBLEM_CHARS.is_match(key)
}

/// Split a key into `(namespace, local)` on its first colon.
///
/// Only the first colon separates; any further colons stay inside the local
/// part verbatim, so `seamark:light:orientation` splits into `seamark` and
/// `light:orientation`. Keys without a colon get [`DEFAULT_NAMESPACE`].
pub fn split_namespace(key: &str) -> (&str, &str) {
    match key.split_once(':') {
        Some((namespace, local)) => (namespace, local),
        None => (DEFAULT_NAMESPACE, key),
    }
}
