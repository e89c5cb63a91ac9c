#![warn(missing_docs)]
//! # akamai-risk-core
//!
//! ## Purpose
//! Decodes the `Akamai-User-Risk` request header into an ordered set of risk
//! signals.
//!
//! ## Responsibilities
//! - Split the raw header into `;`-delimited fragments.
//! - Split each fragment on its first `=` into a signal name and value.
//! - Keep signals in first-seen order with last-write-wins values.
//! - Project decoded signals into JSON for host-side storage.
//!
//! ## Data flow
//! Raw header text -> [`decode`] -> [`SignalMap`] consumed by the classifier
//! and handed back to the host for transient/shared storage.
//!
//! ## Ownership and lifetimes
//! [`SignalMap`] owns its keys and values, so the caller can keep it after the
//! request buffer that carried the header is gone.
//!
//! ## Error model
//! Decoding is total: fragments without a usable `name=value` split are
//! discarded and never reported. Only JSON projection can fail, with
//! [`SignalError`].
//!
//! ## Security and privacy notes
//! Header authenticity is not checked here. The caller supplies the raw text
//! and is trusted to have sourced it from the edge.
//!
//! ## Example
//! ```rust
//! use akamai_risk_core::decode;
//!
//! let signals = decode("uuid=abc;score=42;action=monitor");
//! assert_eq!(signals.get("score"), Some("42"));
//! assert_eq!(signals.len(), 3);
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Request header carrying risk signals from the edge.
pub const AKAMAI_USER_RISK_HEADER: &str = "Akamai-User-Risk";

/// Signal name holding the overall numeric risk score.
pub const SCORE_SIGNAL: &str = "score";

/// Separator between signal fragments.
pub const FRAGMENT_DELIMITER: char = ';';

/// Separator between a signal name and its value.
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Ordered mapping from signal name to signal value.
///
/// Names are unique. Re-inserting a name replaces its value in place, so the
/// iteration order reflects where each name first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalMap {
    entries: Vec<(String, String)>,
}

impl SignalMap {
    /// Creates an empty signal map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one signal, replacing any existing value for `name`.
    ///
    /// # Returns
    /// - `true` when the signal was stored.
    /// - `false` when `name` or `value` is empty; nothing is stored.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        let value = value.into();
        if name.is_empty() || value.is_empty() {
            return false;
        }

        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        true
    }

    /// Returns the value stored for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the raw `score` signal, if present.
    pub fn score(&self) -> Option<&str> {
        self.get(SCORE_SIGNAL)
    }

    /// Returns `true` when a signal named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns number of stored signals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no signals are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates signals in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Iterates signal names in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Re-encodes signals in header wire form (`name=value;name=value`).
    pub fn to_header_value(&self) -> String {
        let mut encoded = String::new();
        for (index, (name, value)) in self.iter().enumerate() {
            if index > 0 {
                encoded.push(FRAGMENT_DELIMITER);
            }
            encoded.push_str(name);
            encoded.push(KEY_VALUE_SEPARATOR);
            encoded.push_str(value);
        }
        encoded
    }

    /// Projects signals into a JSON object of string values, preserving
    /// signal order.
    pub fn to_json_value(&self) -> serde_json::Value {
        let object = self
            .iter()
            .map(|(name, value)| (name.to_string(), serde_json::Value::from(value)))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(object)
    }

    /// Serializes signals to a compact JSON object, preserving signal order.
    ///
    /// # Errors
    /// Returns [`SignalError::Codec`] when JSON serialization fails.
    pub fn to_json_string(&self) -> Result<String, SignalError> {
        serde_json::to_string(self).map_err(SignalError::Codec)
    }
}

impl Serialize for SignalMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for SignalMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut signals = Self::new();
        for (name, value) in iter {
            signals.insert(name, value);
        }
        signals
    }
}

impl IntoIterator for SignalMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Decodes a raw risk header into its signals.
///
/// # Semantics
/// - Fragments are separated by `;` and split on their first `=` only, so a
///   value may itself contain `=`.
/// - Names are kept verbatim (no trimming, no case folding).
/// - Fragments without `=`, with an empty name, or with an empty value are
///   dropped. Empty fragments from leading/trailing `;` are dropped too.
/// - A repeated name keeps its first position and takes the later value.
pub fn decode(raw: &str) -> SignalMap {
    raw.split(FRAGMENT_DELIMITER)
        .filter_map(|fragment| fragment.split_once(KEY_VALUE_SEPARATOR))
        .collect()
}

/// Error type for signal projection failures.
#[derive(Debug, Error)]
pub enum SignalError {
    /// JSON encoding failure.
    #[error("signal codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    //! Unit tests for fragment splitting rules.

    use super::*;

    #[test]
    fn splits_on_first_separator_only() {
        let signals = decode("token=a=b==");
        assert_eq!(signals.get("token"), Some("a=b=="));
    }

    #[test]
    fn drops_fragments_without_name_or_value() {
        let signals = decode("=x;score=10;empty=;bare;;");
        assert_eq!(signals.keys().collect::<Vec<_>>(), vec!["score"]);
        assert!(!signals.contains(""));
    }

    #[test]
    fn keeps_names_verbatim() {
        let signals = decode(" Score =7");
        assert_eq!(signals.get(" Score "), Some("7"));
        assert_eq!(signals.score(), None);
    }

    #[test]
    fn repeated_name_keeps_first_position() {
        let signals = decode("score=1;uuid=u;score=2");
        assert_eq!(
            signals.iter().collect::<Vec<_>>(),
            vec![("score", "2"), ("uuid", "u")]
        );
    }
}
