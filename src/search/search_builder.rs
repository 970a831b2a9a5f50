// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Caller-facing search form
//!
//! [`SearchBuilder`] carries what an application collects from a search box
//! (free text, category and tag selections, sort choice) plus an
//! attribute/value list that travels as a compact `@attr:value` string.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `@key:value` pairs; the value runs up to the next `@`.
static PAIR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^@:]+):([^@]+)?").unwrap());

/// Search form state, JSON-serializable for caching between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBuilder {
    pub raw: String,
    pub query: String,
    pub cats: String,
    pub tags: String,
    /// `all` or `latest` (sort on `updated`)
    pub sort_by: String,
    /// Flattened attribute/value pairs
    pub attr: Vec<String>,
}

impl SearchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }

    /// Render the builder's own attribute list.
    pub fn encode_attr(&self) -> String {
        Self::encode(&self.attr)
    }

    /// Render flattened pairs as `@k1:v1 @k2:v2`.
    ///
    /// A trailing key without a value is rendered as `@k:`.
    pub fn encode<S: AsRef<str>>(attr: &[S]) -> String {
        attr.chunks(2)
            .map(|pair| {
                let key = pair[0].as_ref();
                let value = pair.get(1).map_or("", |v| v.as_ref());
                format!("@{}:{}", key, value)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse `@k:v` pairs back into a flattened list. Values are trimmed.
    ///
    /// Returns `None` when the input holds no pair at all.
    pub fn decode(query: &str) -> Option<Vec<String>> {
        let pairs = Self::pairs(query)?;
        Some(pairs.into_iter().flat_map(|(k, v)| [k, v]).collect())
    }

    /// Like [`SearchBuilder::decode`], keyed by attribute. Later duplicates win.
    pub fn decode_to_map(query: &str) -> Option<HashMap<String, String>> {
        let pairs = Self::pairs(query)?;
        Some(pairs.into_iter().collect())
    }

    fn pairs(query: &str) -> Option<Vec<(String, String)>> {
        let pairs: Vec<(String, String)> = PAIR_RE
            .captures_iter(query)
            .map(|caps| {
                let key = caps.get(1).map_or("", |m| m.as_str());
                let value = caps.get(2).map_or("", |m| m.as_str()).trim();
                (key.to_string(), value.to_string())
            })
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODED: &str = "@dene:obaraks @query:ne dedin sen @type:12";

    fn flat() -> Vec<String> {
        ["dene", "obaraks", "query", "ne dedin sen", "type", "12"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_encode() {
        assert_eq!(SearchBuilder::encode(&flat()), ENCODED);
    }

    #[test]
    fn test_encode_attr_uses_own_list() {
        let sb = SearchBuilder {
            attr: flat(),
            ..Default::default()
        };
        assert_eq!(sb.encode_attr(), ENCODED);
    }

    #[test]
    fn test_encode_odd_length() {
        assert_eq!(SearchBuilder::encode(&["a", "1", "b"]), "@a:1 @b:");
        assert_eq!(SearchBuilder::encode::<&str>(&[]), "");
    }

    #[test]
    fn test_decode() {
        assert_eq!(SearchBuilder::decode(ENCODED), Some(flat()));
    }

    #[test]
    fn test_decode_to_map() {
        let map = SearchBuilder::decode_to_map(ENCODED).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["dene"], "obaraks");
        assert_eq!(map["query"], "ne dedin sen");
        assert_eq!(map["type"], "12");
    }

    #[test]
    fn test_pair_pattern_compiles() {
        assert_eq!(PAIR_RE.captures_len(), 3);
    }

    #[test]
    fn test_decode_no_match() {
        assert_eq!(SearchBuilder::decode("no pairs here"), None);
        assert_eq!(SearchBuilder::decode(""), None);
        assert!(SearchBuilder::decode_to_map("@@@").is_none());
    }

    #[test]
    fn test_decode_missing_value() {
        assert_eq!(
            SearchBuilder::decode("@a:"),
            Some(vec!["a".to_string(), String::new()])
        );
    }

    #[test]
    fn test_json_round_trip() {
        let sb = SearchBuilder {
            raw: "@name:dream".to_string(),
            query: "dream".to_string(),
            cats: "night".to_string(),
            tags: "lucid,flying".to_string(),
            sort_by: "latest".to_string(),
            attr: flat(),
        };
        let json = sb.to_json().unwrap();
        assert!(json.contains("\"sort_by\":\"latest\""));
        assert_eq!(SearchBuilder::from_json(&json).unwrap(), sb);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SearchBuilder::from_json("{not json").is_err());
    }
}
