// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Builder - composes RediSearch query expressions
//!
//! Word-level generators shape individual terms; clause accumulators append
//! fully formatted fragments that are space-joined on [`FtQuery::serialize`].
//!
//! # Example
//!
//! ```rust
//! use redisearch_query::search::{FtQuery, JoinMode, WordMode};
//!
//! let mut query = FtQuery::new("");
//! let words = ["hello".to_string(), "help".to_string()];
//! let union = FtQuery::multi_word(JoinMode::Union, &words);
//! let grouped = FtQuery::single_word(WordMode::Group, &union);
//!
//! query = query
//!     .multi_field_prefix_match(false, &["name", "slug"], &grouped)
//!     .tag_filter(false, "cats", &["dream"]);
//!
//! assert_eq!(query.serialize(), "@name|slug:(hello|help) @cats:{dream}");
//! ```

use serde::{Deserialize, Serialize};

use super::clause::{self, GeoUnit};

/// Single-word transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordMode {
    /// Exact phrase: `hello world`
    Exact,
    /// Exclusion: `-world`
    Negate,
    /// Grouping, used for intersections of unions: `(hello|halo)`
    Group,
    /// Negated group: `-(world|werld)`
    NegateGroup,
    /// Drop the last character and match as prefix: `hello` → `hell*`
    PrefixTrimOne,
    /// Drop the last two characters and match as prefix: `hello` → `hel*`
    PrefixTrimTwo,
}

/// Multi-word join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinMode {
    /// Implicit AND: `hello world`
    #[default]
    Intersect,
    /// OR: `hello|world`
    Union,
    /// Optional terms, ranked higher when present: `obama~barack~michelle`
    Optional,
}

impl JoinMode {
    const fn separator(self) -> &'static str {
        match self {
            JoinMode::Intersect => " ",
            JoinMode::Union => "|",
            JoinMode::Optional => "~",
        }
    }
}

/// Query expression builder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FtQuery {
    raw: String,
    clauses: Vec<String>,
}

impl FtQuery {
    /// Create a builder seeded with a raw expression.
    ///
    /// The seed is only reported by [`FtQuery::raw`] until the first
    /// [`FtQuery::serialize`] overwrites it.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            clauses: Vec::new(),
        }
    }

    /// Transform one word.
    pub fn single_word(mode: WordMode, word: &str) -> String {
        match mode {
            WordMode::Exact => word.to_string(),
            WordMode::Negate => format!("-{}", word),
            WordMode::Group => format!("({})", word),
            WordMode::NegateGroup => format!("-({})", word),
            WordMode::PrefixTrimOne => format!("{}*", trim_end_chars(word, 1)),
            WordMode::PrefixTrimTwo => format!("{}*", trim_end_chars(word, 2)),
        }
    }

    /// Join several words.
    pub fn multi_word<S: AsRef<str>>(mode: JoinMode, words: &[S]) -> String {
        words
            .iter()
            .map(|w| w.as_ref())
            .collect::<Vec<_>>()
            .join(mode.separator())
    }

    /// Levenshtein fuzzy match: each word wrapped in `distance` percent signs.
    pub fn fuzzy<S: AsRef<str>>(distance: usize, words: &[S]) -> String {
        let pad = "%".repeat(distance);
        words
            .iter()
            .map(|w| format!("{}{}{}", pad, w.as_ref(), pad))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `@field:query`
    pub fn field_scope(field: &str, query: &str) -> String {
        clause::field_scope(field, query)
    }

    /// `@f1|f2:query`
    pub fn multi_field_scope<S: AsRef<str>>(fields: &[S], query: &str) -> String {
        clause::multi_field_scope(fields, query)
    }

    /// Match every document. Expensive on large indexes.
    pub fn wildcard(mut self) -> Self {
        self.clauses.push("*".to_string());
        self
    }

    /// Exclude documents matching `query`: `-query`
    pub fn pure_negative(mut self, query: &str) -> Self {
        self.clauses.push(format!("-{}", query));
        self
    }

    /// Append a numeric range clause, see [`clause::numeric_range`].
    #[allow(clippy::too_many_arguments)]
    pub fn numeric_filter(
        mut self,
        negate: bool,
        field: &str,
        min: i64,
        max: i64,
        exclude_min: bool,
        exclude_max: bool,
        inf_min: bool,
        inf_max: bool,
    ) -> Self {
        self.clauses.push(clause::numeric_range(
            negate,
            field,
            min,
            max,
            exclude_min,
            exclude_max,
            inf_min,
            inf_max,
        ));
        self
    }

    /// Append a tag clause: `@field:{a|b}`
    pub fn tag_filter<S: AsRef<str>>(mut self, negate: bool, field: &str, tags: &[S]) -> Self {
        self.clauses.push(clause::tag_filter(negate, field, tags));
        self
    }

    /// Append a geo radius clause: `@field:[lon lat radius unit]`
    pub fn geo_filter(
        mut self,
        negate: bool,
        field: &str,
        lon: f64,
        lat: f64,
        radius: f64,
        unit: GeoUnit,
    ) -> Self {
        self.clauses
            .push(clause::geo_filter(negate, field, lon, lat, radius, unit));
        self
    }

    /// Append a match scoped to one field; an empty field name leaves it unscoped.
    pub fn prefix_match(mut self, negate: bool, field: &str, query: &str) -> Self {
        let clause = if field.is_empty() {
            clause::field_match::<&str>(negate, &[], query)
        } else {
            clause::field_match(negate, &[field], query)
        };
        self.clauses.push(clause);
        self
    }

    /// Append a match scoped to several fields: `@f1|f2:query`
    pub fn multi_field_prefix_match<S: AsRef<str>>(
        mut self,
        negate: bool,
        fields: &[S],
        query: &str,
    ) -> Self {
        self.clauses.push(clause::field_match(negate, fields, query));
        self
    }

    /// Accumulated clauses in insertion order.
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Last serialized (or seeded) expression.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Space-join the clauses, cache the result as `raw` and return it.
    ///
    /// An empty builder yields `""`, which is not a valid query on its own.
    pub fn serialize(&mut self) -> String {
        self.raw = self.clauses.join(" ");
        self.raw.clone()
    }
}

fn trim_end_chars(word: &str, count: usize) -> &str {
    if count == 0 {
        return word;
    }
    match word.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &word[..idx],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::{trim_end_chars, FtQuery, GeoUnit, JoinMode, WordMode};

    #[test]
    fn test_single_word_modes() {
        assert_eq!(FtQuery::single_word(WordMode::Exact, "hello world"), "hello world");
        assert_eq!(FtQuery::single_word(WordMode::Negate, "world"), "-world");
        assert_eq!(FtQuery::single_word(WordMode::Group, "hello|halo"), "(hello|halo)");
        assert_eq!(FtQuery::single_word(WordMode::NegateGroup, "world|werld"), "-(world|werld)");
        assert_eq!(FtQuery::single_word(WordMode::PrefixTrimOne, "hello"), "hell*");
        assert_eq!(FtQuery::single_word(WordMode::PrefixTrimTwo, "hello"), "hel*");
    }

    #[test]
    fn test_prefix_trim_is_char_based() {
        assert_eq!(FtQuery::single_word(WordMode::PrefixTrimOne, "rüya"), "rüy*");
        assert_eq!(FtQuery::single_word(WordMode::PrefixTrimTwo, "düş"), "d*");
    }

    #[test]
    fn test_prefix_trim_short_words() {
        assert_eq!(FtQuery::single_word(WordMode::PrefixTrimOne, "a"), "*");
        assert_eq!(FtQuery::single_word(WordMode::PrefixTrimTwo, "a"), "*");
        assert_eq!(FtQuery::single_word(WordMode::PrefixTrimOne, ""), "*");
    }

    #[test]
    fn test_trim_end_chars_bounds() {
        assert_eq!(trim_end_chars("hello", 0), "hello");
        assert_eq!(trim_end_chars("hello", 5), "");
        assert_eq!(trim_end_chars("hello", 9), "");
    }

    #[test]
    fn test_multi_word_modes() {
        let words = ["hello", "world"];
        assert_eq!(FtQuery::multi_word(JoinMode::Union, &words), "hello|world");
        assert_eq!(FtQuery::multi_word(JoinMode::Optional, &words), "hello~world");
        assert_eq!(FtQuery::multi_word(JoinMode::Intersect, &words), "hello world");
    }

    #[test]
    fn test_fuzzy() {
        assert_eq!(FtQuery::fuzzy(1, &["hello", "world"]), "%hello% %world%");
        assert_eq!(FtQuery::fuzzy(3, &["hi"]), "%%%hi%%%");
        assert_eq!(FtQuery::fuzzy(0, &["hi"]), "hi");
    }

    #[test]
    fn test_scopes() {
        assert_eq!(FtQuery::field_scope("title", "hello"), "@title:hello");
        assert_eq!(FtQuery::multi_field_scope(&["title", "body"], "hello"), "@title|body:hello");
    }

    #[test]
    fn test_clauses_joined_in_order() {
        let mut query = FtQuery::new("")
            .tag_filter(false, "cats", &["a", "b"])
            .numeric_filter(true, "price", 100, 100, false, false, false, false)
            .pure_negative("spam");
        assert_eq!(query.serialize(), "@cats:{a|b} -@price:[100 100] -spam");
        assert_eq!(query.raw(), "@cats:{a|b} -@price:[100 100] -spam");
    }

    #[test]
    fn test_empty_query_serializes_empty() {
        let mut query = FtQuery::new("seed");
        assert_eq!(query.raw(), "seed");
        assert!(query.is_empty());
        assert_eq!(query.serialize(), "");
        assert_eq!(query.raw(), "");
    }

    #[test]
    fn test_serialize_again_after_mutation() {
        let mut query = FtQuery::new("").wildcard();
        assert_eq!(query.serialize(), "*");
        let mut query = query.prefix_match(false, "name", "dre*");
        assert_eq!(query.serialize(), "* @name:dre*");
    }

    #[test]
    fn test_prefix_match_without_field() {
        let mut query = FtQuery::new("").prefix_match(true, "", "hel*");
        assert_eq!(query.serialize(), "-hel*");
    }

    #[test]
    fn test_multi_field_prefix_match() {
        let mut query = FtQuery::new("").multi_field_prefix_match(
            false,
            &["name", "slug", "description", "cats", "tags"],
            "differen*",
        );
        assert_eq!(query.serialize(), "@name|slug|description|cats|tags:differen*");
    }

    #[test]
    fn test_geo_clause() {
        let mut query = FtQuery::new("").geo_filter(false, "loc", 29.0, 41.0, 5.0, GeoUnit::Miles);
        assert_eq!(query.serialize(), "@loc:[29 41 5 mi]");
    }
}
