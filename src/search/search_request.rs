// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search Request Builder
//!
//! Accumulates `FT.SEARCH` options and serializes them in grammar order.
//!
//! ```text
//! FT.SEARCH {index} {query} [NOCONTENT] [VERBATIM] [NOSTOPWORDS] [WITHSCORES] [WITHPAYLOADS] [WITHSORTKEYS]
//!   [FILTER {numeric_attribute} {min} {max}] ...
//!   [GEOFILTER {geo_attribute} {lon} {lat} {radius} m|km|mi|ft]
//!   [INKEYS {num} {key} ... ]
//!   [INFIELDS {num} {attribute} ... ]
//!   [RETURN {num} {identifier} ... ]
//!   [SUMMARIZE [FIELDS {num} {attribute} ... ] [FRAGS {num}] [LEN {fragsize}] [SEPARATOR {separator}]]
//!   [HIGHLIGHT [FIELDS {num} {attribute} ... ] [TAGS {open} {close}]]
//!   [SLOP {slop}] [INORDER]
//!   [LANGUAGE {language}]
//!   [EXPANDER {expander}]
//!   [SCORER {scorer}]
//!   [PAYLOAD {payload}]
//!   [SORTBY {attribute} [ASC|DESC]]
//!   [LIMIT offset num]
//! ```
//!
//! `LIMIT` is always emitted; without an explicit count it is `LIMIT 0 10`.

use serde::{Deserialize, Serialize};

use super::args::Command;
use super::clause::{self, GeoUnit};

/// Results returned when no explicit count is set.
pub const DEFAULT_LIMIT: i64 = 10;

/// Sort direction for `SORTBY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Numeric `FILTER` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericFilter {
    pub field: String,
    pub min: f64,
    pub exclusive_min: bool,
    pub max: f64,
    pub exclusive_max: bool,
}

/// `GEOFILTER` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFilter {
    pub field: String,
    pub lon: f64,
    pub lat: f64,
    pub radius: f64,
    pub unit: GeoUnit,
}

/// `SUMMARIZE` sub-configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summarize {
    pub fields: Vec<String>,
    /// Emitted when positive
    pub frags: i64,
    /// Emitted when positive
    pub len: i64,
    pub separator: Option<String>,
}

/// `HIGHLIGHT` sub-configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub fields: Vec<String>,
    pub open_tag: String,
    pub close_tag: String,
}

/// Search request builder (`FT.SEARCH`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FtSearch {
    index_name: String,
    query: String,
    no_content: bool,
    verbatim: bool,
    no_stopwords: bool,
    with_scores: bool,
    with_payloads: bool,
    with_sort_keys: bool,
    filters: Vec<NumericFilter>,
    geo_filter: Option<GeoFilter>,
    in_keys: Vec<String>,
    in_fields: Vec<String>,
    return_fields: Option<Vec<String>>,
    summarize: Summarize,
    highlight: Highlight,
    slop: Option<i64>,
    in_order: bool,
    language: Option<String>,
    expander: Option<String>,
    scorer: Option<String>,
    payload: Option<String>,
    sort_by: Option<(String, SortOrder)>,
    offset: i64,
    count: i64,
}

impl FtSearch {
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            ..Default::default()
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn rename(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    /// Query expression; omitted from the command when empty.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Return document ids only
    pub fn no_content(mut self, active: bool) -> Self {
        self.no_content = active;
        self
    }

    /// Do not expand query terms with stemming
    pub fn verbatim(mut self, active: bool) -> Self {
        self.verbatim = active;
        self
    }

    /// Do not filter stop words from the query
    pub fn no_stopwords(mut self, active: bool) -> Self {
        self.no_stopwords = active;
        self
    }

    pub fn with_scores(mut self, active: bool) -> Self {
        self.with_scores = active;
        self
    }

    pub fn with_payloads(mut self, active: bool) -> Self {
        self.with_payloads = active;
        self
    }

    pub fn with_sort_keys(mut self, active: bool) -> Self {
        self.with_sort_keys = active;
        self
    }

    /// Add a numeric `FILTER`. Infinite bounds render as `+inf`/`-inf`,
    /// finite ones keep their fraction.
    pub fn filter(
        mut self,
        field: impl Into<String>,
        min: f64,
        max: f64,
        exclusive_min: bool,
        exclusive_max: bool,
    ) -> Self {
        self.filters.push(NumericFilter {
            field: field.into(),
            min,
            exclusive_min,
            max,
            exclusive_max,
        });
        self
    }

    pub fn geo_filter(
        mut self,
        field: impl Into<String>,
        lon: f64,
        lat: f64,
        radius: f64,
        unit: GeoUnit,
    ) -> Self {
        self.geo_filter = Some(GeoFilter {
            field: field.into(),
            lon,
            lat,
            radius,
            unit,
        });
        self
    }

    /// Restrict results to these keys (replaces previous keys)
    pub fn in_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.in_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict matching to these attributes (replaces previous fields)
    pub fn in_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.in_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Project returned attributes. An empty list still emits `RETURN 0`.
    pub fn return_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.return_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn summarize<S: Into<String>>(
        mut self,
        fields: Vec<String>,
        frags: i64,
        len: i64,
        separator: Option<S>,
    ) -> Self {
        self.summarize = Summarize {
            fields,
            frags,
            len,
            separator: separator.map(Into::into),
        };
        self
    }

    pub fn highlight(
        mut self,
        fields: Vec<String>,
        open_tag: impl Into<String>,
        close_tag: impl Into<String>,
    ) -> Self {
        self.highlight = Highlight {
            fields,
            open_tag: open_tag.into(),
            close_tag: close_tag.into(),
        };
        self
    }

    /// Maximum number of unmatched positions between phrase terms
    pub fn slop(mut self, slop: Option<i64>) -> Self {
        self.slop = slop;
        self
    }

    /// Require query terms to appear in query order
    pub fn in_order(mut self, active: bool) -> Self {
        self.in_order = active;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn expander(mut self, expander: impl Into<String>) -> Self {
        self.expander = Some(expander.into());
        self
    }

    pub fn scorer(mut self, scorer: impl Into<String>) -> Self {
        self.scorer = Some(scorer.into());
        self
    }

    /// Payload exposed to custom scoring functions
    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn sort_by(mut self, attribute: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some((attribute.into(), order));
        self
    }

    /// Page window. A non-positive `count` falls back to `0 10`.
    pub fn limit(mut self, offset: i64, count: i64) -> Self {
        self.offset = offset;
        self.count = count;
        self
    }

    /// Generate the FT.SEARCH command
    pub fn serialize(&self) -> Command {
        let mut cmd = Command::new("FT.SEARCH");
        cmd.arg(&self.index_name);

        if !self.query.is_empty() {
            cmd.arg(&self.query);
        }

        let flags = [
            (self.no_content, "NOCONTENT"),
            (self.verbatim, "VERBATIM"),
            (self.no_stopwords, "NOSTOPWORDS"),
            (self.with_scores, "WITHSCORES"),
            (self.with_payloads, "WITHPAYLOADS"),
            (self.with_sort_keys, "WITHSORTKEYS"),
        ];
        for (active, keyword) in flags {
            if active {
                cmd.arg(keyword);
            }
        }

        for filter in &self.filters {
            cmd.arg("FILTER")
                .arg(&filter.field)
                .arg(clause::format_bound(filter.min, filter.exclusive_min))
                .arg(clause::format_bound(filter.max, filter.exclusive_max));
        }

        if let Some(geo) = self.geo_filter.as_ref().filter(|g| !g.field.is_empty()) {
            cmd.arg("GEOFILTER")
                .arg(&geo.field)
                .arg(geo.lon)
                .arg(geo.lat)
                .arg(geo.radius)
                .arg(geo.unit.as_str());
        }

        if !self.in_keys.is_empty() {
            cmd.arg("INKEYS").counted(self.in_keys.iter());
        }

        if !self.in_fields.is_empty() {
            cmd.arg("INFIELDS").counted(self.in_fields.iter());
        }

        if let Some(fields) = &self.return_fields {
            cmd.arg("RETURN").counted(fields.iter());
        }

        if !self.summarize.fields.is_empty() {
            cmd.arg("SUMMARIZE")
                .arg("FIELDS")
                .counted(self.summarize.fields.iter());
            if self.summarize.frags > 0 {
                cmd.arg("FRAGS").arg(self.summarize.frags);
            }
            if self.summarize.len > 0 {
                cmd.arg("LEN").arg(self.summarize.len);
            }
            if let Some(separator) = self.summarize.separator.as_deref().filter(|s| !s.is_empty()) {
                cmd.arg("SEPARATOR").arg(separator);
            }
        }

        if !self.highlight.fields.is_empty() {
            cmd.arg("HIGHLIGHT")
                .arg("FIELDS")
                .counted(self.highlight.fields.iter());
            cmd.arg("TAGS")
                .arg(&self.highlight.open_tag)
                .arg(&self.highlight.close_tag);
        }

        if let Some(slop) = self.slop {
            cmd.arg("SLOP").arg(slop);
        }

        if self.in_order {
            cmd.arg("INORDER");
        }

        let options = [
            ("LANGUAGE", &self.language),
            ("EXPANDER", &self.expander),
            ("SCORER", &self.scorer),
            ("PAYLOAD", &self.payload),
        ];
        for (keyword, value) in options {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                cmd.arg(keyword).arg(value);
            }
        }

        if let Some((attribute, order)) = self.sort_by.as_ref().filter(|(a, _)| !a.is_empty()) {
            cmd.arg("SORTBY").arg(attribute).arg(order.as_str());
        }

        if self.count > 0 {
            cmd.arg("LIMIT").arg(self.offset).arg(self.count);
        } else {
            cmd.arg("LIMIT").arg(0i64).arg(DEFAULT_LIMIT);
        }

        cmd
    }
}
