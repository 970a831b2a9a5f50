// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Clause Formatter
//!
//! Renders single predicate fragments into RediSearch query syntax.
//!
//! ```text
//! @price:[100 (200]           - Numeric range, exclusive max
//! -@price:[100 100]           - Negated numeric range
//! @cats:{a|b}                 - Tag set (OR)
//! @location:[29 41 10 km]     - Geo radius
//! @name|slug:hel*             - Field-scoped match
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Radius unit for geo filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoUnit {
    Meters,
    Kilometers,
    Miles,
    Feet,
}

impl GeoUnit {
    pub const fn as_str(self) -> &'static str {
        match self {
            GeoUnit::Meters => "m",
            GeoUnit::Kilometers => "km",
            GeoUnit::Miles => "mi",
            GeoUnit::Feet => "ft",
        }
    }
}

impl fmt::Display for GeoUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn negation(negate: bool) -> &'static str {
    if negate {
        "-"
    } else {
        ""
    }
}

/// Render a numeric range clause: `[-]@field:[min max]`.
///
/// Each bound is rendered as `(n` when exclusive, as an infinity marker when
/// flagged infinite, and as the plain integer otherwise. Exclusivity wins
/// over infinity. The minimum side renders `-inf`, the maximum side `inf`.
#[allow(clippy::too_many_arguments)]
pub fn numeric_range(
    negate: bool,
    field: &str,
    min: i64,
    max: i64,
    exclude_min: bool,
    exclude_max: bool,
    inf_min: bool,
    inf_max: bool,
) -> String {
    let min_repr = if exclude_min {
        format!("({}", min)
    } else if inf_min {
        "-inf".to_string()
    } else {
        min.to_string()
    };

    let max_repr = if exclude_max {
        format!("({}", max)
    } else if inf_max {
        "inf".to_string()
    } else {
        max.to_string()
    };

    format!("{}@{}:[{} {}]", negation(negate), field, min_repr, max_repr)
}

/// Render a tag clause: `[-]@field:{a|b|c}`.
///
/// Tag values are not escaped; a `|` inside a value splits it.
pub fn tag_filter<S: AsRef<str>>(negate: bool, field: &str, tags: &[S]) -> String {
    let joined = tags
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join("|");
    format!("{}@{}:{{{}}}", negation(negate), field, joined)
}

/// Render a geo radius clause: `[-]@field:[lon lat radius unit]`.
///
/// Coordinates and radius are rounded to whole numbers.
pub fn geo_filter(negate: bool, field: &str, lon: f64, lat: f64, radius: f64, unit: GeoUnit) -> String {
    format!(
        "{}@{}:[{:.0} {:.0} {:.0} {}]",
        negation(negate),
        field,
        lon,
        lat,
        radius,
        unit
    )
}

/// Render a field-scoped match: `[-]@f1|f2:query`, or `[-]query` with no fields.
pub fn field_match<S: AsRef<str>>(negate: bool, fields: &[S], query: &str) -> String {
    let mut clause = String::from(negation(negate));
    if !fields.is_empty() {
        clause.push('@');
        clause.push_str(&join_fields(fields));
        clause.push(':');
    }
    clause.push_str(query);
    clause
}

/// Prefix a fragment with a field scope: `@field:query`.
pub fn field_scope(field: &str, query: &str) -> String {
    format!("@{}:{}", field, query)
}

/// Prefix a fragment with a multi-field scope: `@f1|f2:query`.
pub fn multi_field_scope<S: AsRef<str>>(fields: &[S], query: &str) -> String {
    format!("@{}:{}", join_fields(fields), query)
}

fn join_fields<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| f.as_ref())
        .collect::<Vec<_>>()
        .join("|")
}

/// Render one bound of a search-level `FILTER` block.
///
/// `(n` when exclusive, `+inf`/`-inf` for infinities, else the shortest
/// decimal form of `n` (`9.99`, `20`).
pub fn format_bound(value: f64, exclusive: bool) -> String {
    let number = if value.is_infinite() {
        if value.is_sign_positive() {
            "+inf".to_string()
        } else {
            "-inf".to_string()
        }
    } else {
        value.to_string()
    };

    if exclusive {
        format!("({}", number)
    } else {
        number
    }
}
