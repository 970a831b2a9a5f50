//! Property-based tests for the command builders.
//!
//! Uses proptest to generate random builder inputs and verify rendering
//! invariants hold and decoding never panics.
//!
//! Run with: `cargo test --test proptest_fuzz`

use proptest::prelude::*;

use redisearch_query::search::clause::{format_bound, tag_filter};
use redisearch_query::search::{
    FieldOptions, FieldType, FtCreate, FtQuery, FtSearch, SchemaField, SearchBuilder, DEFAULT_LIMIT,
};

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Attribute names: no `@`, `:` or whitespace
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,9}"
}

/// Values: no `@` or `:`, no surrounding whitespace (decode trims)
fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]([A-Za-z0-9 ,.]{0,12}[A-Za-z0-9])?"
}

fn pairs_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec((key_strategy(), value_strategy()), 1..8)
        .prop_map(|pairs| pairs.into_iter().flat_map(|(k, v)| [k, v]).collect())
}

fn field_strategy() -> impl Strategy<Value = SchemaField> {
    (
        key_strategy(),
        prop_oneof![
            Just(FieldType::Text),
            Just(FieldType::Numeric),
            Just(FieldType::Tag),
            Just(FieldType::Geo),
        ],
        any::<bool>(),
    )
        .prop_map(|(name, field_type, sortable)| {
            let field = SchemaField::new(field_type, name);
            if sortable {
                field.sortable()
            } else {
                field
            }
        })
}

// =============================================================================
// Search Form Encoding
// =============================================================================

proptest! {
    /// Encoding then decoding yields the original flattened list
    #[test]
    fn prop_encode_decode_roundtrip(attr in pairs_strategy()) {
        let encoded = SearchBuilder::encode(&attr);
        let decoded = SearchBuilder::decode(&encoded);
        prop_assert_eq!(decoded, Some(attr));
    }

    /// Map decoding keeps the last value seen for each key
    #[test]
    fn prop_decode_to_map_last_wins(attr in pairs_strategy()) {
        let encoded = SearchBuilder::encode(&attr);
        let map = SearchBuilder::decode_to_map(&encoded).unwrap();
        let mut expected = std::collections::HashMap::new();
        for pair in attr.chunks(2) {
            expected.insert(pair[0].clone(), pair[1].clone());
        }
        prop_assert_eq!(map, expected);
    }

    /// Decoding arbitrary input should never panic
    #[test]
    fn fuzz_decode_arbitrary(input in ".*") {
        let _ = SearchBuilder::decode(&input);
        let _ = SearchBuilder::decode_to_map(&input);
    }
}

// =============================================================================
// Search Request Invariants
// =============================================================================

proptest! {
    /// LIMIT is always the last block; non-positive counts fall back to 0 10
    #[test]
    fn prop_limit_always_emitted(offset in -100i64..1000, count in -100i64..1000) {
        let tokens = FtSearch::new("idx").query("hello").limit(offset, count).serialize().to_strings();
        let tail = &tokens[tokens.len() - 3..];
        prop_assert_eq!(&tail[0], "LIMIT");
        if count > 0 {
            prop_assert_eq!(&tail[1], &offset.to_string());
            prop_assert_eq!(&tail[2], &count.to_string());
        } else {
            prop_assert_eq!(&tail[1], "0");
            prop_assert_eq!(&tail[2], &DEFAULT_LIMIT.to_string());
        }
    }

    /// Finite bounds re-parse to the same number
    #[test]
    fn prop_bound_reparses(value in any::<f64>().prop_filter("finite", |v| v.is_finite()), exclusive in any::<bool>()) {
        let rendered = format_bound(value, exclusive);
        let digits = if exclusive {
            prop_assert!(rendered.starts_with('('));
            &rendered[1..]
        } else {
            rendered.as_str()
        };
        prop_assert_eq!(digits.parse::<f64>().unwrap(), value);
    }
}

// =============================================================================
// Index Definition Invariants
// =============================================================================

proptest! {
    /// SCHEMA appears exactly when at least one field is declared
    #[test]
    fn prop_schema_iff_fields(fields in prop::collection::vec(field_strategy(), 0..6)) {
        let mut index = FtCreate::new("idx").prefix(["p:"]);
        for field in &fields {
            index = index.field(field.clone());
        }
        let tokens = index.serialize().to_strings();
        let has_schema = tokens.iter().any(|t| t == "SCHEMA");
        prop_assert_eq!(has_schema, !fields.is_empty());
    }

    /// Field declarations keep insertion order
    #[test]
    fn prop_field_order_preserved(names in prop::collection::hash_set(key_strategy(), 1..6)) {
        let names: Vec<String> = names.into_iter().collect();
        let mut index = FtCreate::new("idx");
        for name in &names {
            index = index.schema(FieldType::Numeric, name.as_str(), "", false, FieldOptions::numeric(false));
        }
        let tokens = index.serialize().to_strings();
        let declared: Vec<&String> = tokens.iter().skip_while(|t| *t != "SCHEMA").skip(1).step_by(2).collect();
        let expected: Vec<&String> = names.iter().collect();
        prop_assert_eq!(declared, expected);
    }
}

// =============================================================================
// Query Expression Invariants
// =============================================================================

proptest! {
    /// Tag clauses list every value between braces
    #[test]
    fn prop_tag_filter_shape(field in key_strategy(), tags in prop::collection::vec("[a-z]{1,8}", 1..5)) {
        let clause = tag_filter(false, &field, &tags);
        prop_assert_eq!(clause, format!("@{}:{{{}}}", field, tags.join("|")));
    }

    /// Serialized query is the clauses joined by single spaces
    #[test]
    fn prop_query_joins_clauses(words in prop::collection::vec("[a-z]{1,8}", 0..6)) {
        let mut query = FtQuery::new("");
        for word in &words {
            query = query.pure_negative(word);
        }
        let expected: Vec<String> = words.iter().map(|w| format!("-{}", w)).collect();
        prop_assert_eq!(query.serialize(), expected.join(" "));
        prop_assert_eq!(query.clauses().len(), words.len());
    }
}
