// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search Infrastructure
//!
//! Builders that render RediSearch commands as ordered argument lists.
//! Nothing in this module talks to Redis; see [`crate::client`] for dispatch.
//!
//! # Architecture
//!
//! ```text
//! FtQuery (query expression) ──┐
//!                              ├─→ FtSearch → FT.SEARCH
//! SearchBuilder (form state) ──┘
//!
//! FtCreate / SchemaField ──→ FT.CREATE, FT.ALTER
//! SugAdd / SugGet        ──→ FT.SUGADD, FT.SUGGET
//! ```
//!
//! # Index Registration
//!
//! ```rust
//! use redisearch_query::search::{FtCreate, FtQuery, FtSearch, IndexManager, SortOrder};
//!
//! let mut manager = IndexManager::new();
//! manager.register(
//!     FtCreate::new("index_dreams")
//!         .prefix(["drd:"])
//!         .text("name")
//!         .tag("cats", Some(","))
//!         .numeric_sortable("updated"),
//! );
//!
//! let create = manager.create_command("index_dreams").unwrap();
//! assert_eq!(
//!     create.to_string(),
//!     "FT.CREATE index_dreams ON HASH PREFIX 1 drd: SCHEMA name TEXT cats TAG SEPARATOR , updated NUMERIC SORTABLE"
//! );
//!
//! let mut query = FtQuery::new("").prefix_match(false, "name", "fly*");
//! let search = FtSearch::new("index_dreams")
//!     .query(query.serialize())
//!     .sort_by("updated", SortOrder::Desc)
//!     .limit(0, 20);
//! assert_eq!(
//!     search.serialize().to_string(),
//!     "FT.SEARCH index_dreams @name:fly* SORTBY updated DESC LIMIT 0 20"
//! );
//! ```
//!
//! # Query Language
//!
//! ```text
//! hello world               - Intersection
//! hello|world               - Union
//! hello~world               - Optional terms
//! -world                    - Exclusion
//! @name:dream               - Field scope
//! @age:[25 (40]             - Numeric range, exclusive max
//! @tags:{rust|database}     - Tag membership (OR)
//! @loc:[29 41 5 km]         - Geo radius
//! @name:ali*                - Prefix match
//! @name:%alice%             - Fuzzy match (Levenshtein)
//! ```

mod args;
pub mod clause;
mod commands;
mod index_manager;
mod query_builder;
mod search_builder;
mod search_request;
mod suggest;

pub use args::{Arg, Command};
pub use clause::GeoUnit;
pub use commands::{alias_add, alias_delete, alias_update, alter_schema_add, drop_index};
pub use index_manager::{
    DataType, FieldOptions, FieldType, FtCreate, IndexManager, PhoneticMatcher, SchemaField,
};
pub use query_builder::{FtQuery, JoinMode, WordMode};
pub use search_builder::SearchBuilder;
pub use search_request::{
    FtSearch, GeoFilter, Highlight, NumericFilter, SortOrder, Summarize, DEFAULT_LIMIT,
};
pub use suggest::{SugAdd, SugGet};
