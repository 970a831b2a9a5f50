//! # RediSearch Query
//!
//! Typed builders for RediSearch commands and a thin async dispatcher.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Builders                             │
//! │  • FtQuery: query expressions (words, tags, ranges, geo)   │
//! │  • FtCreate / SchemaField: index definitions               │
//! │  • FtSearch: search options in grammar order               │
//! │  • SugAdd / SugGet, admin commands, SearchBuilder          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                     (Command: ordered args)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Dispatch                              │
//! │  • RediSearchClient over a multiplexed ConnectionManager   │
//! │  • Single commands or one pipeline round trip              │
//! │  • SearchApi typed helpers over any Dispatch               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redisearch_query::{ClientConfig, RediSearchClient, SearchApi};
//! use redisearch_query::search::{FtCreate, FtSearch, SortOrder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), redisearch_query::SearchError> {
//!     let client = RediSearchClient::connect(&ClientConfig::default()).await?;
//!
//!     let index = FtCreate::new("index_dreams")
//!         .prefix(["drd:"])
//!         .text("name")
//!         .numeric_sortable("updated");
//!     client.create_index(&index).await?;
//!
//!     client.hset("drd:1", &[("name", "Flying"), ("updated", "1700000000")]).await?;
//!
//!     let request = FtSearch::new("index_dreams")
//!         .query("fly*")
//!         .sort_by("updated", SortOrder::Desc);
//!     let reply = client.search(&request).await?;
//!     println!("{:?}", reply);
//!
//!     client.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`search`]: command builders (no I/O)
//! - [`client`]: [`RediSearchClient`], [`Dispatch`] and [`SearchApi`]
//! - [`config`]: [`ClientConfig`]
//! - [`metrics`]: command counters and latency histograms

pub mod config;
pub mod error;
pub mod search;
pub mod client;
pub mod metrics;

pub use config::ClientConfig;
pub use error::SearchError;
pub use client::{Dispatch, RediSearchClient, SearchApi};
pub use search::{Command, FtCreate, FtQuery, FtSearch, SearchBuilder};
pub use crate::metrics::LatencyTimer;
