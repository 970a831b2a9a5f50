// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! End-to-end search example.
//!
//! Demonstrates:
//! 1. Storing dream hashes under `drd:{uid}`
//! 2. Filling a suggestion dictionary in one pipeline
//! 3. Fuzzy suggestion lookup
//! 4. Building a search from form state and reading back matching ids
//! 5. Displaying command metrics
//!
//! Run `cargo run --example deploy` first so the indexes exist.
//!
//! ```bash
//! cargo run --example simple
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use redis::Value;
use serde::Serialize;

use redisearch_query::search::{FtQuery, FtSearch, JoinMode, SortOrder, SugAdd, SugGet, WordMode};
use redisearch_query::{ClientConfig, Dispatch, RediSearchClient, SearchApi, SearchBuilder, SearchError};

const INDEX_DREAMS: &str = "index_dreams";
const INDEX_TERMS: &str = "index_terms";
const DREAM_DIC_KEY: &str = "dreamdic";
const DREAM_KEY_PREFIX: &str = "drd:";

const ONE_YEAR_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Serialize)]
struct DreamSearch {
    uid: String,
    name: String,
    slug: String,
    updated: i64,
    description: String,
    cats: String,
    tags: String,
}

impl DreamSearch {
    fn key(&self) -> String {
        format!("{}{}", DREAM_KEY_PREFIX, self.uid)
    }

    /// Flatten into hash fields; numbers are stored as their decimal text.
    fn to_fields(&self) -> Result<Vec<(String, String)>, serde_json::Error> {
        let value = serde_json::to_value(self)?;
        let fields = value
            .as_object()
            .map(|map| {
                map.iter()
                    .map(|(k, v)| {
                        let v = match v {
                            serde_json::Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        (k.clone(), v)
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(fields)
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

fn generate_search_query(
    index_name: &str,
    form: &SearchBuilder,
    offset: i64,
    limit: i64,
) -> Result<FtSearch, SearchError> {
    let mut query = FtQuery::new("");

    let expression = match index_name {
        INDEX_DREAMS => {
            if form.raw.is_empty() {
                let mut words: Vec<String> = form.query.split('+').map(str::to_string).collect();
                let q = if words.len() > 1 {
                    words.push(FtQuery::single_word(WordMode::Exact, &words.join(" ")));
                    let union = FtQuery::multi_word(JoinMode::Union, &words);
                    FtQuery::single_word(WordMode::Group, &union)
                } else {
                    FtQuery::single_word(WordMode::PrefixTrimOne, &form.query)
                };
                query = query.multi_field_prefix_match(
                    false,
                    &["name", "slug", "description", "cats", "tags"],
                    &q,
                );
                FtQuery::serialize(&mut query)
            } else {
                form.raw.clone()
            }
        }
        INDEX_TERMS => {
            if form.raw.is_empty() {
                if !form.cats.is_empty() {
                    query = query.tag_filter(false, "cats", &[form.cats.as_str()]);
                }
                if !form.tags.is_empty() {
                    query = query.tag_filter(false, "tags", &[form.tags.as_str()]);
                }
                if query.is_empty() && form.sort_by == "latest" {
                    let min = unix_now() - ONE_YEAR_SECS;
                    query = query.numeric_filter(false, "updated", min, -1, false, false, false, true);
                }
                FtQuery::serialize(&mut query)
            } else {
                form.raw.clone()
            }
        }
        other => return Err(SearchError::IndexNotFound(other.to_string())),
    };

    let mut search = FtSearch::new(index_name)
        .query(expression)
        .no_content(true)
        .no_stopwords(true)
        .limit(offset, limit);
    if form.sort_by == "latest" {
        search = search.sort_by("updated", SortOrder::Desc);
    }
    Ok(search)
}

/// `[total, key, key, ...]` from a NOCONTENT search reply.
fn parse_ids(reply: &Value) -> (i64, Vec<String>) {
    let Value::Array(items) = reply else {
        return (0, Vec::new());
    };

    let total = match items.first() {
        Some(Value::Int(n)) => *n,
        _ => 0,
    };

    let ids = items
        .iter()
        .skip(1)
        .filter_map(|item| match item {
            Value::BulkString(bytes) => {
                let key = String::from_utf8_lossy(bytes);
                Some(key.strip_prefix(DREAM_KEY_PREFIX).unwrap_or(&key).to_string())
            }
            _ => None,
        })
        .collect();

    (total, ids)
}

async fn store(client: &RediSearchClient, item: &DreamSearch) -> Result<(), Box<dyn std::error::Error>> {
    let fields = item.to_fields()?;
    let pairs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    client.hset(&item.key(), &pairs).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder.install().expect("failed to install metrics recorder");

    tracing_subscriber::fmt().with_target(false).compact().init();

    let config = ClientConfig {
        name: "myredisearch".into(),
        ..Default::default()
    };
    let client = RediSearchClient::connect(&config).await?;

    // 1. Hashes
    let uid = 123456;
    store(
        &client,
        &DreamSearch {
            uid: uid.to_string(),
            name: format!("Different Test {}", uid),
            slug: format!("different-test-{}", uid),
            updated: unix_now(),
            description: "Test different model set action.".into(),
            cats: "Test Category, Different model, set action".into(),
            tags: "Test, Different, Default".into(),
        },
    )
    .await?;

    for i in 0..10 {
        store(
            &client,
            &DreamSearch {
                uid: i.to_string(),
                name: format!("Dream Test {}", i),
                slug: format!("dream-test-{}", i),
                updated: unix_now(),
                description: "Test dream model set action.".into(),
                cats: "Test Category, Dream model, set action".into(),
                tags: "Test, Dream, Default".into(),
            },
        )
        .await?;
    }

    // 2. Suggestion dictionary, one round trip
    let suggestions: Vec<_> = ["Test", "Dream", "Different", "Tag", "Default"]
        .iter()
        .map(|tag| SugAdd::new(DREAM_DIC_KEY, *tag).incr(true).serialize())
        .collect();
    client.execute_batch(&suggestions).await?;

    // 3. Fuzzy lookup
    let reply = client.sug_get(&SugGet::new(DREAM_DIC_KEY, "Dif").fuzzy().max(5)).await?;
    let found: Vec<String> = redis::from_redis_value(&reply)?;
    println!("Suggestions: {:?}", found);

    // 4. Search
    let form = SearchBuilder {
        query: "different".into(),
        sort_by: "latest".into(),
        ..Default::default()
    };
    let request = generate_search_query(INDEX_DREAMS, &form, 0, 10)?;
    println!("{}", request.serialize());

    let (total, uids) = parse_ids(&client.search(&request).await?);
    println!("Total: {}, Results: {:?}", total, uids);

    // 5. Metrics
    dump_metrics(&snapshotter);

    client.close();
    Ok(())
}

fn dump_metrics(snapshotter: &Snapshotter) {
    println!("\n📊 Metrics:");
    for (composite_key, _, _, value) in snapshotter.snapshot().into_vec() {
        let (_, key) = composite_key.into_parts();
        let labels: Vec<_> = key.labels().map(|l| format!("{}={}", l.key(), l.value())).collect();
        match value {
            DebugValue::Counter(v) => println!("   {}{{{}}} = {}", key.name(), labels.join(","), v),
            DebugValue::Gauge(v) => println!("   {}{{{}}} = {}", key.name(), labels.join(","), v.into_inner()),
            DebugValue::Histogram(samples) => {
                let sum: f64 = samples.iter().map(|v| v.into_inner()).sum();
                println!("   {}{{{}}} count={} sum={:.6}", key.name(), labels.join(","), samples.len(), sum);
            }
        }
    }
}
