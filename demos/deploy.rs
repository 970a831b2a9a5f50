// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Index deployment example.
//!
//! Creates the `index_dreams` and `index_terms` indexes over `drd:*` hashes.
//!
//! # Prerequisites
//!
//! A Redis Stack server (RediSearch module loaded):
//! ```bash
//! docker run -p 6379:6379 redis/redis-stack-server:latest
//! ```
//!
//! # Run
//!
//! ```bash
//! cargo run --example deploy
//! ```

use redisearch_query::search::{DataType, FieldOptions, FieldType, FtCreate};
use redisearch_query::{ClientConfig, RediSearchClient, SearchApi, SearchError};

const INDEX_DREAMS: &str = "index_dreams";
const INDEX_TERMS: &str = "index_terms";

fn generate_index_query(index_name: &str) -> Result<FtCreate, SearchError> {
    let text = FieldOptions::text(0.0, false, false, None);
    let numeric = FieldOptions::numeric(false);

    match index_name {
        INDEX_DREAMS => Ok(FtCreate::new(index_name)
            .data_type(DataType::Hash)
            .prefix(["drd:"])
            .schema(FieldType::Text, "uid", "", false, text.clone())
            .schema(FieldType::Text, "name", "", false, text.clone())
            .schema(FieldType::Text, "description", "", false, text.clone())
            .schema(FieldType::Text, "cats", "", false, text.clone())
            .schema(FieldType::Text, "tags", "", false, text)
            .schema(FieldType::Numeric, "updated", "", true, numeric)),
        INDEX_TERMS => {
            let tag = FieldOptions::tag(false, Some(","));
            Ok(FtCreate::new(index_name)
                .data_type(DataType::Hash)
                .prefix(["drd:"])
                .schema(FieldType::Text, "uid", "", false, text)
                .schema(FieldType::Tag, "cats", "", false, tag.clone())
                .schema(FieldType::Tag, "tags", "", false, tag)
                .schema(FieldType::Numeric, "updated", "", true, numeric))
        }
        other => Err(SearchError::IndexNotFound(other.to_string())),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redisearch_query=debug,info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = ClientConfig {
        name: "myredisearch".into(),
        redis_url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into()),
        health_check_on_connect: true,
    };
    let client = RediSearchClient::connect(&config).await?;

    for index_name in [INDEX_DREAMS, INDEX_TERMS] {
        let index = generate_index_query(index_name)?;
        println!("{}", index.serialize());
        client.create_index(&index).await?;
        println!("✅ {} created", index_name);
    }

    client.close();
    println!("bye bye");
    Ok(())
}
