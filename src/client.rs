// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Command dispatch against a RediSearch-enabled Redis.
//!
//! [`Dispatch`] is the seam: anything that can send one [`Command`] or a
//! pipeline of them. [`SearchApi`] layers typed helpers over any dispatcher,
//! so the same helpers work against [`RediSearchClient`] and test doubles.
//!
//! Replies are handed back as [`redis::Value`] unless a helper's signature
//! names a scalar type. Nothing is retried.
//!
//! ```rust,no_run
//! use redisearch_query::{ClientConfig, RediSearchClient, SearchApi};
//! use redisearch_query::search::{FtSearch, SortOrder};
//!
//! # async fn example() -> Result<(), redisearch_query::SearchError> {
//! let client = RediSearchClient::connect(&ClientConfig::default()).await?;
//! let request = FtSearch::new("index_dreams")
//!     .query("different")
//!     .sort_by("updated", SortOrder::Desc);
//! let reply = client.search(&request).await?;
//! # let _ = reply;
//! client.close();
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{from_redis_value, Client, Value};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::SearchError;
use crate::metrics::{record_command, record_pipeline_size, LatencyTimer};
use crate::search::{
    alias_add, alias_delete, alias_update, alter_schema_add, drop_index, Command, FtCreate,
    FtSearch, SchemaField, SugAdd, SugGet,
};

/// Sends rendered commands and returns raw replies.
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// Send one command.
    async fn execute(&self, cmd: &Command) -> Result<Value, SearchError>;

    /// Send commands as one pipeline; replies come back in order.
    async fn execute_batch(&self, cmds: &[Command]) -> Result<Vec<Value>, SearchError>;
}

/// Typed helpers over any [`Dispatch`].
#[async_trait]
pub trait SearchApi: Dispatch {
    async fn create_index(&self, index: &FtCreate) -> Result<(), SearchError> {
        self.execute(&index.serialize()).await.map(|_| ())
    }

    async fn alter_schema_add(&self, index_name: &str, fields: &[SchemaField]) -> Result<(), SearchError> {
        self.execute(&alter_schema_add(index_name, fields)).await.map(|_| ())
    }

    async fn drop_index(&self, index_name: &str, delete_documents: bool) -> Result<(), SearchError> {
        self.execute(&drop_index(index_name, delete_documents)).await.map(|_| ())
    }

    async fn alias_add(&self, alias: &str, index_name: &str) -> Result<(), SearchError> {
        self.execute(&alias_add(alias, index_name)).await.map(|_| ())
    }

    async fn alias_update(&self, alias: &str, index_name: &str) -> Result<(), SearchError> {
        self.execute(&alias_update(alias, index_name)).await.map(|_| ())
    }

    async fn alias_delete(&self, alias: &str) -> Result<(), SearchError> {
        self.execute(&alias_delete(alias)).await.map(|_| ())
    }

    /// Raw `FT.SEARCH` reply: total count followed by keys and field arrays.
    async fn search(&self, request: &FtSearch) -> Result<Value, SearchError> {
        self.execute(&request.serialize()).await
    }

    /// Returns the dictionary size after the insert.
    async fn sug_add(&self, suggestion: &SugAdd) -> Result<i64, SearchError> {
        let reply = self.execute(&suggestion.serialize()).await?;
        Ok(from_redis_value(&reply)?)
    }

    async fn sug_get(&self, request: &SugGet) -> Result<Value, SearchError> {
        self.execute(&request.serialize()).await
    }

    /// Returns whether the string was present.
    async fn sug_del(&self, key: &str, string: &str) -> Result<bool, SearchError> {
        let mut cmd = Command::new("FT.SUGDEL");
        cmd.arg(key).arg(string);
        let deleted: i64 = from_redis_value(&self.execute(&cmd).await?)?;
        Ok(deleted == 1)
    }

    async fn sug_len(&self, key: &str) -> Result<i64, SearchError> {
        let mut cmd = Command::new("FT.SUGLEN");
        cmd.arg(key);
        Ok(from_redis_value(&self.execute(&cmd).await?)?)
    }

    /// `HSET key f1 v1 f2 v2 ...`, returns the number of new fields.
    async fn hset(&self, key: &str, fields: &[(&str, &str)]) -> Result<i64, SearchError> {
        let mut cmd = Command::new("HSET");
        cmd.arg(key);
        for (field, value) in fields {
            cmd.arg(*field).arg(*value);
        }
        Ok(from_redis_value(&self.execute(&cmd).await?)?)
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, SearchError> {
        let mut cmd = Command::new("HGET");
        cmd.arg(key).arg(field);
        Ok(from_redis_value(&self.execute(&cmd).await?)?)
    }

    /// `HMGET key f1 f2 ...`; missing fields come back as `None` in request order.
    async fn hmget(&self, key: &str, fields: &[&str]) -> Result<Vec<Option<String>>, SearchError> {
        let mut cmd = Command::new("HMGET");
        cmd.arg(key);
        for field in fields {
            cmd.arg(*field);
        }
        Ok(from_redis_value(&self.execute(&cmd).await?)?)
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, SearchError> {
        let mut cmd = Command::new("HGETALL");
        cmd.arg(key);
        Ok(from_redis_value(&self.execute(&cmd).await?)?)
    }

    async fn hdel(&self, key: &str, fields: &[&str]) -> Result<i64, SearchError> {
        let mut cmd = Command::new("HDEL");
        cmd.arg(key);
        for field in fields {
            cmd.arg(*field);
        }
        Ok(from_redis_value(&self.execute(&cmd).await?)?)
    }

    async fn del(&self, keys: &[&str]) -> Result<i64, SearchError> {
        let mut cmd = Command::new("DEL");
        for key in keys {
            cmd.arg(*key);
        }
        Ok(from_redis_value(&self.execute(&cmd).await?)?)
    }

    async fn info(&self, index_name: &str) -> Result<Value, SearchError> {
        let mut cmd = Command::new("FT.INFO");
        cmd.arg(index_name);
        self.execute(&cmd).await
    }

    async fn list(&self) -> Result<Vec<String>, SearchError> {
        Ok(from_redis_value(&self.execute(&Command::new("FT._LIST")).await?)?)
    }

    async fn explain(&self, index_name: &str, query: &str) -> Result<String, SearchError> {
        let mut cmd = Command::new("FT.EXPLAIN");
        cmd.arg(index_name).arg(query);
        Ok(from_redis_value(&self.execute(&cmd).await?)?)
    }

    async fn tag_vals(&self, index_name: &str, field: &str) -> Result<Vec<String>, SearchError> {
        let mut cmd = Command::new("FT.TAGVALS");
        cmd.arg(index_name).arg(field);
        Ok(from_redis_value(&self.execute(&cmd).await?)?)
    }

    async fn syn_dump(&self, index_name: &str) -> Result<Value, SearchError> {
        let mut cmd = Command::new("FT.SYNDUMP");
        cmd.arg(index_name);
        self.execute(&cmd).await
    }

    /// Returns the number of new terms.
    async fn dict_add(&self, dict: &str, terms: &[&str]) -> Result<i64, SearchError> {
        let mut cmd = Command::new("FT.DICTADD");
        cmd.arg(dict);
        for term in terms {
            cmd.arg(*term);
        }
        Ok(from_redis_value(&self.execute(&cmd).await?)?)
    }

    async fn dict_del(&self, dict: &str, terms: &[&str]) -> Result<i64, SearchError> {
        let mut cmd = Command::new("FT.DICTDEL");
        cmd.arg(dict);
        for term in terms {
            cmd.arg(*term);
        }
        Ok(from_redis_value(&self.execute(&cmd).await?)?)
    }

    async fn dict_dump(&self, dict: &str) -> Result<Vec<String>, SearchError> {
        let mut cmd = Command::new("FT.DICTDUMP");
        cmd.arg(dict);
        Ok(from_redis_value(&self.execute(&cmd).await?)?)
    }

    async fn config_get(&self, option: &str) -> Result<Value, SearchError> {
        let mut cmd = Command::new("FT.CONFIG");
        cmd.arg("GET").arg(option);
        self.execute(&cmd).await
    }

    async fn config_set(&self, option: &str, value: &str) -> Result<(), SearchError> {
        let mut cmd = Command::new("FT.CONFIG");
        cmd.arg("SET").arg(option).arg(value);
        self.execute(&cmd).await.map(|_| ())
    }

    async fn config_help(&self, option: &str) -> Result<Value, SearchError> {
        let mut cmd = Command::new("FT.CONFIG");
        cmd.arg("HELP").arg(option);
        self.execute(&cmd).await
    }

    async fn aggregate(&self, _index_name: &str, _query: &str) -> Result<Value, SearchError> {
        Err(SearchError::Unsupported("FT.AGGREGATE"))
    }

    async fn profile(&self, _index_name: &str, _query: &str) -> Result<Value, SearchError> {
        Err(SearchError::Unsupported("FT.PROFILE"))
    }

    async fn spell_check(&self, _index_name: &str, _query: &str) -> Result<Value, SearchError> {
        Err(SearchError::Unsupported("FT.SPELLCHECK"))
    }

    async fn syn_update(&self, _index_name: &str, _group_id: &str, _terms: &[&str]) -> Result<Value, SearchError> {
        Err(SearchError::Unsupported("FT.SYNUPDATE"))
    }
}

impl<T: Dispatch + ?Sized> SearchApi for T {}

/// Async client over a multiplexed, auto-reconnecting connection.
///
/// Cloning is cheap and shares the underlying connection.
#[derive(Clone)]
pub struct RediSearchClient {
    name: String,
    connection: ConnectionManager,
}

impl RediSearchClient {
    /// Open a connection, optionally verifying it with PING.
    pub async fn connect(config: &ClientConfig) -> Result<Self, SearchError> {
        info!(name = %config.name, url = %config.redis_url, "Connecting to Redis");

        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        let this = Self {
            name: config.name.clone(),
            connection,
        };

        if config.health_check_on_connect {
            this.health_check().await?;
        }

        info!(name = %this.name, "Redis connected");
        Ok(this)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a clone of the connection manager
    pub fn connection(&self) -> ConnectionManager {
        self.connection.clone()
    }

    /// PING the server.
    pub async fn health_check(&self) -> Result<(), SearchError> {
        let mut conn = self.connection.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|source| {
                warn!(name = %self.name, error = %source, "Health check failed");
                SearchError::HealthCheck {
                    name: self.name.clone(),
                    source,
                }
            })
    }

    /// Release this handle. The connection closes once every clone is dropped.
    pub fn close(self) {
        info!(name = %self.name, "Closing Redis client");
    }
}

#[async_trait]
impl Dispatch for RediSearchClient {
    async fn execute(&self, cmd: &Command) -> Result<Value, SearchError> {
        let command = cmd.name().to_string();
        debug!(name = %self.name, command = %cmd, "Dispatching");

        let _timer = LatencyTimer::new(command.as_str());
        let mut conn = self.connection.clone();
        match cmd.to_cmd().query_async::<Value>(&mut conn).await {
            Ok(reply) => {
                record_command(&command, "success");
                Ok(reply)
            }
            Err(e) => {
                warn!(name = %self.name, command = %command, error = %e, "Command failed");
                let err = SearchError::from(e);
                record_command(&command, err.kind());
                Err(err)
            }
        }
    }

    async fn execute_batch(&self, cmds: &[Command]) -> Result<Vec<Value>, SearchError> {
        if cmds.is_empty() {
            return Ok(Vec::new());
        }

        debug!(name = %self.name, count = cmds.len(), "Dispatching pipeline");
        record_pipeline_size(cmds.len());

        let mut pipeline = redis::pipe();
        for cmd in cmds {
            pipeline.add_command(cmd.to_cmd());
        }

        let _timer = LatencyTimer::new("PIPELINE");
        let mut conn = self.connection.clone();
        match pipeline.query_async::<Vec<Value>>(&mut conn).await {
            Ok(replies) => {
                record_command("PIPELINE", "success");
                Ok(replies)
            }
            Err(e) => {
                warn!(name = %self.name, count = cmds.len(), error = %e, "Pipeline failed");
                let err = SearchError::from(e);
                record_command("PIPELINE", err.kind());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::search::{FieldOptions, FieldType, SortOrder};

    /// Records every command and answers from a queue of canned replies.
    #[derive(Default)]
    struct RecordingDispatch {
        sent: Mutex<Vec<String>>,
        replies: Mutex<VecDeque<Value>>,
    }

    impl RecordingDispatch {
        fn with_replies(replies: Vec<Value>) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                replies: Mutex::new(replies.into()),
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Dispatch for RecordingDispatch {
        async fn execute(&self, cmd: &Command) -> Result<Value, SearchError> {
            self.sent.lock().unwrap().push(cmd.to_string());
            Ok(self.replies.lock().unwrap().pop_front().unwrap_or(Value::Okay))
        }

        async fn execute_batch(&self, cmds: &[Command]) -> Result<Vec<Value>, SearchError> {
            let mut out = Vec::with_capacity(cmds.len());
            for cmd in cmds {
                out.push(self.execute(cmd).await?);
            }
            Ok(out)
        }
    }

    fn bulk(s: &str) -> Value {
        Value::BulkString(s.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn test_create_and_search() {
        let dispatch = RecordingDispatch::default();
        let index = FtCreate::new("index_dreams").prefix(["drd:"]).text("name");
        dispatch.create_index(&index).await.unwrap();

        let request = FtSearch::new("index_dreams")
            .query("different")
            .no_content(true)
            .sort_by("updated", SortOrder::Desc);
        dispatch.search(&request).await.unwrap();

        assert_eq!(
            dispatch.sent(),
            vec![
                "FT.CREATE index_dreams ON HASH PREFIX 1 drd: SCHEMA name TEXT".to_string(),
                "FT.SEARCH index_dreams different NOCONTENT SORTBY updated DESC LIMIT 0 10".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_admin_helpers() {
        let dispatch = RecordingDispatch::default();
        let field = SchemaField::new(FieldType::Tag, "lang").options(FieldOptions::tag(false, Some(",")));
        dispatch.alter_schema_add("idx", &[field]).await.unwrap();
        dispatch.alias_add("dreams", "idx").await.unwrap();
        dispatch.alias_update("dreams", "idx2").await.unwrap();
        dispatch.alias_delete("dreams").await.unwrap();
        dispatch.drop_index("idx", true).await.unwrap();

        assert_eq!(
            dispatch.sent(),
            vec![
                "FT.ALTER idx SCHEMA ADD lang TAG SEPARATOR ,",
                "FT.ALIASADD dreams idx",
                "FT.ALIASUPDATE dreams idx2",
                "FT.ALIASDEL dreams",
                "FT.DROPINDEX idx DD",
            ]
        );
    }

    #[tokio::test]
    async fn test_suggestion_helpers() {
        let dispatch = RecordingDispatch::with_replies(vec![Value::Int(3), Value::Int(1), Value::Int(2)]);

        let size = dispatch.sug_add(&SugAdd::new("dreamdic", "Dream").incr(true)).await.unwrap();
        assert_eq!(size, 3);
        assert!(dispatch.sug_del("dreamdic", "Dream").await.unwrap());
        assert_eq!(dispatch.sug_len("dreamdic").await.unwrap(), 2);

        assert_eq!(
            dispatch.sent(),
            vec![
                "FT.SUGADD dreamdic Dream 1 INCR",
                "FT.SUGDEL dreamdic Dream",
                "FT.SUGLEN dreamdic",
            ]
        );
    }

    #[tokio::test]
    async fn test_hash_helpers() {
        let dispatch = RecordingDispatch::with_replies(vec![
            Value::Int(2),
            bulk("Flying"),
            Value::Nil,
            Value::Array(vec![bulk("Flying"), Value::Nil]),
            Value::Array(vec![bulk("name"), bulk("Flying")]),
            Value::Int(1),
            Value::Int(1),
        ]);

        assert_eq!(dispatch.hset("drd:1", &[("name", "Flying"), ("updated", "42")]).await.unwrap(), 2);
        assert_eq!(dispatch.hget("drd:1", "name").await.unwrap().as_deref(), Some("Flying"));
        assert_eq!(dispatch.hget("drd:1", "missing").await.unwrap(), None);
        assert_eq!(
            dispatch.hmget("drd:1", &["name", "missing"]).await.unwrap(),
            vec![Some("Flying".to_string()), None]
        );
        let all = dispatch.hgetall("drd:1").await.unwrap();
        assert_eq!(all.get("name").map(String::as_str), Some("Flying"));
        assert_eq!(dispatch.hdel("drd:1", &["updated"]).await.unwrap(), 1);
        assert_eq!(dispatch.del(&["drd:1"]).await.unwrap(), 1);

        assert_eq!(dispatch.sent()[0], "HSET drd:1 name Flying updated 42");
        assert_eq!(dispatch.sent()[3], "HMGET drd:1 name missing");
        assert_eq!(dispatch.sent()[5], "HDEL drd:1 updated");
        assert_eq!(dispatch.sent()[6], "DEL drd:1");
    }

    #[tokio::test]
    async fn test_pass_through_literals() {
        let dispatch = RecordingDispatch::with_replies(vec![
            Value::Array(vec![]),
            Value::Array(vec![bulk("index_dreams")]),
            bulk("UNION {\n}\n"),
        ]);
        dispatch.info("index_dreams").await.unwrap();
        assert_eq!(dispatch.list().await.unwrap(), vec!["index_dreams".to_string()]);
        assert!(dispatch.explain("index_dreams", "hello|world").await.unwrap().starts_with("UNION"));
        dispatch.config_set("MINPREFIX", "1").await.unwrap();

        let sent = dispatch.sent();
        assert_eq!(sent[0], "FT.INFO index_dreams");
        assert_eq!(sent[1], "FT._LIST");
        assert_eq!(sent[2], "FT.EXPLAIN index_dreams hello|world");
        assert_eq!(sent[3], "FT.CONFIG SET MINPREFIX 1");
    }

    #[tokio::test]
    async fn test_unsupported_commands_send_nothing() {
        let dispatch = RecordingDispatch::default();
        let err = dispatch.aggregate("idx", "*").await.unwrap_err();
        assert!(matches!(err, SearchError::Unsupported("FT.AGGREGATE")));
        assert!(dispatch.spell_check("idx", "helo").await.is_err());
        assert!(dispatch.profile("idx", "*").await.is_err());
        assert!(dispatch.syn_update("idx", "g1", &["a", "b"]).await.is_err());
        assert!(dispatch.sent().is_empty());
    }

    #[tokio::test]
    async fn test_type_mismatch_surfaces_redis_error() {
        let dispatch = RecordingDispatch::with_replies(vec![bulk("not a number")]);
        let err = dispatch.sug_len("dic").await.unwrap_err();
        assert!(matches!(err, SearchError::Redis(_)));
    }
}
