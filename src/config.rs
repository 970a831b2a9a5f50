//! Configuration for the search client.
//!
//! # Example
//!
//! ```
//! use redisearch_query::ClientConfig;
//!
//! // Minimal config (uses defaults)
//! let config = ClientConfig::default();
//! assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
//!
//! // Full config
//! let config = ClientConfig {
//!     name: "dreams".into(),
//!     redis_url: "redis://redis:6379/0".into(),
//!     health_check_on_connect: false,
//! };
//! ```

use serde::Deserialize;

/// Connection settings for [`crate::RediSearchClient`].
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Label attached to log lines and health check errors
    #[serde(default = "default_name")]
    pub name: String,

    /// Redis connection string (e.g., "redis://localhost:6379")
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Send PING right after connecting
    #[serde(default = "default_health_check_on_connect")]
    pub health_check_on_connect: bool,
}

fn default_name() -> String { "redisearch".to_string() }
fn default_redis_url() -> String { "redis://127.0.0.1:6379".to_string() }
fn default_health_check_on_connect() -> bool { true }

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            redis_url: default_redis_url(),
            health_check_on_connect: default_health_check_on_connect(),
        }
    }
}
