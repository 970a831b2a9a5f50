// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use thiserror::Error;

/// Errors surfaced by index lookups and command dispatch.
///
/// Builders never fail; only name lookups and the round trip to Redis do.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Index '{0}' not found")]
    IndexNotFound(String),
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
    #[error("Health check failed for '{name}': {source}")]
    HealthCheck {
        name: String,
        #[source]
        source: redis::RedisError,
    },
    #[error("Command not supported: {0}")]
    Unsupported(&'static str),
}

impl SearchError {
    /// Label used for the `status` dimension of command metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::IndexNotFound(_) => "not_found",
            SearchError::Redis(_) => "redis_error",
            SearchError::HealthCheck { .. } => "health_check",
            SearchError::Unsupported(_) => "unsupported",
        }
    }
}
