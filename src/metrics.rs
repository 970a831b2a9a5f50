// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for command dispatch.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The host application is responsible for installing an exporter.
//!
//! # Metric Naming Convention
//! - `redisearch_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `command`: FT.SEARCH, FT.CREATE, PIPELINE, ...
//! - `status`: success or an error kind

use metrics::{counter, histogram};
use std::time::{Duration, Instant};

/// Record a dispatched command and its outcome
pub fn record_command(command: &str, status: &str) {
    counter!(
        "redisearch_commands_total",
        "command" => command.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record round-trip latency
pub fn record_command_latency(command: &str, duration: Duration) {
    histogram!(
        "redisearch_command_seconds",
        "command" => command.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record the number of commands sent in one pipeline
pub fn record_pipeline_size(count: usize) {
    histogram!("redisearch_pipeline_size").record(count as f64);
}

/// A timing guard that records latency on drop
pub struct LatencyTimer {
    command: String,
    start: Instant,
}

impl LatencyTimer {
    /// Start a new latency timer
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_command_latency(&self.command, self.start.elapsed());
    }
}
