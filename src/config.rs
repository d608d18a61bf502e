//! Tunables for the reduction engine, loadable from JSON.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ReduceResult;

/// How `find_range` decides that an x-series is an arithmetic progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionDetection {
    /// Arithmetic when every sampled delta differs from the first one.
    /// Matches the behaviour charts were tuned against; see DESIGN.md.
    #[default]
    AsObserved,
    /// Arithmetic when every sampled delta matches the first one.
    UniformSpacing,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownsampleConfig {
    /// Upper bound on concurrent workers. `None` uses the host's available parallelism.
    pub max_workers: Option<usize>,
    /// Deadline for a whole parallel reduction, in milliseconds.
    pub worker_timeout_ms: Option<u64>,
    /// Below this many points the view reducer stays single-threaded.
    pub parallel_threshold: usize,
    pub progression: ProgressionDetection,
    pub thread_name_prefix: String,
}

impl Default for DownsampleConfig {
    fn default() -> Self {
        Self {
            max_workers: None,
            worker_timeout_ms: None,
            parallel_threshold: 100_000,
            progression: ProgressionDetection::AsObserved,
            thread_name_prefix: "reduce-worker".to_string(),
        }
    }
}

impl DownsampleConfig {
    pub fn from_json_str(json: &str) -> ReduceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn worker_timeout(&self) -> Option<Duration> {
        self.worker_timeout_ms.map(Duration::from_millis)
    }

    /// Worker count for a reduction over `point_count` points.
    /// Never more workers than points, never fewer than one.
    pub fn worker_count(&self, point_count: usize) -> usize {
        let hint = self.max_workers.unwrap_or_else(host_concurrency);
        hint.min(point_count).max(1)
    }
}

pub fn host_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
