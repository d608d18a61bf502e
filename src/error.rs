use std::time::Duration;

use thiserror::Error;

pub type ReduceResult<T> = Result<T, ReduceError>;

#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("invalid x-domain: x0={x0}, x1={x1} (need finite bounds with x1 > x0)")]
    InvalidDomain { x0: f64, x1: f64 },

    #[error("invalid pixel width {width}: at least {min} columns required")]
    InvalidWidth { width: usize, min: usize },

    #[error("parallel arrays differ in length: x has {x_len} values, y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("x values are not sorted: x[{index}] is smaller than the value before it")]
    Unsorted { index: usize },

    #[error("sampling step must be greater than zero")]
    InvalidStep,

    #[error("unknown series: {0}")]
    UnknownSeries(String),

    #[error("worker {worker} failed: {reason}")]
    WorkerFailed { worker: usize, reason: String },

    #[error("reduction timed out after {after:?}")]
    TimedOut { after: Duration },

    #[error("reduction cancelled")]
    Cancelled,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
