//! Fan-out/fan-in per-pixel reduction.
//!
//! The input is cut into contiguous, disjoint slices, one per worker. Each
//! worker buckets its slice into a private `2 * width` buffer, and the caller
//! folds the partial buffers with min/max once every worker has replied.
//! Workers only ever read their own slice, so no locking is involved.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::{host_concurrency, DownsampleConfig};
use crate::data_types::{Point, Points};
use crate::error::{ReduceError, ReduceResult};
use crate::scales::PixelScale;

use super::common::{fill_buckets, ColumnBuckets};

/// Points a worker processes between cancellation/deadline checks.
pub const CANCEL_CHECK_INTERVAL: usize = 4096;

/// Shared flag to abandon an in-flight reduction.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// The slice of input handed to one worker.
#[derive(Clone, Copy, Debug)]
pub enum WorkerPayload<'a> {
    /// Interleaved `[x0, y0, x1, y1, ...]`.
    Interleaved(&'a [f64]),
    /// Values and their timestamps as separate, equally long slices.
    Columns {
        chunk: &'a [f64],
        time_chunk: &'a [f64],
    },
}

impl<'a> WorkerPayload<'a> {
    pub fn point_count(&self) -> usize {
        match self {
            Self::Interleaved(buf) => buf.len() / 2,
            Self::Columns { chunk, .. } => chunk.len(),
        }
    }

    fn to_points(self) -> ReduceResult<Points<'a>> {
        match self {
            Self::Interleaved(buf) => bytemuck::try_cast_slice::<f64, [f64; 2]>(buf)
                .map(Points::Pairs)
                .map_err(|_| ReduceError::LengthMismatch {
                    x_len: buf.len().div_ceil(2),
                    y_len: buf.len() / 2,
                }),
            Self::Columns { chunk, time_chunk } => Points::columns(time_chunk, chunk),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct WorkerRequest<'a> {
    pub payload: WorkerPayload<'a>,
    pub width: usize,
    pub x0: f64,
    pub x1: f64,
}

/// A worker's reply: `2 * width` floats, even slots holding column minima
/// (`+inf` when empty) and odd slots column maxima (`-inf` when empty).
#[derive(Clone, Debug, PartialEq)]
pub struct WorkerResponse {
    pub buckets: Vec<f64>,
}

/// Runs one worker request to completion on the calling thread.
pub fn run_worker(request: &WorkerRequest<'_>) -> ReduceResult<WorkerResponse> {
    let scale = PixelScale::new(request.x0, request.x1, request.width)?;
    let guard = Guard::unbounded();
    let buckets = bucket_request(request, &scale, &guard)?;
    Ok(WorkerResponse {
        buckets: buckets.into_inner(),
    })
}

/// Cuts `points` into at most `workers` contiguous requests.
///
/// Slices hold `ceil(n / workers)` points each, the last one clipped. An
/// `(x, y)` pair is never split across two requests.
pub fn partition_requests<'a>(
    points: Points<'a>,
    workers: usize,
    scale: &PixelScale,
) -> Vec<WorkerRequest<'a>> {
    let per_worker = points.len().div_ceil(workers.max(1)).max(1);
    let request = |payload| WorkerRequest {
        payload,
        width: scale.width(),
        x0: scale.x0(),
        x1: scale.x1(),
    };

    match points {
        Points::Pairs(pairs) => {
            let flat: &[f64] = bytemuck::cast_slice(pairs);
            flat.chunks(per_worker * 2)
                .map(|chunk| request(WorkerPayload::Interleaved(chunk)))
                .collect()
        }
        Points::Columns { x, y } => x
            .chunks(per_worker)
            .zip(y.chunks(per_worker))
            .map(|(time_chunk, chunk)| request(WorkerPayload::Columns { chunk, time_chunk }))
            .collect(),
    }
}

/// Cancellation and deadline shared by the workers of one call.
struct Guard<'t> {
    token: Option<&'t CancellationToken>,
    deadline: Option<(Instant, Duration)>,
}

impl<'t> Guard<'t> {
    fn unbounded() -> Self {
        Self {
            token: None,
            deadline: None,
        }
    }

    fn check(&self) -> ReduceResult<()> {
        if self.token.is_some_and(CancellationToken::is_cancelled) {
            return Err(ReduceError::Cancelled);
        }
        if let Some((deadline, after)) = self.deadline {
            if Instant::now() >= deadline {
                return Err(ReduceError::TimedOut { after });
            }
        }
        Ok(())
    }
}

fn bucket_request(
    request: &WorkerRequest<'_>,
    scale: &PixelScale,
    guard: &Guard<'_>,
) -> ReduceResult<ColumnBuckets> {
    let mut buckets = ColumnBuckets::new(scale.width());
    match request.payload.to_points()? {
        Points::Pairs(pairs) => {
            for block in pairs.chunks(CANCEL_CHECK_INTERVAL) {
                guard.check()?;
                fill_buckets(&mut buckets, Points::Pairs(block), scale);
            }
        }
        Points::Columns { x, y } => {
            for (xb, yb) in x
                .chunks(CANCEL_CHECK_INTERVAL)
                .zip(y.chunks(CANCEL_CHECK_INTERVAL))
            {
                guard.check()?;
                fill_buckets(&mut buckets, Points::Columns { x: xb, y: yb }, scale);
            }
        }
    }
    Ok(buckets)
}

/// Runs a worker body, turning a panic into `WorkerFailed`.
fn isolate<F>(worker: usize, body: F) -> ReduceResult<ColumnBuckets>
where
    F: FnOnce() -> ReduceResult<ColumnBuckets>,
{
    panic::catch_unwind(AssertUnwindSafe(body)).unwrap_or_else(|payload| {
        Err(ReduceError::WorkerFailed {
            worker,
            reason: panic_reason(payload.as_ref()),
        })
    })
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// Parallel per-pixel reducer backed by a dedicated thread pool.
///
/// Workers carry no state, so the pool is reused across calls; each call
/// still gets its own set of one-shot tasks.
pub struct ParallelDownsampler {
    pool: rayon::ThreadPool,
    config: DownsampleConfig,
}

impl ParallelDownsampler {
    pub fn new(config: DownsampleConfig) -> ReduceResult<Self> {
        let threads = config.max_workers.unwrap_or_else(host_concurrency).max(1);
        let prefix = config.thread_name_prefix.clone();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |i| format!("{prefix}-{i}"))
            .build()?;
        Ok(Self { pool, config })
    }

    pub fn config(&self) -> &DownsampleConfig {
        &self.config
    }

    pub fn downsample<'a>(
        &self,
        points: impl Into<Points<'a>>,
        scale: &PixelScale,
    ) -> ReduceResult<Vec<Point>> {
        self.downsample_with_cancel(points, scale, &CancellationToken::new())
    }

    pub fn downsample_with_cancel<'a>(
        &self,
        points: impl Into<Points<'a>>,
        scale: &PixelScale,
        token: &CancellationToken,
    ) -> ReduceResult<Vec<Point>> {
        let merged = self.bucket(points.into(), scale, token)?;
        Ok(merged.emit(scale))
    }

    /// Fans the points out, joins all workers, and merges their buckets.
    pub fn bucket(
        &self,
        points: Points<'_>,
        scale: &PixelScale,
        token: &CancellationToken,
    ) -> ReduceResult<ColumnBuckets> {
        points.check()?;
        if token.is_cancelled() {
            warn!("parallel reduction cancelled before dispatch");
            return Err(ReduceError::Cancelled);
        }

        let n = points.len();
        let requests = partition_requests(points, self.config.worker_count(n), scale);
        let guard = Guard {
            token: Some(token),
            deadline: self
                .config
                .worker_timeout()
                .map(|after| (Instant::now() + after, after)),
        };
        debug!(
            points = n,
            workers = requests.len(),
            width = scale.width(),
            "parallel reduction fan-out"
        );

        let partials: Vec<ReduceResult<ColumnBuckets>> = self.pool.install(|| {
            requests
                .par_iter()
                .enumerate()
                .map(|(worker, request)| isolate(worker, || bucket_request(request, scale, &guard)))
                .collect()
        });

        if token.is_cancelled() {
            warn!("parallel reduction cancelled before merge");
            return Err(ReduceError::Cancelled);
        }

        let mut merged = ColumnBuckets::new(scale.width());
        for partial in partials {
            let partial = partial.inspect_err(|e| warn!(error = %e, "parallel reduction failed"))?;
            merged.merge(&partial);
        }
        Ok(merged)
    }
}

/// One-shot parallel reduction with its own short-lived pool.
///
/// `max_workers` of `None` uses the host's available parallelism.
pub fn downsample_parallel<'a>(
    points: impl Into<Points<'a>>,
    width: usize,
    x0: f64,
    x1: f64,
    max_workers: Option<usize>,
) -> ReduceResult<Vec<Point>> {
    let scale = PixelScale::new(x0, x1, width)?;
    let reducer = ParallelDownsampler::new(DownsampleConfig {
        max_workers,
        ..Default::default()
    })?;
    reducer.downsample(points, &scale)
}
