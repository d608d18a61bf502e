//! Per-pixel reducers and the strided preview.

pub mod common;
pub mod min_max;
pub mod parallel;
pub mod stride;

pub use common::{fill_buckets, ColumnBuckets};
pub use min_max::{
    bucket_per_pixel, downsample_per_pixel, downsample_per_pixel_domain,
    downsample_per_pixel_into,
};
pub use parallel::{
    downsample_parallel, partition_requests, run_worker, CancellationToken, ParallelDownsampler,
    WorkerPayload, WorkerRequest, WorkerResponse, CANCEL_CHECK_INTERVAL,
};
pub use stride::{downsample_quick, downsample_quick_points, quick_step, sample_every};
