//! chart_reduce: per-pixel downsampling and range search for time-series charts.

pub mod config;
pub mod data_types;
pub mod decimation;
pub mod error;
pub mod extent;
pub mod interpolate;
pub mod scales;
pub mod search;
pub mod simd;
pub mod view;

pub use config::{DownsampleConfig, ProgressionDetection};
pub use data_types::{DataBounds, Extent, Point, Points, Series, SeriesStore};
pub use decimation::{
    downsample_parallel, downsample_per_pixel, downsample_quick, CancellationToken,
    ParallelDownsampler,
};
pub use error::{ReduceError, ReduceResult};
pub use interpolate::{interpolate, interpolate_pairs};
pub use scales::PixelScale;
pub use search::{find_range, IndexRange, RangeFinder};
pub use view::{ViewFrame, ViewReducer};
