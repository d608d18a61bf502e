//! Single-threaded per-pixel min/max envelope.

use crate::data_types::{Point, Points};
use crate::error::ReduceResult;
use crate::scales::PixelScale;

use super::common::{fill_buckets, ColumnBuckets};

/// Single-threaded per-pixel envelope reduction.
///
/// Each point lands in column `round((x - x0) * k)`; points outside
/// `0..width` are dropped. Every occupied column yields its minimum, then its
/// maximum when different, at the column's x. The output has at most
/// `2 * width` points and is sorted by x.
///
/// Input order does not affect the result, so unsorted x is accepted.
pub fn downsample_per_pixel<'a>(
    points: impl Into<Points<'a>>,
    scale: &PixelScale,
) -> ReduceResult<Vec<Point>> {
    let mut output = Vec::new();
    downsample_per_pixel_into(points, scale, &mut output)?;
    Ok(output)
}

/// Buffer-reusing form of [`downsample_per_pixel`]. Clears `output` first.
pub fn downsample_per_pixel_into<'a>(
    points: impl Into<Points<'a>>,
    scale: &PixelScale,
    output: &mut Vec<Point>,
) -> ReduceResult<()> {
    let points = points.into();
    points.check()?;
    output.clear();

    let buckets = bucket_per_pixel(points, scale);
    output.reserve(scale.width() * 2);
    buckets.emit_into(scale, output);
    Ok(())
}

/// Raw column accumulators for `points`, before emission.
pub fn bucket_per_pixel(points: Points<'_>, scale: &PixelScale) -> ColumnBuckets {
    let mut buckets = ColumnBuckets::new(scale.width());
    fill_buckets(&mut buckets, points, scale);
    buckets
}

/// Convenience wrapper taking the raw `(width, x0, x1)` triple.
pub fn downsample_per_pixel_domain<'a>(
    points: impl Into<Points<'a>>,
    width: usize,
    x0: f64,
    x1: f64,
) -> ReduceResult<Vec<Point>> {
    let scale = PixelScale::new(x0, x1, width)?;
    downsample_per_pixel(points, &scale)
}
