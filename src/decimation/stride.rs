//! Strided sampling for quick previews.

use crate::data_types::{Point, Points};
use crate::error::{ReduceError, ReduceResult};

/// Every `step`-th item starting at index 0.
pub fn sample_every<T: Clone>(items: &[T], step: usize) -> ReduceResult<Vec<T>> {
    if step == 0 {
        return Err(ReduceError::InvalidStep);
    }
    Ok(items.iter().step_by(step).cloned().collect())
}

/// Stride for a quick preview of `len` points over `width` columns.
///
/// `floor(len / (width - 1))`, at least 1. Widths below 2 are rejected.
pub fn quick_step(len: usize, width: usize) -> ReduceResult<usize> {
    if width < 2 {
        return Err(ReduceError::InvalidWidth { width, min: 2 });
    }
    Ok((len / (width - 1)).max(1))
}

/// Low-fidelity preview: plain strided picks, no min/max aggregation.
///
/// Meant to be drawn while a per-pixel reduction is still running, never as
/// the final frame. 100 points at width 11 give indices 0, 10, ..., 90.
/// Picks by index, so x order is not checked.
pub fn downsample_quick<T: Clone>(points: &[T], width: usize) -> ReduceResult<Vec<T>> {
    let step = quick_step(points.len(), width)?;
    sample_every(points, step)
}

/// [`downsample_quick`] over either point shape, returning owned points.
pub fn downsample_quick_points<'a>(
    points: impl Into<Points<'a>>,
    width: usize,
) -> ReduceResult<Vec<Point>> {
    let points = points.into();
    points.check()?;
    let step = quick_step(points.len(), width)?;
    Ok((0..points.len())
        .step_by(step)
        .map(|i| points.get(i))
        .collect())
}
