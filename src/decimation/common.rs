//! Column buckets shared by the serial and parallel reducers.

use crate::data_types::{Point, Points};
use crate::scales::{column_for, PixelScale};

/// Per-column min/max accumulators for one reduction call.
///
/// Stored interleaved as `[min0, max0, min1, max1, ...]`, the same layout a
/// worker returns, so partial results merge without reshaping. Empty columns
/// hold `(+inf, -inf)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnBuckets {
    data: Vec<f64>,
}

impl ColumnBuckets {
    pub fn new(width: usize) -> Self {
        let mut data = Vec::with_capacity(width * 2);
        for _ in 0..width {
            data.push(f64::INFINITY);
            data.push(f64::NEG_INFINITY);
        }
        Self { data }
    }

    /// Wraps a buffer received from a worker. `None` if its length is odd.
    pub fn from_interleaved(data: Vec<f64>) -> Option<Self> {
        (data.len() % 2 == 0).then_some(Self { data })
    }

    pub fn width(&self) -> usize {
        self.data.len() / 2
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }

    /// `(min, max)` of a column, `None` if nothing landed in it.
    pub fn column(&self, col: usize) -> Option<(f64, f64)> {
        let (min, max) = (self.data[col * 2], self.data[col * 2 + 1]);
        (min != f64::INFINITY).then_some((min, max))
    }

    #[inline(always)]
    pub fn record(&mut self, col: usize, y: f64) {
        let idx = col * 2;
        if y < self.data[idx] {
            self.data[idx] = y;
        }
        if y > self.data[idx + 1] {
            self.data[idx + 1] = y;
        }
    }

    /// Folds another partial result into this one. Order-independent.
    pub fn merge(&mut self, other: &ColumnBuckets) {
        crate::simd::merge_min_max(&mut self.data, &other.data);
    }

    /// Occupied columns in ascending order: min first, then max if it differs.
    pub fn emit(&self, scale: &PixelScale) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.data.len());
        self.emit_into(scale, &mut out);
        out
    }

    pub fn emit_into(&self, scale: &PixelScale, out: &mut Vec<Point>) {
        for (col, pair) in self.data.chunks_exact(2).enumerate() {
            let (min, max) = (pair[0], pair[1]);
            if min == f64::INFINITY {
                continue;
            }
            let x = scale.invert(col);
            out.push(Point::new(x, min));
            if max != min {
                out.push(Point::new(x, max));
            }
        }
    }
}

/// Drops every point of `points` into its column. Points outside the
/// domain are skipped.
pub fn fill_buckets(buckets: &mut ColumnBuckets, points: Points<'_>, scale: &PixelScale) {
    let (x0, k, width) = (scale.x0(), scale.k(), scale.width());
    match points {
        Points::Pairs(pairs) => {
            for &[x, y] in pairs {
                if let Some(col) = column_for(x, x0, k, width) {
                    buckets.record(col, y);
                }
            }
        }
        Points::Columns { x, y } => {
            for (&xv, &yv) in x.iter().zip(y.iter()) {
                if let Some(col) = column_for(xv, x0, k, width) {
                    buckets.record(col, yv);
                }
            }
        }
    }
}
