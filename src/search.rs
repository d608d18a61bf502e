//! Index-range lookup over sorted x-series.
//!
//! Evenly spaced series can be indexed directly from the first delta; anything
//! else goes through a pair of binary searches.

use std::ops::Range;

use tracing::debug;

use crate::config::ProgressionDetection;

/// How many consecutive deltas are sampled when classifying a series.
const SAMPLED_DELTAS: usize = 5;

/// Contiguous run of indices into a sorted array.
///
/// Stored half-open. A non-empty range corresponds to the closed interval
/// `[start(), last()]`; the empty range stands for the `[0, -1]` sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct IndexRange {
    start: usize,
    end: usize,
}

impl IndexRange {
    pub const EMPTY: IndexRange = IndexRange { start: 0, end: 0 };

    /// Closed interval `[start, last]`.
    pub fn closed(start: usize, last: usize) -> Self {
        debug_assert!(start <= last);
        Self {
            start,
            end: last + 1,
        }
    }

    /// `[0, n-1]`, or empty when `n == 0`.
    pub fn full(n: usize) -> Self {
        Self { start: 0, end: n }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Last included index. `None` for the empty sentinel.
    pub fn last(&self) -> Option<usize> {
        (self.end > self.start).then(|| self.end - 1)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Borrows the covered part of `data`.
    pub fn slice<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        &data[self.as_range()]
    }
}

impl From<IndexRange> for Range<usize> {
    fn from(r: IndexRange) -> Self {
        r.as_range()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPath {
    /// Trivial input (`n <= 1`), no search performed.
    Trivial,
    Arithmetic,
    BinarySearch,
}

/// A range together with how it was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeLookup {
    pub range: IndexRange,
    pub path: SearchPath,
    /// The window missed the data and the full array was returned instead.
    pub fell_back: bool,
}

/// Tolerant float comparison used for delta sampling.
pub fn float_equal_est(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    if a == 0.0 {
        return b.abs() < 1e-4;
    }
    if b == 0.0 {
        return a.abs() < 1e-4;
    }
    (a - b).abs() / a.abs().max(b.abs()) < 1e-3
}

/// First index whose value is not less than `target`.
pub fn lower_bound(x: &[f64], target: f64) -> usize {
    let mut left = 0;
    let mut right = x.len();
    while left < right {
        let mid = left + (right - left) / 2;
        if x[mid] < target {
            left = mid + 1;
        } else {
            right = mid;
        }
    }
    left
}

/// First index whose value is greater than `target`.
pub fn upper_bound(x: &[f64], target: f64) -> usize {
    let mut left = 0;
    let mut right = x.len();
    while left < right {
        let mid = left + (right - left) / 2;
        if x[mid] <= target {
            left = mid + 1;
        } else {
            right = mid;
        }
    }
    left
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RangeFinder {
    detection: ProgressionDetection,
}

impl RangeFinder {
    pub fn new(detection: ProgressionDetection) -> Self {
        Self { detection }
    }

    pub fn detection(&self) -> ProgressionDetection {
        self.detection
    }

    /// Whether `x` takes the direct-index path under this finder's rule.
    /// Needs at least two values.
    pub fn is_arithmetic(&self, x: &[f64]) -> bool {
        let n = x.len();
        if n < 2 {
            return false;
        }
        let d1 = x[1] - x[0];
        let last = (n - 1).min(SAMPLED_DELTAS);
        let mut deltas = (2..=last).map(|i| x[i] - x[i - 1]);
        match self.detection {
            ProgressionDetection::AsObserved => deltas.all(|d| !float_equal_est(d, d1)),
            ProgressionDetection::UniformSpacing => deltas.all(|d| float_equal_est(d, d1)),
        }
    }

    pub fn find(&self, x: &[f64], xmin: f64, xmax: f64) -> IndexRange {
        self.locate(x, xmin, xmax).range
    }

    /// Range of `x` inside `[xmin, xmax]` and the path that found it.
    ///
    /// Assumes `x` is sorted; checking would cost O(n) per lookup. Unsorted
    /// input yields an unspecified range.
    pub fn locate(&self, x: &[f64], xmin: f64, xmax: f64) -> RangeLookup {
        let n = x.len();
        if n <= 1 {
            return RangeLookup {
                range: IndexRange::full(n),
                path: SearchPath::Trivial,
                fell_back: false,
            };
        }

        let path = if self.is_arithmetic(x) {
            SearchPath::Arithmetic
        } else {
            SearchPath::BinarySearch
        };
        // A NaN bound intersects nothing.
        let bounds = if xmin.is_nan() || xmax.is_nan() {
            None
        } else if path == SearchPath::Arithmetic {
            let d1 = x[1] - x[0];
            debug!(n, d1, xmin, xmax, "range lookup via arithmetic progression");
            arithmetic_bounds(x, d1, xmin, xmax)
        } else {
            search_bounds(x, xmin, xmax)
        };

        match bounds {
            Some((start, last)) => RangeLookup {
                range: IndexRange::closed(start, last),
                path,
                fell_back: false,
            },
            None => RangeLookup {
                range: IndexRange::full(n),
                path,
                fell_back: true,
            },
        }
    }
}

/// Direct index computation from the first delta. `None` when the clamped
/// bounds cross.
fn arithmetic_bounds(x: &[f64], d1: f64, xmin: f64, xmax: f64) -> Option<(usize, usize)> {
    let n = x.len();
    let start = ((xmin - x[0]) / d1).ceil().max(0.0);
    let end = ((xmax - x[0]) / d1).floor().min((n - 1) as f64);
    if start <= end {
        Some((start as usize, end as usize))
    } else {
        None
    }
}

fn search_bounds(x: &[f64], xmin: f64, xmax: f64) -> Option<(usize, usize)> {
    let n = x.len();
    let start = lower_bound(x, xmin);
    let end = upper_bound(x, xmax);
    if end == 0 {
        return None;
    }
    let last = (end - 1).min(n - 1);
    (start <= last).then_some((start, last))
}

/// [`RangeFinder::find`] with the default progression rule.
///
/// `x` must be non-decreasing. That is not checked here; [`Series`](crate::Series)
/// validates it once at construction.
pub fn find_range(x: &[f64], xmin: f64, xmax: f64) -> IndexRange {
    RangeFinder::default().find(x, xmin, xmax)
}
