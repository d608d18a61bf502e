use serde::{Deserialize, Serialize};

/// Closed `[min, max]` interval over one axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Smallest extent covering both.
    pub fn union(self, other: Extent) -> Extent {
        Extent {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Extent of a slice, ignoring NaN. `None` when nothing finite-or-infinite remains.
    pub fn of(values: &[f64]) -> Option<Extent> {
        let min = crate::simd::min_f64(values);
        let max = crate::simd::max_f64(values);
        if min.is_nan() || max.is_nan() || min > max {
            None
        } else {
            Some(Extent { min, max })
        }
    }

    /// Folds several optional extents into one.
    pub fn union_all<I: IntoIterator<Item = Option<Extent>>>(extents: I) -> Option<Extent> {
        extents
            .into_iter()
            .flatten()
            .reduce(|acc, e| acc.union(e))
    }
}

/// Bounding box of a point set: x and y extents together.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataBounds {
    pub x: Extent,
    pub y: Extent,
}
