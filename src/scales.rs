use serde::{Deserialize, Serialize};

use crate::error::{ReduceError, ReduceResult};

/// Affine map between data-x and pixel columns over `[x0, x1]` and `0..width`.
///
/// Column `0` sits on `x0` and column `width - 1` on `x1`, so `invert` is the
/// exact inverse of the forward coefficient `k = (width - 1) / (x1 - x0)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScale")]
pub struct PixelScale {
    x0: f64,
    x1: f64,
    width: usize,
}

impl PixelScale {
    pub const MIN_WIDTH: usize = 2;

    pub fn new(x0: f64, x1: f64, width: usize) -> ReduceResult<Self> {
        if !x0.is_finite() || !x1.is_finite() || x1 <= x0 {
            return Err(ReduceError::InvalidDomain { x0, x1 });
        }
        if width < Self::MIN_WIDTH {
            return Err(ReduceError::InvalidWidth {
                width,
                min: Self::MIN_WIDTH,
            });
        }
        Ok(Self { x0, x1, width })
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.x0, self.x1)
    }

    /// Columns per data unit.
    #[inline(always)]
    pub fn k(&self) -> f64 {
        (self.width - 1) as f64 / (self.x1 - self.x0)
    }

    /// Column for `x`, rounding half up. `None` when it falls outside `0..width`.
    #[inline(always)]
    pub fn column(&self, x: f64) -> Option<usize> {
        column_for(x, self.x0, self.k(), self.width)
    }

    /// Data-x of a column's center.
    #[inline(always)]
    pub fn invert(&self, col: usize) -> f64 {
        self.x0 + col as f64 * (self.x1 - self.x0) / (self.width - 1) as f64
    }

    /// Returns (m, c) such that column = x * m + c, before rounding.
    pub fn get_linear_coeffs(&self) -> (f64, f64) {
        let m = self.k();
        (m, -self.x0 * m)
    }
}

/// Unvalidated wire form; deserialization goes through [`PixelScale::new`].
#[derive(Deserialize)]
struct RawScale {
    x0: f64,
    x1: f64,
    width: usize,
}

impl TryFrom<RawScale> for PixelScale {
    type Error = ReduceError;

    fn try_from(raw: RawScale) -> ReduceResult<Self> {
        PixelScale::new(raw.x0, raw.x1, raw.width)
    }
}

/// Hot-loop form of [`PixelScale::column`] with `k` hoisted by the caller.
#[inline(always)]
pub(crate) fn column_for(x: f64, x0: f64, k: f64, width: usize) -> Option<usize> {
    let c = ((x - x0) * k + 0.5).floor();
    // NaN fails both comparisons
    if c >= 0.0 && c < width as f64 {
        Some(c as usize)
    } else {
        None
    }
}
