use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{ReduceError, ReduceResult};

/// A single (x, y) sample. Layout-compatible with `[f64; 2]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Borrowed input points, in either of the two shapes charts hand us.
#[derive(Clone, Copy, Debug)]
pub enum Points<'a> {
    /// `[[x, y], ...]`
    Pairs(&'a [[f64; 2]]),
    /// Index-aligned `time` / `value` arrays.
    Columns { x: &'a [f64], y: &'a [f64] },
}

impl<'a> Points<'a> {
    /// Builds a column view, rejecting arrays of different length.
    pub fn columns(x: &'a [f64], y: &'a [f64]) -> ReduceResult<Self> {
        if x.len() != y.len() {
            return Err(ReduceError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self::Columns { x, y })
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Pairs(p) => p.len(),
            Self::Columns { x, y } => x.len().min(y.len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn x(&self, i: usize) -> f64 {
        match self {
            Self::Pairs(p) => p[i][0],
            Self::Columns { x, .. } => x[i],
        }
    }

    #[inline(always)]
    pub fn y(&self, i: usize) -> f64 {
        match self {
            Self::Pairs(p) => p[i][1],
            Self::Columns { y, .. } => y[i],
        }
    }

    #[inline(always)]
    pub fn get(&self, i: usize) -> Point {
        Point::new(self.x(i), self.y(i))
    }

    /// Validates the shared-length invariant of the column form.
    pub(crate) fn check(&self) -> ReduceResult<()> {
        match self {
            Self::Columns { x, y } if x.len() != y.len() => Err(ReduceError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            }),
            _ => Ok(()),
        }
    }
}

impl<'a> From<&'a [[f64; 2]]> for Points<'a> {
    fn from(pairs: &'a [[f64; 2]]) -> Self {
        Self::Pairs(pairs)
    }
}

impl<'a> From<&'a Vec<[f64; 2]>> for Points<'a> {
    fn from(pairs: &'a Vec<[f64; 2]>) -> Self {
        Self::Pairs(pairs.as_slice())
    }
}

impl<'a> From<&'a [Point]> for Points<'a> {
    fn from(points: &'a [Point]) -> Self {
        Self::Pairs(bytemuck::cast_slice(points))
    }
}

impl<'a> From<&'a Vec<Point>> for Points<'a> {
    fn from(points: &'a Vec<Point>) -> Self {
        Self::from(points.as_slice())
    }
}

/// Unchecked column view; mismatched lengths surface as `LengthMismatch`
/// from whichever entry point consumes it.
impl<'a> From<(&'a [f64], &'a [f64])> for Points<'a> {
    fn from((x, y): (&'a [f64], &'a [f64])) -> Self {
        Self::Columns { x, y }
    }
}
