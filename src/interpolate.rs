//! Linear interpolation over sorted samples, for cursor and tooltip readouts.
//!
//! Queries outside the sampled x-range clamp to the first or last y instead of
//! extrapolating. `x` must be sorted with no repeated values around the query;
//! a repeated bracket divides by zero.

use crate::error::{ReduceError, ReduceResult};

/// Interpolates `y` at `query` over parallel sorted arrays.
///
/// `Ok(None)` for empty input or a NaN query. Sortedness of `x` is not
/// checked here, since that would cost O(n) on an O(log n) lookup; build a
/// [`Series`](crate::Series) to validate it once up front. Unsorted input
/// gives an unspecified value or `None`, never a panic.
pub fn interpolate(x: &[f64], y: &[f64], query: f64) -> ReduceResult<Option<f64>> {
    if x.len() != y.len() {
        return Err(ReduceError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    Ok(interpolate_by(x.len(), |i| x[i], |i| y[i], query))
}

/// Same as [`interpolate`] for `[[x, y], ...]` input, with the same
/// unchecked sortedness precondition.
pub fn interpolate_pairs(data: &[[f64; 2]], query: f64) -> Option<f64> {
    interpolate_by(data.len(), |i| data[i][0], |i| data[i][1], query)
}

/// Reference linear scan over pairs. O(n); kept to cross-check the binary search.
pub fn interpolate_pairs_linear(data: &[[f64; 2]], query: f64) -> Option<f64> {
    let n = data.len();
    if n == 0 {
        return None;
    }
    if n == 1 || query <= data[0][0] {
        return Some(data[0][1]);
    }
    if query >= data[n - 1][0] {
        return Some(data[n - 1][1]);
    }
    data.windows(2).find_map(|w| {
        let ([x0, y0], [x1, y1]) = (w[0], w[1]);
        (query >= x0 && query <= x1).then(|| lerp(x0, y0, x1, y1, query))
    })
}

/// Core search, generic over how a sample is read.
pub(crate) fn interpolate_by<FX, FY>(n: usize, x_at: FX, y_at: FY, query: f64) -> Option<f64>
where
    FX: Fn(usize) -> f64,
    FY: Fn(usize) -> f64,
{
    // A NaN query brackets nothing.
    if n == 0 || query.is_nan() {
        return None;
    }
    if n == 1 {
        return Some(y_at(0));
    }

    if query <= x_at(0) {
        return Some(y_at(0));
    }
    if query >= x_at(n - 1) {
        return Some(y_at(n - 1));
    }

    // Invariant: x[high] < query < x[low] once the loop exits without a hit.
    // `high` stays signed until then because it can step below zero mid-search.
    let mut low: isize = 0;
    let mut high: isize = n as isize - 1;
    while low <= high {
        let mid = (low + high) / 2;
        let mid_x = x_at(mid as usize);
        if mid_x == query {
            return Some(y_at(mid as usize));
        } else if mid_x < query {
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    // Unsorted or NaN samples can push the bracket off either end.
    let hi = usize::try_from(high).ok()?;
    let lo = usize::try_from(low).ok().filter(|&lo| lo < n)?;
    Some(lerp(x_at(hi), y_at(hi), x_at(lo), y_at(lo), query))
}

#[inline(always)]
fn lerp(x0: f64, y0: f64, x1: f64, y1: f64, query: f64) -> f64 {
    y0 + (y1 - y0) * (query - x0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        let x = [0.0, 10.0, 20.0];
        let y = [0.0, 100.0, 50.0];
        assert_eq!(interpolate(&x, &y, 5.0).unwrap(), Some(50.0));
        assert_eq!(interpolate(&x, &y, 15.0).unwrap(), Some(75.0));
    }

    #[test]
    fn test_length_mismatch() {
        let err = interpolate(&[0.0, 1.0], &[0.0], 0.5).unwrap_err();
        assert!(matches!(
            err,
            ReduceError::LengthMismatch { x_len: 2, y_len: 1 }
        ));
    }

    #[test]
    fn test_linear_reference_agrees() {
        let data = [[0.0, 1.0], [1.0, 3.0], [4.0, -2.0], [9.0, 0.5]];
        for q in [-1.0, 0.0, 0.3, 1.0, 2.5, 4.0, 8.9, 9.0, 12.0] {
            assert_eq!(interpolate_pairs(&data, q), interpolate_pairs_linear(&data, q));
        }
    }

    #[test]
    fn test_nan_samples_do_not_panic() {
        let x = [f64::NAN, 1.0, 2.0];
        let y = [0.0, 1.0, 2.0];
        let _ = interpolate(&x, &y, 0.5).unwrap();
        let _ = interpolate(&[3.0, 2.0, 1.0], &y, 1.5).unwrap();
    }
}
