//! Batch min/max kernels written for LLVM auto-vectorization.

/// Minimum of a slice, skipping NaN. `+inf` for empty or all-NaN input.
pub fn min_f64(data: &[f64]) -> f64 {
    let chunks = data.chunks_exact(8);
    let rem = chunks.remainder();

    let mut min_val = f64::INFINITY;

    for c in chunks {
        let m = c[0].min(c[1]).min(c[2]).min(c[3]).min(c[4]).min(c[5]).min(c[6]).min(c[7]);
        min_val = min_val.min(m);
    }

    for &val in rem {
        min_val = min_val.min(val);
    }
    min_val
}

/// Maximum of a slice, skipping NaN. `-inf` for empty or all-NaN input.
pub fn max_f64(data: &[f64]) -> f64 {
    let chunks = data.chunks_exact(8);
    let rem = chunks.remainder();

    let mut max_val = f64::NEG_INFINITY;

    for c in chunks {
        let m = c[0].max(c[1]).max(c[2]).max(c[3]).max(c[4]).max(c[5]).max(c[6]).max(c[7]);
        max_val = max_val.max(m);
    }

    for &val in rem {
        max_val = max_val.max(val);
    }
    max_val
}

/// Folds an interleaved `[min, max, min, max, ...]` buffer into `acc`.
/// Both buffers must have the same even length.
pub fn merge_min_max(acc: &mut [f64], partial: &[f64]) {
    debug_assert_eq!(acc.len(), partial.len());
    debug_assert_eq!(acc.len() % 2, 0);

    for (a, p) in acc.chunks_exact_mut(2).zip(partial.chunks_exact(2)) {
        a[0] = a[0].min(p[0]);
        a[1] = a[1].max(p[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_skip_nan() {
        let data = [3.0, f64::NAN, -2.0, 7.5, 1.0, 0.0, 4.0, 9.0, f64::NAN, -8.0];
        assert_eq!(min_f64(&data), -8.0);
        assert_eq!(max_f64(&data), 9.0);
    }

    #[test]
    fn test_min_max_empty() {
        assert_eq!(min_f64(&[]), f64::INFINITY);
        assert_eq!(max_f64(&[]), f64::NEG_INFINITY);
    }

    #[test]
    fn test_merge_min_max() {
        let mut acc = vec![f64::INFINITY, f64::NEG_INFINITY, 1.0, 4.0];
        merge_min_max(&mut acc, &[2.0, 3.0, 0.5, 2.0]);
        assert_eq!(acc, vec![2.0, 3.0, 0.5, 4.0]);
    }
}
