//! Bounding extents across named series, for axis autoscaling.
//!
//! Empty input yields `None` rather than an inverted `(+inf, -inf)` pair.

use crate::data_types::{DataBounds, Extent, SeriesStore};
use crate::search::RangeFinder;

/// X and y extents over every point of every series.
pub fn data_extent(store: &SeriesStore) -> Option<DataBounds> {
    let x = Extent::union_all(store.iter().map(|(_, s)| Extent::of(s.time())));
    let y = Extent::union_all(store.iter().map(|(_, s)| Extent::of(s.value())));
    Some(DataBounds { x: x?, y: y? })
}

/// Union of the cached per-series x-domains.
pub fn x_extent(store: &SeriesStore) -> Option<Extent> {
    Extent::union_all(store.iter().map(|(_, s)| s.x_domain()))
}

/// Union of the cached per-series y-domains.
pub fn y_extent(store: &SeriesStore) -> Option<Extent> {
    Extent::union_all(store.iter().map(|(_, s)| s.y_domain()))
}

/// Extents of the points each series shows inside `[xmin, xmax]`.
///
/// Uses the same range lookup as the view, so a series the window misses
/// entirely contributes its whole extent (the lookup's full-array fallback).
pub fn visible_extent(
    store: &SeriesStore,
    finder: &RangeFinder,
    xmin: f64,
    xmax: f64,
) -> Option<DataBounds> {
    let mut x = None;
    let mut y = None;
    for (_, series) in store.iter() {
        let range = series.find_range(finder, xmin, xmax);
        if range.is_empty() {
            continue;
        }
        x = Extent::union_all([x, Extent::of(range.slice(series.time()))]);
        y = Extent::union_all([y, Extent::of(range.slice(series.value()))]);
    }
    Some(DataBounds { x: x?, y: y? })
}
