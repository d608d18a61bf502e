use indexmap::IndexMap;

use super::data::Points;
use super::domain::Extent;
use crate::error::{ReduceError, ReduceResult};
use crate::search::{IndexRange, RangeFinder};

/// A named-series payload: sorted timestamps with index-aligned values.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    time: Vec<f64>,
    value: Vec<f64>,
    x_domain: Option<Extent>,
    y_domain: Option<Extent>,
}

impl Series {
    /// Validates and takes ownership of the two columns.
    ///
    /// `time` must be non-decreasing and as long as `value`.
    pub fn new(time: Vec<f64>, value: Vec<f64>) -> ReduceResult<Self> {
        if time.len() != value.len() {
            return Err(ReduceError::LengthMismatch {
                x_len: time.len(),
                y_len: value.len(),
            });
        }
        // `!(a <= b)` so that NaN timestamps are rejected too.
        if let Some(index) = (1..time.len()).find(|&i| !(time[i - 1] <= time[i])) {
            return Err(ReduceError::Unsorted { index });
        }
        if time.first().is_some_and(|t| t.is_nan()) {
            return Err(ReduceError::Unsorted { index: 0 });
        }

        let x_domain = match (time.first(), time.last()) {
            (Some(&first), Some(&last)) => Some(Extent::new(first, last)),
            _ => None,
        };
        let y_domain = Extent::of(&value);
        Ok(Self {
            time,
            value,
            x_domain,
            y_domain,
        })
    }

    /// Builds a series from `[[x, y], ...]` pairs.
    pub fn from_pairs(pairs: &[[f64; 2]]) -> ReduceResult<Self> {
        let (time, value) = pairs.iter().map(|&[x, y]| (x, y)).unzip();
        Self::new(time, value)
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn value(&self) -> &[f64] {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn x_domain(&self) -> Option<Extent> {
        self.x_domain
    }

    pub fn y_domain(&self) -> Option<Extent> {
        self.y_domain
    }

    pub fn points(&self) -> Points<'_> {
        Points::Columns {
            x: &self.time,
            y: &self.value,
        }
    }

    /// Points restricted to `range`.
    pub fn slice(&self, range: IndexRange) -> Points<'_> {
        Points::Columns {
            x: range.slice(&self.time),
            y: range.slice(&self.value),
        }
    }

    pub fn find_range(&self, finder: &RangeFinder, xmin: f64, xmax: f64) -> IndexRange {
        finder.find(&self.time, xmin, xmax)
    }

    /// Cursor readout at `query`. Infallible since the series is pre-validated.
    pub fn interpolate(&self, query: f64) -> Option<f64> {
        crate::interpolate::interpolate_by(
            self.len(),
            |i| self.time[i],
            |i| self.value[i],
            query,
        )
    }
}

/// Named series in insertion order.
#[derive(Clone, Debug, Default)]
pub struct SeriesStore {
    series: IndexMap<String, Series>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a series, keeping its original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, series: Series) -> Option<Series> {
        self.series.insert(name.into(), series)
    }

    pub fn remove(&mut self, name: &str) -> Option<Series> {
        self.series.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> ReduceResult<&Series> {
        self.series
            .get(name)
            .ok_or_else(|| ReduceError::UnknownSeries(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.series.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_validation() {
        assert!(matches!(
            Series::new(vec![0.0, 1.0], vec![1.0]),
            Err(ReduceError::LengthMismatch { x_len: 2, y_len: 1 })
        ));
        assert!(matches!(
            Series::new(vec![0.0, 2.0, 1.0], vec![0.0; 3]),
            Err(ReduceError::Unsorted { index: 2 })
        ));
        assert!(matches!(
            Series::new(vec![0.0, f64::NAN], vec![0.0; 2]),
            Err(ReduceError::Unsorted { index: 1 })
        ));
        assert!(Series::new(vec![0.0, 1.0, 1.0, 3.0], vec![0.0; 4]).is_ok());
    }

    #[test]
    fn test_series_domains() {
        let s = Series::new(vec![1.0, 2.0, 4.0], vec![3.0, f64::NAN, -1.0]).unwrap();
        assert_eq!(s.x_domain(), Some(Extent::new(1.0, 4.0)));
        assert_eq!(s.y_domain(), Some(Extent::new(-1.0, 3.0)));

        let empty = Series::new(vec![], vec![]).unwrap();
        assert_eq!(empty.x_domain(), None);
        assert_eq!(empty.y_domain(), None);
    }

    #[test]
    fn test_store_keeps_insertion_order() {
        let mut store = SeriesStore::new();
        store.insert("b", Series::new(vec![0.0], vec![0.0]).unwrap());
        store.insert("a", Series::new(vec![0.0], vec![0.0]).unwrap());
        let names: Vec<&str> = store.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(matches!(store.get("c"), Err(ReduceError::UnknownSeries(_))));
    }
}
