//! Pan/zoom refresh: range lookup, extent, and reduction for every series of
//! a chart in one pass.

use tracing::trace;

use crate::config::DownsampleConfig;
use crate::data_types::{DataBounds, Point, SeriesStore};
use crate::decimation::{
    downsample_per_pixel, downsample_quick_points, CancellationToken, ParallelDownsampler,
};
use crate::error::ReduceResult;
use crate::extent::visible_extent;
use crate::scales::PixelScale;
use crate::search::{IndexRange, RangeFinder};

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesFrame {
    pub name: String,
    /// Indices of the series that were fed to the reducer.
    pub range: IndexRange,
    pub points: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewFrame {
    pub scale: PixelScale,
    pub series: Vec<SeriesFrame>,
    /// Extents of the visible points, for y-axis autoscale.
    pub bounds: Option<DataBounds>,
}

impl ViewFrame {
    pub fn get(&self, name: &str) -> Option<&SeriesFrame> {
        self.series.iter().find(|s| s.name == name)
    }
}

/// Owns the range finder and worker pool a chart view reuses across refreshes.
pub struct ViewReducer {
    finder: RangeFinder,
    parallel: ParallelDownsampler,
}

impl ViewReducer {
    pub fn new(config: DownsampleConfig) -> ReduceResult<Self> {
        Ok(Self {
            finder: RangeFinder::new(config.progression),
            parallel: ParallelDownsampler::new(config)?,
        })
    }

    pub fn finder(&self) -> &RangeFinder {
        &self.finder
    }

    pub fn config(&self) -> &DownsampleConfig {
        self.parallel.config()
    }

    pub fn refresh(
        &self,
        store: &SeriesStore,
        x0: f64,
        x1: f64,
        width: usize,
    ) -> ReduceResult<ViewFrame> {
        self.refresh_with_cancel(store, x0, x1, width, &CancellationToken::new())
    }

    /// Full per-pixel reduction of every series over `[x0, x1]`.
    ///
    /// Series whose visible range reaches `parallel_threshold` points go
    /// through the worker pool; the rest are reduced inline.
    pub fn refresh_with_cancel(
        &self,
        store: &SeriesStore,
        x0: f64,
        x1: f64,
        width: usize,
        token: &CancellationToken,
    ) -> ReduceResult<ViewFrame> {
        let scale = PixelScale::new(x0, x1, width)?;
        let threshold = self.config().parallel_threshold;

        let mut series = Vec::with_capacity(store.len());
        for (name, data) in store.iter() {
            let range = data.find_range(&self.finder, x0, x1);
            let points = if range.len() >= threshold {
                self.parallel
                    .downsample_with_cancel(data.slice(range), &scale, token)?
            } else {
                downsample_per_pixel(data.slice(range), &scale)?
            };
            trace!(series = name, visible = range.len(), reduced = points.len(), "view refresh");
            series.push(SeriesFrame {
                name: name.to_string(),
                range,
                points,
            });
        }

        Ok(ViewFrame {
            scale,
            series,
            bounds: visible_extent(store, &self.finder, x0, x1),
        })
    }

    /// Strided preview of the same window, drawn while `refresh` runs.
    pub fn preview(
        &self,
        store: &SeriesStore,
        x0: f64,
        x1: f64,
        width: usize,
    ) -> ReduceResult<ViewFrame> {
        let scale = PixelScale::new(x0, x1, width)?;
        let mut series = Vec::with_capacity(store.len());
        for (name, data) in store.iter() {
            let range = data.find_range(&self.finder, x0, x1);
            series.push(SeriesFrame {
                name: name.to_string(),
                range,
                points: downsample_quick_points(data.slice(range), width)?,
            });
        }
        Ok(ViewFrame {
            scale,
            series,
            bounds: visible_extent(store, &self.finder, x0, x1),
        })
    }

    /// Interpolated value of every series at `x`, for a crosshair tooltip.
    pub fn cursor(&self, store: &SeriesStore, x: f64) -> Vec<(String, Option<f64>)> {
        store
            .iter()
            .map(|(name, data)| (name.to_string(), data.interpolate(x)))
            .collect()
    }
}
