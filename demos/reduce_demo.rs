//! Reduces a million-point synthetic signal to a 1200px chart, the way a
//! pan/zoom handler would, and prints what each stage produced.
//!
//! RUST_LOG=chart_reduce=debug cargo run --example reduce_demo

use std::time::Instant;

use chart_reduce::{DownsampleConfig, Series, SeriesStore, ViewReducer};
use eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let n = 1_000_000;
    let time: Vec<f64> = (0..n).map(|i| i as f64 * 1e-3).collect();
    let value: Vec<f64> = time
        .iter()
        .map(|t| (t * 3.0).sin() * 10.0 + (t * 97.0).cos())
        .collect();
    let noise: Vec<f64> = time.iter().map(|t| (t * 1337.0).sin() * 0.5).collect();

    let mut store = SeriesStore::new();
    store.insert(
        "signal",
        Series::new(time.clone(), value).wrap_err("building signal series")?,
    );
    store.insert(
        "noise",
        Series::new(time, noise).wrap_err("building noise series")?,
    );

    let config = DownsampleConfig::from_json_str(r#"{ "parallel_threshold": 50000 }"#)?;
    let reducer = ViewReducer::new(config)?;
    let (x0, x1, width) = (100.0, 700.0, 1200);

    let start = Instant::now();
    let preview = reducer.preview(&store, x0, x1, width)?;
    println!("preview in {:?}", start.elapsed());
    for s in &preview.series {
        println!("  {:<8} {:>7} visible -> {:>5} strided", s.name, s.range.len(), s.points.len());
    }

    let start = Instant::now();
    let frame = reducer.refresh(&store, x0, x1, width)?;
    println!("refresh in {:?}", start.elapsed());
    for s in &frame.series {
        println!("  {:<8} {:>7} visible -> {:>5} envelope", s.name, s.range.len(), s.points.len());
    }
    if let Some(bounds) = frame.bounds {
        println!("  y-extent [{:.3}, {:.3}]", bounds.y.min, bounds.y.max);
    }

    for (name, y) in reducer.cursor(&store, 400.0005) {
        println!("  cursor {name} = {y:?}");
    }
    Ok(())
}
