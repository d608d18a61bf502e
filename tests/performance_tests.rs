use chart_reduce::search::RangeFinder;
use chart_reduce::{
    downsample_per_pixel, interpolate, DownsampleConfig, ParallelDownsampler, PixelScale,
    ProgressionDetection,
};
use std::time::Instant;

fn sine(count: usize) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..count).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| (v * 0.01).sin() * 100.0).collect();
    (x, y)
}

#[test]
fn test_range_lookup_performance() {
    let count = 1_000_000;
    let (x, _) = sine(count);

    for detection in [ProgressionDetection::AsObserved, ProgressionDetection::UniformSpacing] {
        let finder = RangeFinder::new(detection);
        let start = Instant::now();
        for i in 0..1000 {
            let lo = (i * 997 % count) as f64;
            let _ = finder.find(&x, lo, lo + 5000.0);
        }
        let avg = start.elapsed() / 1000;
        println!("Average range lookup ({:?}) over {} points: {:?}", detection, count, avg);
        assert!(avg.as_micros() < 200, "Range lookup should be logarithmic or better");
    }
}

#[test]
fn test_interpolation_performance() {
    let (x, y) = sine(1_000_000);

    let start = Instant::now();
    let mut acc = 0.0;
    for i in 0..10_000 {
        acc += interpolate(&x, &y, i as f64 * 99.7).unwrap().unwrap_or(0.0);
    }
    let avg = start.elapsed() / 10_000;
    println!("Average cursor interpolation: {:?} (checksum {})", avg, acc);
    assert!(avg.as_micros() < 100, "Cursor lookup should not scan the series");
}

#[test]
fn test_per_pixel_reduction_performance() {
    let count = 1_000_000;
    let (x, y) = sine(count);
    let scale = PixelScale::new(0.0, (count - 1) as f64, 1920).unwrap();

    let start_serial = Instant::now();
    let serial = downsample_per_pixel((&x[..], &y[..]), &scale).unwrap();
    let duration_serial = start_serial.elapsed();
    println!("Serial reduction of {} points: {:?}", count, duration_serial);

    let reducer = ParallelDownsampler::new(DownsampleConfig::default()).unwrap();
    let start_parallel = Instant::now();
    let parallel = reducer.downsample((&x[..], &y[..]), &scale).unwrap();
    let duration_parallel = start_parallel.elapsed();
    println!("Parallel reduction of {} points: {:?}", count, duration_parallel);

    assert_eq!(serial, parallel);
    assert!(serial.len() <= 2 * 1920);
    assert!(duration_serial.as_millis() < 2000, "1M points should reduce in well under 2s");
    assert!(duration_parallel.as_millis() < 2000);
}
