use chart_reduce::decimation::{
    downsample_parallel, partition_requests, run_worker, CancellationToken, ParallelDownsampler,
    WorkerPayload, WorkerRequest,
};
use chart_reduce::{downsample_per_pixel, DownsampleConfig, PixelScale, Points, ReduceError};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_walk(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut t = 0.0;
    let mut v = 0.0;
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for _ in 0..n {
        t += rng.random_range(0.0..2.0);
        v += rng.random_range(-1.0..1.0);
        x.push(t);
        y.push(v);
    }
    (x, y)
}

fn reducer(max_workers: usize) -> ParallelDownsampler {
    ParallelDownsampler::new(DownsampleConfig {
        max_workers: Some(max_workers),
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_parallel_matches_serial_columns() {
    let (x, y) = random_walk(200_000, 7);
    let scale = PixelScale::new(x[1000], x[150_000], 1920).unwrap();
    let serial = downsample_per_pixel((&x[..], &y[..]), &scale).unwrap();

    for workers in [1, 2, 3, 8, 13] {
        let parallel = reducer(workers).downsample((&x[..], &y[..]), &scale).unwrap();
        assert_eq!(parallel, serial, "{workers} workers");
    }
}

#[test]
fn test_parallel_matches_serial_pairs() {
    let (x, y) = random_walk(50_001, 11);
    let pairs: Vec<[f64; 2]> = x.iter().zip(&y).map(|(&a, &b)| [a, b]).collect();
    let scale = PixelScale::new(0.0, x[x.len() - 1], 800).unwrap();

    let serial = downsample_per_pixel(&pairs, &scale).unwrap();
    let parallel = reducer(6).downsample(&pairs, &scale).unwrap();
    assert_eq!(parallel, serial);
}

#[test]
fn test_one_shot_entry_point() {
    let pts: Vec<[f64; 2]> = vec![[0.0, 1.0], [1.0, 5.0], [2.0, 3.0], [3.0, 9.0], [4.0, 2.0]];
    let out = downsample_parallel(&pts, 3, 0.0, 4.0, Some(4)).unwrap();
    let serial = downsample_per_pixel(&pts, &PixelScale::new(0.0, 4.0, 3).unwrap()).unwrap();
    assert_eq!(out, serial);

    assert!(matches!(
        downsample_parallel(&pts, 3, 4.0, 4.0, None),
        Err(ReduceError::InvalidDomain { .. })
    ));
}

#[test]
fn test_more_workers_than_points() {
    let x = [0.0, 1.0, 2.0];
    let y = [3.0, 1.0, 2.0];
    let scale = PixelScale::new(0.0, 2.0, 3).unwrap();
    let config = DownsampleConfig {
        max_workers: Some(16),
        ..Default::default()
    };
    assert_eq!(config.worker_count(x.len()), 3);

    let requests = partition_requests(Points::Columns { x: &x, y: &y }, 16, &scale);
    assert_eq!(requests.len(), 3);

    let out = reducer(16).downsample((&x[..], &y[..]), &scale).unwrap();
    assert_eq!(out, downsample_per_pixel((&x[..], &y[..]), &scale).unwrap());
}

#[test]
fn test_partition_is_disjoint_and_complete() {
    let (x, y) = random_walk(1003, 3);
    let scale = PixelScale::new(0.0, 10.0, 10).unwrap();
    let requests = partition_requests(Points::Columns { x: &x, y: &y }, 4, &scale);

    assert_eq!(requests.len(), 4);
    let mut rebuilt_x = Vec::new();
    let mut rebuilt_y = Vec::new();
    for r in &requests {
        assert_eq!(r.width, 10);
        match r.payload {
            WorkerPayload::Columns { chunk, time_chunk } => {
                assert_eq!(chunk.len(), time_chunk.len());
                rebuilt_x.extend_from_slice(time_chunk);
                rebuilt_y.extend_from_slice(chunk);
            }
            WorkerPayload::Interleaved(_) => panic!("column input must stay in column form"),
        }
    }
    assert_eq!(rebuilt_x, x);
    assert_eq!(rebuilt_y, y);
}

#[test]
fn test_worker_response_layout() {
    let buf = [0.0, 5.0, 0.4, -1.0, 2.0, 7.0];
    let response = run_worker(&WorkerRequest {
        payload: WorkerPayload::Interleaved(&buf),
        width: 3,
        x0: 0.0,
        x1: 2.0,
    })
    .unwrap();

    assert_eq!(
        response.buckets,
        vec![-1.0, 5.0, f64::INFINITY, f64::NEG_INFINITY, 7.0, 7.0]
    );
}

#[test]
fn test_worker_column_payload() {
    let time = [0.0, 1.0, 2.0];
    let values = [4.0, 6.0, 5.0];
    let response = run_worker(&WorkerRequest {
        payload: WorkerPayload::Columns {
            chunk: &values,
            time_chunk: &time,
        },
        width: 2,
        x0: 0.0,
        x1: 2.0,
    })
    .unwrap();
    // round(1.0 * 0.5) rounds half up into column 1.
    assert_eq!(response.buckets, vec![4.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_cancelled_before_dispatch() {
    let (x, y) = random_walk(10_000, 5);
    let scale = PixelScale::new(0.0, 100.0, 100).unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let err = reducer(4)
        .downsample_with_cancel((&x[..], &y[..]), &scale, &token)
        .unwrap_err();
    assert!(matches!(err, ReduceError::Cancelled));
}

#[test]
fn test_zero_timeout_fails_instead_of_returning_partial() {
    let (x, y) = random_walk(100_000, 9);
    let scale = PixelScale::new(0.0, 1000.0, 500).unwrap();
    let reducer = ParallelDownsampler::new(DownsampleConfig {
        max_workers: Some(4),
        worker_timeout_ms: Some(0),
        ..Default::default()
    })
    .unwrap();

    let err = reducer.downsample((&x[..], &y[..]), &scale).unwrap_err();
    assert!(matches!(err, ReduceError::TimedOut { .. }), "got {err:?}");
}

#[test]
fn test_empty_input_parallel() {
    let scale = PixelScale::new(0.0, 1.0, 10).unwrap();
    let x: [f64; 0] = [];
    let out = reducer(4).downsample((&x[..], &x[..]), &scale).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_pool_reused_across_calls() {
    let reducer = reducer(3);
    let scale = PixelScale::new(0.0, 50.0, 64).unwrap();
    for seed in 0..5 {
        let (x, y) = random_walk(5_000, seed);
        let expected = downsample_per_pixel((&x[..], &y[..]), &scale).unwrap();
        assert_eq!(reducer.downsample((&x[..], &y[..]), &scale).unwrap(), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_parallel_equals_serial(
        ys in prop::collection::vec(-1e6f64..1e6, 0..2000),
        width in 2usize..400,
        workers in 1usize..12,
        span in 1.0f64..5000.0,
        offset in -100.0f64..100.0,
    ) {
        let x: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
        let scale = PixelScale::new(offset, offset + span, width).unwrap();

        let serial = downsample_per_pixel((&x[..], &ys[..]), &scale).unwrap();
        let parallel = reducer(workers).downsample((&x[..], &ys[..]), &scale).unwrap();
        prop_assert_eq!(parallel, serial);
    }
}
