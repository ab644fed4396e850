//! Criterion benchmarks comparing the greedy and constrained routers.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package courier-solver-vrp
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use courier_core::{
    Coordinate, Depot, DistanceMatrix, Fleet, GreedyRouter, Router, RoutingRequest, Stop,
};
use courier_solver_vrp::{VrpRouter, VrpRouterConfig};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic stop generation.
const BENCHMARK_SEED: u64 = 42;

/// Stop counts to benchmark.
const PROBLEM_SIZES: &[usize] = &[10, 25, 50];

/// Central London.
const DEPOT: Coordinate = Coordinate::new(51.5072, -0.1276);

/// Half-width of the delivery area around the depot, in degrees.
const AREA_SPAN: f64 = 0.08;

/// Build a reproducible request with `count` stops of demand 1..=3.
fn build_request(count: usize, seed: u64) -> RoutingRequest {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let stops = (0..count)
        .map(|i| {
            #[expect(clippy::float_arithmetic, reason = "Required for coordinate offset")]
            let location = Coordinate::new(
                DEPOT.lat + rng.gen_range(-AREA_SPAN..AREA_SPAN),
                DEPOT.lng + rng.gen_range(-AREA_SPAN..AREA_SPAN),
            );
            Stop::new(format!("S{i}"), location).with_demand(rng.gen_range(1..=3))
        })
        .collect();
    RoutingRequest::new(Depot::new(DEPOT), stops, Fleet::new(4, 40))
}

fn bench_routers(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_time");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));

    let constrained = VrpRouter::with_config(VrpRouterConfig {
        time_limit: Duration::from_secs(1),
        max_generations: 200,
    });

    for &size in PROBLEM_SIZES {
        let request = build_request(size, BENCHMARK_SEED);
        let matrix = DistanceMatrix::from_points(&request.points());

        #[expect(
            clippy::as_conversions,
            reason = "Safe conversion for small problem sizes"
        )]
        let throughput_size = size as u64;
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(BenchmarkId::new("greedy", size), &size, |b, _| {
            b.iter(|| {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "Benchmarking route performance, result is intentionally discarded"
                )]
                let _ = GreedyRouter.route(&request, &matrix);
            });
        });
        group.bench_with_input(BenchmarkId::new("constrained", size), &size, |b, _| {
            b.iter(|| {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "Benchmarking route performance, result is intentionally discarded"
                )]
                let _ = constrained.route(&request, &matrix);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_routers);
criterion_main!(benches);
