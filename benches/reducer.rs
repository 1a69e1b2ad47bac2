//! Reducer and comparator throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ormbench_core::{compare, AggregateStatistics, Scoreboard};
use ormbench_core::{PairedResult, TimedSample};

fn samples(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 7919) % 1000) as f64 / 10.0).collect()
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");
    for n in [10usize, 100, 10_000] {
        let values = samples(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| AggregateStatistics::from_samples(black_box(values)))
        });
    }
    group.finish();
}

fn bench_scoreboard(c: &mut Criterion) {
    let results: Vec<PairedResult> = samples(6)
        .into_iter()
        .zip(samples(12).into_iter().skip(6))
        .map(|(a, b)| PairedResult {
            operation: "op".to_string(),
            side_a: TimedSample { data: serde_json::Value::Null, time_ms: a },
            side_b: TimedSample { data: serde_json::Value::Null, time_ms: b },
            captured_at_ms: 0,
        })
        .collect();

    c.bench_function("compare", |b| b.iter(|| compare(black_box(12.34), black_box(15.0))));
    c.bench_function("scoreboard", |b| b.iter(|| Scoreboard::from_results(black_box(&results))));
}

criterion_group!(benches, bench_reduce, bench_scoreboard);
criterion_main!(benches);
