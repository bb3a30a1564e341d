//! Benchmarks for adaptive sweep sizing.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ibischar_planner::adaptive_sweep;

fn bench_adaptive_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("adaptive_sweep");

    for vmax in [1.0, 1.8, 3.3, 5.0, 12.0] {
        group.bench_with_input(BenchmarkId::from_parameter(vmax), &vmax, |bencher, &vmax| {
            bencher.iter(|| adaptive_sweep(black_box(-vmax), black_box(2.0 * vmax)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_adaptive_sweep);
criterion_main!(benches);
