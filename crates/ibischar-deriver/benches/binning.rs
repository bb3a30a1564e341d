//! Benchmarks for fixed-bin waveform averaging across the IBIS 3.x/4.x row
//! count policies.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ibischar_deriver::bin_waveform;

fn synthetic_transient(samples: usize) -> Vec<(f64, f64)> {
    (0..samples)
        .map(|i| {
            let t = i as f64 * 1e-12;
            (t, 3.3 * (1.0 - (-t / 1e-10).exp()))
        })
        .collect()
}

fn bench_bin_waveform(c: &mut Criterion) {
    let mut group = c.benchmark_group("bin_waveform");

    for n_bins in [100, 1000] {
        let samples = synthetic_transient(5000);
        group.bench_with_input(BenchmarkId::from_parameter(n_bins), &n_bins, |bencher, &n_bins| {
            bencher.iter(|| bin_waveform(black_box(&samples), black_box(1e-9), n_bins).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bin_waveform);
criterion_main!(benches);
