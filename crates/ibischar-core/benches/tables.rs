//! Benchmarks for V/I table decimation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ibischar_core::tables::{ViRow, ViTable};

fn bench_decimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("vi_table_capped");

    for size in [100, 1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, &size| {
            let rows: Vec<ViRow> = (0..size)
                .map(|i| ViRow {
                    v: i as f64 * 1e-3,
                    i_typ: Some(i as f64),
                    i_min: Some(i as f64 * 0.9),
                    i_max: Some(i as f64 * 1.1),
                })
                .collect();

            bencher.iter(|| ViTable::capped(black_box(rows.clone())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decimate);
criterion_main!(benches);
