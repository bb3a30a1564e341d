//! Benchmarks for DC sweep parsing across dialects.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ibischar_core::SimulatorKind;
use ibischar_reader::parse_dc;

fn synthetic_hspice_output(rows: usize) -> String {
    let mut text = String::from("v-sweep i(vsupply)\n");
    for i in 0..rows {
        let v = i as f64 * 0.01;
        text.push_str(&format!("{v:e} {:e}\n", v * 1e-3));
    }
    text
}

fn bench_parse_dc(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_dc_hspice");

    for rows in [10, 100, 1000] {
        let text = synthetic_hspice_output(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &text, |bencher, text| {
            bencher.iter(|| parse_dc(SimulatorKind::Hspice, black_box(text)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_dc);
criterion_main!(benches);
