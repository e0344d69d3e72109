//! Benchmarks for the masking hot path.
//!
//! Run with: cargo bench -p maskform-core --bench mask_bench

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use maskform_core::{EditDelta, MaskEngine, PatternSet};

const PATTERNS: &[(&str, &str)] = &[
    ("tax_id", "###.###.###-##"),
    ("company_id", "##.###.###/####-##"),
    ("cellphone", "(##) #####-####"),
];

fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask/type_full");
    for &(name, pattern) in PATTERNS {
        let set = PatternSet::single(pattern, '#').unwrap();
        let digits: String = "12345678901234".chars().take(set.declared().capacity()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(name), &digits, |b, digits| {
            b.iter(|| {
                let mut engine = MaskEngine::new(set.clone());
                let mut buf = String::new();
                for ch in digits.chars() {
                    let delta = EditDelta::insert(&buf, buf.chars().count(), &ch.to_string());
                    buf = engine.apply(&delta).text;
                }
                black_box(buf)
            });
        });
    }
    group.finish();
}

fn bench_backspace(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask/backspace_drain");
    for &(name, pattern) in PATTERNS {
        let set = PatternSet::single(pattern, '#').unwrap();
        let full = MaskEngine::new(set.clone()).format("12345678901234");
        group.bench_with_input(BenchmarkId::from_parameter(name), &full, |b, full| {
            b.iter(|| {
                let mut engine = MaskEngine::new(set.clone());
                let mut buf = full.clone();
                while !buf.is_empty() {
                    buf = engine.apply(&EditDelta::backspace(&buf)).text;
                }
                black_box(buf)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_typing, bench_backspace);
criterion_main!(benches);
