//! Throughput of both scoring strategies
//!
//! Run with: cargo bench --bench scoring_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sentra_core::{ScoreFormatter, Scorers, ScoringMethod};
use std::hint::black_box;

fn generate_review(size: usize) -> String {
    let base = "The service was not great, but the food was REALLY good and I loved it! ";
    let mut text = base.repeat(size / base.len() + 1);
    text.truncate(size);
    text
}

fn bench_scorers(c: &mut Criterion) {
    let mut group = c.benchmark_group("scorers");
    let scorers = Scorers::builtin().unwrap();

    for size in [256, 4_096, 65_536] {
        let text = generate_review(size);
        group.throughput(Throughput::Bytes(size as u64));

        for method in ScoringMethod::ALL {
            group.bench_with_input(BenchmarkId::new(method.as_str(), size), &text, |b, text| {
                b.iter(|| scorers.get(method).score(black_box(text)));
            });
        }
    }

    group.finish();
}

fn bench_format_round_trip(c: &mut Criterion) {
    let scorers = Scorers::builtin().unwrap();
    let formatter = ScoreFormatter::new();
    let result = scorers.get(ScoringMethod::RuleBased).score("I love this!");

    c.bench_function("format_round_trip", |b| {
        b.iter(|| formatter.format(black_box(&result)).round_trip().unwrap());
    });
}

criterion_group!(benches, bench_scorers, bench_format_round_trip);
criterion_main!(benches);
