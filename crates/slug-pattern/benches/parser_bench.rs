//! Parser benchmarks.
//!
//! Run with: `cargo bench --package slug-pattern`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use slug_pattern::{parse, parse_partial};

const SIMPLE: &str = "{adjective}-{noun}";
const COMPLEX: &str =
    "a {adjective@en:+color -rare <=8,case=title} {noun@en:+animal >3,case=lower}-{number:4x}-{special:2-5} [@en +common]";

fn bench_full_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.throughput(Throughput::Bytes(SIMPLE.len() as u64));
    group.bench_function("simple", |b| b.iter(|| parse(black_box(SIMPLE))));

    group.throughput(Throughput::Bytes(COMPLEX.len() as u64));
    group.bench_function("complex", |b| b.iter(|| parse(black_box(COMPLEX))));

    group.finish();
}

fn bench_partial_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_partial");

    let prefix = &COMPLEX[..COMPLEX.len() / 2];
    group.throughput(Throughput::Bytes(prefix.len() as u64));
    group.bench_function("half_complex", |b| b.iter(|| parse_partial(black_box(prefix))));

    group.bench_function("open_body", |b| b.iter(|| parse_partial(black_box("{noun:+animal "))));

    group.finish();
}

criterion_group!(benches, bench_full_parse, bench_partial_parse);
criterion_main!(benches);
