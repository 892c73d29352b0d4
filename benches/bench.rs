use canonical_interval_map::{CanonicalIntervalMap, Interval};
use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

struct IntervalGenerator {
    rng: StdRng,
    limit: u32,
}
impl IntervalGenerator {
    fn new() -> Self {
        const LIMIT: u32 = 100_000;
        Self {
            rng: StdRng::from_seed([0; 32]),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> Interval<u32> {
        let low = self.rng.gen_range(0..=self.limit - 1);
        let high = self.rng.gen_range(low + 1..=(low + 100).min(self.limit));
        Interval::new(low, high)
    }

    fn next_value(&mut self) -> u8 {
        self.rng.gen_range(0..8)
    }
}

// insert helper fn
fn interval_map_insert(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new();
    let intervals: Vec<_> = std::iter::repeat_with(|| (gen.next(), gen.next_value()))
        .take(count)
        .collect();
    bench.iter(|| {
        let map = CanonicalIntervalMap::new(0u8);
        for (i, v) in intervals.clone() {
            black_box(map.insert(i.low, i.high, v));
        }
    });
}

// lookup helper fn
fn interval_map_lookup(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new();
    let map = CanonicalIntervalMap::new(0u8);
    for _ in 0..count {
        black_box(map.assign(gen.next(), gen.next_value())).unwrap();
    }
    let keys: Vec<u32> = std::iter::repeat_with(|| gen.next().low)
        .take(count)
        .collect();
    bench.iter(|| {
        for k in &keys {
            black_box(map.lookup(k));
            black_box(map.range_of(k));
        }
    });
}

fn bench_interval_map_insert(c: &mut Criterion) {
    c.bench_function("bench_interval_map_insert_100", |b| {
        interval_map_insert(100, b)
    });
    c.bench_function("bench_interval_map_insert_1000", |b| {
        interval_map_insert(1000, b)
    });
    c.bench_function("bench_interval_map_insert_10,000", |b| {
        interval_map_insert(10_000, b)
    });
}

fn bench_interval_map_lookup(c: &mut Criterion) {
    c.bench_function("bench_interval_map_lookup_100", |b| {
        interval_map_lookup(100, b)
    });
    c.bench_function("bench_interval_map_lookup_1000", |b| {
        interval_map_lookup(1000, b)
    });
    c.bench_function("bench_interval_map_lookup_10,000", |b| {
        interval_map_lookup(10_000, b)
    });
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_interval_map_insert, bench_interval_map_lookup,
}

criterion_main!(benches_basic_op);
