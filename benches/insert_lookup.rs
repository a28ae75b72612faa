//! Single-threaded insert and lookup benchmarks.
//!
//! # Scenarios
//!
//! 1. **By layout**: packed bits vs aligned bytes at the same size
//! 2. **By hash count**: cost of each extra digest
//! 3. **Synced vs unsynced**: lock overhead with no contention
//! 4. **Lookup hit vs miss**: misses stop at the first clear slot

use bloomslot::{AlignedByteFilter, Filter, PackedBitFilter, SlotStore};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const SIZES: &[usize] = &[1 << 12, 1 << 16, 1 << 20, 1 << 24];
const HASH_COUNTS: &[u32] = &[1, 2, 4, 7, 10];

fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("key-{i:08}-{:016x}", i.wrapping_mul(0x9E37_79B9))).collect()
}

fn insert_by_layout<S: SlotStore>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("insert_{name}"));
    let items = keys(10_000);

    for &size in SIZES {
        group.throughput(Throughput::Elements(items.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let filter = Filter::<S>::new(size, 4).unwrap();
            b.iter(|| {
                for item in &items {
                    filter.insert(black_box(item)).unwrap();
                }
            });
        });
    }

    group.finish();
}

fn bench_insert_packed(c: &mut Criterion) {
    insert_by_layout::<bloomslot::PackedBits>(c, "packed");
}

fn bench_insert_aligned(c: &mut Criterion) {
    insert_by_layout::<bloomslot::AlignedBytes>(c, "aligned");
}

fn bench_insert_by_hash_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_by_hash_count");
    let items = keys(10_000);

    for &k in HASH_COUNTS {
        group.throughput(Throughput::Elements(items.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            let filter = PackedBitFilter::new(1 << 20, k).unwrap();
            b.iter(|| {
                for item in &items {
                    filter.insert(black_box(item)).unwrap();
                }
            });
        });
    }

    group.finish();
}

fn bench_synced_vs_unsynced(c: &mut Criterion) {
    let mut group = c.benchmark_group("synced_vs_unsynced");
    let items = keys(10_000);
    group.throughput(Throughput::Elements(items.len() as u64));

    group.bench_function("insert_synced", |b| {
        let filter = AlignedByteFilter::new(1 << 20, 4).unwrap();
        b.iter(|| {
            for item in &items {
                filter.insert(black_box(item)).unwrap();
            }
        });
    });

    group.bench_function("insert_unsynced", |b| {
        let mut filter = AlignedByteFilter::new(1 << 20, 4).unwrap();
        b.iter(|| {
            for item in &items {
                filter.insert_unsynced(black_box(item)).unwrap();
            }
        });
    });

    group.bench_function("insert_batch", |b| {
        let filter = AlignedByteFilter::new(1 << 20, 4).unwrap();
        b.iter(|| filter.insert_batch(black_box(&items)).unwrap());
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let present = keys(10_000);
    let absent: Vec<String> = (0..10_000).map(|i| format!("missing-{i}")).collect();

    let filter = PackedBitFilter::new(1 << 20, 4).unwrap();
    filter.insert_batch(&present).unwrap();

    group.throughput(Throughput::Elements(present.len() as u64));
    group.bench_function("hit", |b| {
        b.iter(|| {
            for item in &present {
                black_box(filter.lookup(black_box(item)).unwrap());
            }
        });
    });
    group.bench_function("miss", |b| {
        b.iter(|| {
            for item in &absent {
                black_box(filter.lookup(black_box(item)).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_packed,
    bench_insert_aligned,
    bench_insert_by_hash_count,
    bench_synced_vs_unsynced,
    bench_lookup
);
criterion_main!(benches);
