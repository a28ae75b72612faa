//! Concurrent operations benchmarks.
//!
//! Measures inserts and lookups from several threads sharing one filter
//! through `Arc`, where all writers serialize on the filter's lock.

use bloomslot::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::thread;

const FILTER_SIZE: usize = 1 << 20;
const OPS_PER_THREAD: usize = 10_000;
const THREAD_COUNTS: &[usize] = &[1, 2, 4, 8];

fn bench_concurrent_inserts(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_inserts");

    for &threads in THREAD_COUNTS {
        group.throughput(Throughput::Elements((OPS_PER_THREAD * threads) as u64));
        group.bench_with_input(BenchmarkId::new("packed", threads), &threads, |b, &threads| {
            b.iter_batched(
                || Arc::new(PackedBitFilter::new(FILTER_SIZE, 4).unwrap()),
                |filter| {
                    let handles: Vec<_> = (0..threads)
                        .map(|t| {
                            let filter = Arc::clone(&filter);
                            thread::spawn(move || {
                                for i in 0..OPS_PER_THREAD {
                                    let key = (t * OPS_PER_THREAD + i) as u64;
                                    filter.insert(key.to_le_bytes()).unwrap();
                                }
                            })
                        })
                        .collect();
                    for h in handles {
                        h.join().unwrap();
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_concurrent_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_lookups");

    let filter = Arc::new(AlignedByteFilter::new(FILTER_SIZE, 4).unwrap());
    for i in 0..OPS_PER_THREAD as u64 {
        filter.insert(i.to_le_bytes()).unwrap();
    }

    for &threads in THREAD_COUNTS {
        group.throughput(Throughput::Elements((OPS_PER_THREAD * threads) as u64));
        group.bench_with_input(BenchmarkId::new("aligned", threads), &threads, |b, &threads| {
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let filter = Arc::clone(&filter);
                        thread::spawn(move || {
                            for i in 0..OPS_PER_THREAD as u64 {
                                black_box(filter.lookup(i.to_le_bytes()).unwrap());
                            }
                        })
                    })
                    .collect();
                for h in handles {
                    h.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

fn bench_mixed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_read_write");
    group.throughput(Throughput::Elements((OPS_PER_THREAD * 4) as u64));

    group.bench_function("1_writer_3_readers", |b| {
        b.iter_batched(
            || Arc::new(PackedBitFilter::new(FILTER_SIZE, 4).unwrap()),
            |filter| {
                let writer = {
                    let filter = Arc::clone(&filter);
                    thread::spawn(move || {
                        for i in 0..OPS_PER_THREAD as u64 {
                            filter.insert(i.to_le_bytes()).unwrap();
                        }
                    })
                };
                let readers: Vec<_> = (0..3)
                    .map(|_| {
                        let filter = Arc::clone(&filter);
                        thread::spawn(move || {
                            for i in 0..OPS_PER_THREAD as u64 {
                                black_box(filter.lookup(i.to_le_bytes()).unwrap());
                            }
                        })
                    })
                    .collect();
                writer.join().unwrap();
                for r in readers {
                    r.join().unwrap();
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_concurrent_inserts,
    bench_concurrent_lookups,
    bench_mixed_workload
);
criterion_main!(benches);
