// Generation benchmark - measure partition generation and the full pipeline
//
// Single-partition numbers isolate field generation cost; the pipeline group
// shows how fan-out across blocking workers scales.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rsfake_core::PartitionGenerator;
use rsfake_pipeline::WorkerPool;

const ROWS: u64 = 20_000;

/// Benchmark one context generating a whole partition
fn bench_single_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_partition");

    for size in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut generator = PartitionGenerator::with_fake_fields();
                black_box(generator.generate(size).unwrap());
            });
        });
    }

    group.finish();
}

/// Benchmark the worker pool at different worker counts
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    group.throughput(Throughput::Elements(ROWS));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();

    for workers in [1usize, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(workers),
            &workers,
            |b, &workers| {
                let pool = WorkerPool::with_fake_fields(1000);
                b.iter(|| black_box(runtime.block_on(pool.generate(ROWS, workers)).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_partition, bench_pipeline);
criterion_main!(benches);
