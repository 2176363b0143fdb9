//! Stack arena benchmarks
//!
//! Compares the arena against the system allocator on short-lived workloads

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use stack_arena::StackArena;
use std::alloc::Layout;
use std::hint::black_box;

const CAPACITY: usize = 64 * 1024;

/// Benchmark single allocation/deallocation cycle
fn bench_single_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_allocation");

    group.bench_function("arena_64b", |b| {
        let arena = StackArena::<CAPACITY, 16>::new();

        b.iter(|| unsafe {
            let ptr = arena.allocate::<8>(black_box(64)).unwrap();
            arena.deallocate(ptr, 64);
            black_box(ptr);
        });
    });

    // System allocator (baseline)
    group.bench_function("system_64b", |b| {
        let layout = Layout::from_size_align(64, 8).unwrap();

        b.iter(|| unsafe {
            let ptr = std::alloc::alloc(layout);
            std::alloc::dealloc(ptr, layout);
            black_box(ptr);
        });
    });

    group.finish();
}

/// Benchmark batch allocations released in one rewind
fn bench_batch_then_rewind(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_then_rewind");

    for count in [10usize, 100, 500] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("marker", count), &count, |b, &count| {
            let mut arena = StackArena::<CAPACITY, 16>::new();

            b.iter(|| {
                let marker = arena.mark();
                for _ in 0..count {
                    black_box(arena.allocate::<8>(black_box(96)).unwrap());
                }
                arena.reset_to_marker(marker);
            });
        });

        group.bench_with_input(BenchmarkId::new("frame", count), &count, |b, &count| {
            let mut arena = StackArena::<CAPACITY, 16>::new();

            b.iter(|| {
                let frame = arena.frame();
                for _ in 0..count {
                    black_box(frame.alloc_bytes(black_box(96)).unwrap());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("system", count), &count, |b, &count| {
            let layout = Layout::from_size_align(96, 8).unwrap();

            b.iter(|| unsafe {
                let mut ptrs = Vec::with_capacity(count);
                for _ in 0..count {
                    ptrs.push(std::alloc::alloc(layout));
                }
                for ptr in ptrs {
                    std::alloc::dealloc(ptr, layout);
                }
            });
        });
    }

    group.finish();
}

/// Benchmark copying request-sized byte strings into the arena
fn bench_alloc_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("alloc_copy");
    let line = b"GET /api/v1/workflows/42/executions?limit=50 HTTP/1.1";
    group.throughput(Throughput::Bytes(line.len() as u64));

    group.bench_function("arena", |b| {
        let mut arena = StackArena::<CAPACITY, 8>::new();

        b.iter(|| {
            let copy = arena.alloc_copy(black_box(line)).unwrap();
            black_box(copy);
            arena.reset();
        });
    });

    group.bench_function("vec", |b| {
        b.iter(|| black_box(black_box(line).to_vec()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_allocation,
    bench_batch_then_rewind,
    bench_alloc_copy
);
criterion_main!(benches);
