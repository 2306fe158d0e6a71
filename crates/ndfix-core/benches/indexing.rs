//! Benchmarks for element access and bulk operations.
//!
//! Compares checked coordinate access against peeling and plain iteration,
//! and measures fill and swap on arrays of increasing size.
//!
//! Run with:
//! ```bash
//! cargo bench --bench indexing
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndfix_core::{dims, NDArray};
use std::hint::black_box;

type Cube = NDArray<f64, dims![32, 32, 32]>;

fn cube() -> Box<Cube> {
    Box::new(Cube::from_fn(|offset| offset as f64))
}

/// Benchmark the three ways of visiting every element
fn bench_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("access");
    group.throughput(Throughput::Elements(Cube::LEN as u64));

    let array = cube();

    group.bench_function("at", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..32 {
                for j in 0..32 {
                    for k in 0..32 {
                        if let Ok(v) = array.at(black_box([i, j, k])) {
                            sum += *v;
                        }
                    }
                }
            }
            black_box(sum);
        });
    });

    group.bench_function("peel", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..32 {
                for j in 0..32 {
                    for k in 0..32 {
                        sum += array[black_box(i)][j][k];
                    }
                }
            }
            black_box(sum);
        });
    });

    group.bench_function("iter", |b| {
        b.iter(|| black_box(array.iter().sum::<f64>()));
    });

    group.bench_function("indexed_iter", |b| {
        b.iter(|| {
            let sum: usize = array.indexed_iter().map(|(coords, _)| coords[2]).sum();
            black_box(sum);
        });
    });

    group.finish();
}

/// Benchmark fill for various shapes
fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill");

    let mut small = NDArray::<f64, dims![16, 16]>::default();
    group.throughput(Throughput::Elements(256));
    group.bench_with_input(BenchmarkId::from_parameter("16x16"), &1.5, |b, &v| {
        b.iter(|| small.fill(black_box(v)));
    });

    let mut large = cube();
    group.throughput(Throughput::Elements(Cube::LEN as u64));
    group.bench_with_input(BenchmarkId::from_parameter("32x32x32"), &1.5, |b, &v| {
        b.iter(|| large.fill(black_box(v)));
    });

    group.finish();
}

/// Benchmark element-wise swap of two arrays
fn bench_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap");
    group.throughput(Throughput::Elements(Cube::LEN as u64));

    let mut a = cube();
    let mut b = cube();
    group.bench_function("32x32x32", |bench| {
        bench.iter(|| a.swap(black_box(&mut b)));
    });

    group.finish();
}

criterion_group!(benches, bench_access, bench_fill, bench_swap);
criterion_main!(benches);
