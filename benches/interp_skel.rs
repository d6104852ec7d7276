//! Benchmarks for skeleton construction on model problems

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use interp_skel::{SkeletonBuilder, SkeletonConfig, SparseMatrixCSC, StopPolicy};
use ndarray::Array1;
use std::hint::black_box;
use std::time::Duration;

/// 5-point Laplacian on an `m x m` grid in CSC format
fn create_laplacian_2d(m: usize) -> SparseMatrixCSC<f64> {
    let n = m * m;
    let mut col_ptr = Vec::with_capacity(n + 1);
    let mut row_idx = Vec::with_capacity(5 * n);
    let mut values = Vec::with_capacity(5 * n);

    col_ptr.push(0);
    for j in 0..n {
        let (x, y) = (j % m, j / m);
        if y > 0 {
            row_idx.push(j - m);
            values.push(-1.0);
        }
        if x > 0 {
            row_idx.push(j - 1);
            values.push(-1.0);
        }
        row_idx.push(j);
        values.push(4.0);
        if x + 1 < m {
            row_idx.push(j + 1);
            values.push(-1.0);
        }
        if y + 1 < m {
            row_idx.push(j + m);
            values.push(-1.0);
        }
        col_ptr.push(row_idx.len());
    }

    SparseMatrixCSC::new(n, n, col_ptr, row_idx, values)
}

/// Right-hand sides for a coarse grid of every `stride`-th point in each direction
fn create_coarse_rhs(a: &SparseMatrixCSC<f64>, m: usize, stride: usize) -> SparseMatrixCSC<f64> {
    let mut col_ptr = vec![0];
    let mut row_idx = Vec::new();
    let mut values = Vec::new();

    for y in (0..m).step_by(stride) {
        for x in (0..m).step_by(stride) {
            let c = y * m + x;
            for (i, &v) in a.col_iter(c) {
                if i != c {
                    row_idx.push(i);
                    values.push(-v);
                }
            }
            col_ptr.push(row_idx.len());
        }
    }

    let n_cols = col_ptr.len() - 1;
    SparseMatrixCSC::new(a.n_rows, n_cols, col_ptr, row_idx, values)
}

fn bench_grid_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("laplacian_2d");
    group.sample_size(20);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));

    for m in [16, 32, 64] {
        let a = create_laplacian_2d(m);
        let b = create_coarse_rhs(&a, m, 2);
        let d = a.diagonal();
        let u = Array1::from_elem(b.n_cols, 1.0);
        group.throughput(Throughput::Elements(b.n_cols as u64));

        for policy in [StopPolicy::SumNormalized, StopPolicy::MaxNormalized] {
            let config = SkeletonConfig::with_tolerance(0.1).with_stop_policy(policy);
            let mut builder = match SkeletonBuilder::new(&a, d.view(), config) {
                Ok(builder) => builder,
                Err(err) => panic!("benchmark setup failed: {}", err),
            };

            group.bench_function(BenchmarkId::new(format!("{:?}", policy), m), |bencher| {
                bencher.iter(|| {
                    let _result = builder.build(black_box(&b), black_box(u.view()));
                });
            });
        }
    }

    group.finish();
}

fn bench_tolerance(c: &mut Criterion) {
    let mut group = c.benchmark_group("tolerance");
    group.sample_size(20);

    let m = 32;
    let a = create_laplacian_2d(m);
    let b = create_coarse_rhs(&a, m, 2);
    let d = a.diagonal();
    let u = Array1::from_elem(b.n_cols, 1.0);

    for tol in [0.5, 0.1, 0.02] {
        let config = SkeletonConfig::with_tolerance(tol);
        let mut builder = match SkeletonBuilder::new(&a, d.view(), config) {
            Ok(builder) => builder,
            Err(err) => panic!("benchmark setup failed: {}", err),
        };

        group.bench_with_input(BenchmarkId::from_parameter(tol), &tol, |bencher, _| {
            bencher.iter(|| {
                let _result = builder.build(black_box(&b), black_box(u.view()));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grid_sizes, bench_tolerance);
criterion_main!(benches);
