//! Benchmarks comparing batched and pairwise Gram-matrix assembly

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mercer::{kernel_matrix, GaussianKernel, Kernel, LinearKernel, PolynomialKernel};
use ndarray::Array2;

fn observation_matrix(n: usize, d: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, d), |(i, j)| ((i * d + j) % 17) as f64 * 0.25 - 2.0)
}

/// Reference implementation: one `compute` call per pair
fn pairwise_reference<K: Kernel>(kernel: &K, x: &Array2<f64>) -> Array2<f64> {
    let n = x.nrows();
    Array2::from_shape_fn((n, n), |(i, j)| {
        kernel.compute(x.row(i), x.row(j)).unwrap()
    })
}

fn bench_gram_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("gram_assembly");
    let kernel = GaussianKernel::unit();
    for &n in &[32usize, 128, 512] {
        let x = observation_matrix(n, 16);
        group.bench_with_input(BenchmarkId::new("batched", n), &x, |b, x| {
            b.iter(|| kernel_matrix(&kernel, black_box(x.view())).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("pairwise", n), &x, |b, x| {
            b.iter(|| pairwise_reference(&kernel, black_box(x)))
        });
    }
    group.finish();
}

fn bench_kernel_families(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel_families");
    let x = observation_matrix(128, 16);

    let gaussian = GaussianKernel::unit();
    group.bench_function("gaussian_128", |b| {
        b.iter(|| kernel_matrix(&gaussian, black_box(x.view())).unwrap())
    });

    let linear = LinearKernel::plain();
    group.bench_function("linear_128", |b| {
        b.iter(|| kernel_matrix(&linear, black_box(x.view())).unwrap())
    });

    let polynomial = PolynomialKernel::new(3, 0.1, 1.0).unwrap();
    group.bench_function("polynomial_128", |b| {
        b.iter(|| kernel_matrix(&polynomial, black_box(x.view())).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_gram_assembly, bench_kernel_families);
criterion_main!(benches);
