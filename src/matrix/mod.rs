//! Gram-matrix engine
//!
//! Assembles matrices of kernel values (and derivatives) over one or two
//! observation sets. When a kernel reports that it is a pointwise transform
//! of a single batch statistic, the statistic matrix is computed once with
//! the batched primitives from [`crate::batch`] and the transform is mapped
//! over it; otherwise the engine falls back to pairwise evaluation, using
//! symmetry to halve the work in the one-matrix case.
//!
//! In-place variants validate the output shape before anything is written,
//! so a shape mismatch never leaves a partially overwritten buffer.

use crate::batch;
use crate::core::{KernelError, Result, Statistic};
use crate::kernel::Kernel;
use log::debug;
use ndarray::{s, Array2, Array3, Array4, ArrayView2};

/// Symmetric kernel matrix of all pairs from one observation set
pub fn kernel_matrix<K: Kernel + ?Sized>(k: &K, x: ArrayView2<f64>) -> Result<Array2<f64>> {
    let n = x.nrows();
    let mut out = Array2::zeros((n, n));
    fill_symmetric(k, x, &mut out)?;
    Ok(out)
}

/// `kernel_matrix` writing into a caller-owned n×n buffer
pub fn kernel_matrix_into<K: Kernel + ?Sized>(
    k: &K,
    x: ArrayView2<f64>,
    out: &mut Array2<f64>,
) -> Result<()> {
    batch::check_shape(out.dim(), (x.nrows(), x.nrows()))?;
    fill_symmetric(k, x, out)
}

/// Kernel matrix between two observation sets, no symmetrization
pub fn kernel_matrix_xy<K: Kernel + ?Sized>(
    k: &K,
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
) -> Result<Array2<f64>> {
    let mut out = Array2::zeros((x.nrows(), y.nrows()));
    fill_general(k, x, y, &mut out)?;
    Ok(out)
}

/// `kernel_matrix_xy` writing into a caller-owned n×m buffer
pub fn kernel_matrix_xy_into<K: Kernel + ?Sized>(
    k: &K,
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
    out: &mut Array2<f64>,
) -> Result<()> {
    batch::check_shape(out.dim(), (x.nrows(), y.nrows()))?;
    fill_general(k, x, y, out)
}

/// Per-pair gradient with respect to x, as an (n, m, d) array
pub fn kernel_matrix_dx<K: Kernel + ?Sized>(
    k: &K,
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
) -> Result<Array3<f64>> {
    check_pairwise_inputs(x, y)?;
    let (n, m, d) = (x.nrows(), y.nrows(), x.ncols());
    let mut out = Array3::zeros((n, m, d));
    for i in 0..n {
        for j in 0..m {
            let g = k.grad_x(x.row(i), y.row(j))?;
            out.slice_mut(s![i, j, ..]).assign(&g);
        }
    }
    Ok(out)
}

/// Per-pair gradient with respect to y, as an (n, m, d) array
pub fn kernel_matrix_dy<K: Kernel + ?Sized>(
    k: &K,
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
) -> Result<Array3<f64>> {
    check_pairwise_inputs(x, y)?;
    let (n, m, d) = (x.nrows(), y.nrows(), x.ncols());
    let mut out = Array3::zeros((n, m, d));
    for i in 0..n {
        for j in 0..m {
            let g = k.grad_y(x.row(i), y.row(j))?;
            out.slice_mut(s![i, j, ..]).assign(&g);
        }
    }
    Ok(out)
}

/// Per-pair derivative with respect to a named parameter path
pub fn kernel_matrix_dp<K: Kernel + ?Sized>(
    k: &K,
    param: &str,
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
) -> Result<Array2<f64>> {
    check_pairwise_inputs(x, y)?;
    let (n, m) = (x.nrows(), y.nrows());
    let mut out = Array2::zeros((n, m));
    for i in 0..n {
        for j in 0..m {
            out[(i, j)] = k.grad_param(param, x.row(i), y.row(j))?;
        }
    }
    Ok(out)
}

/// Per-pair derivative with respect to the index-th flattened parameter
///
/// The index is resolved against the flattened parameter ordering once, up
/// front, so an out-of-range index fails before any computation.
pub fn kernel_matrix_dp_index<K: Kernel + ?Sized>(
    k: &K,
    index: usize,
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
) -> Result<Array2<f64>> {
    let names = k.param_names();
    let name = names
        .get(index)
        .ok_or(KernelError::ParameterIndexOutOfRange {
            index,
            count: names.len(),
        })?;
    kernel_matrix_dp(k, name, x, y)
}

/// Per-pair mixed second derivative, as an (n, m, d, d) array
pub fn kernel_matrix_dxdy<K: Kernel + ?Sized>(
    k: &K,
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
) -> Result<Array4<f64>> {
    check_pairwise_inputs(x, y)?;
    let (n, m, d) = (x.nrows(), y.nrows(), x.ncols());
    let mut out = Array4::zeros((n, m, d, d));
    for i in 0..n {
        for j in 0..m {
            let h = k.grad_xy(x.row(i), y.row(j))?;
            out.slice_mut(s![i, j, .., ..]).assign(&h);
        }
    }
    Ok(out)
}

fn fill_symmetric<K: Kernel + ?Sized>(
    k: &K,
    x: ArrayView2<f64>,
    out: &mut Array2<f64>,
) -> Result<()> {
    if x.ncols() == 0 {
        return Err(KernelError::EmptyInput);
    }
    let n = x.nrows();
    match k.reduction() {
        Some(Statistic::DotProduct) => {
            debug!("assembling {}x{} kernel matrix via batched dot-product path", n, n);
            batch::gram_into(x, out, true)?;
            out.mapv_inplace(|z| k.transform(z));
        }
        Some(Statistic::SquaredDistance) => {
            debug!(
                "assembling {}x{} kernel matrix via batched squared-distance path",
                n, n
            );
            batch::gram_into(x, out, false)?;
            let norms = batch::row_norms_sq(x);
            batch::squared_distances_in_place(&mut out.view_mut(), norms.view(), true)?;
            out.mapv_inplace(|z| k.transform(z));
        }
        None => {
            debug!("assembling {}x{} kernel matrix via pairwise evaluation", n, n);
            for i in 0..n {
                for j in i..n {
                    let v = k.compute(x.row(i), x.row(j))?;
                    out[(i, j)] = v;
                    out[(j, i)] = v;
                }
            }
        }
    }
    Ok(())
}

fn fill_general<K: Kernel + ?Sized>(
    k: &K,
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
    out: &mut Array2<f64>,
) -> Result<()> {
    check_pairwise_inputs(x, y)?;
    let (n, m) = (x.nrows(), y.nrows());
    match k.reduction() {
        Some(Statistic::DotProduct) => {
            debug!("assembling {}x{} kernel matrix via batched dot-product path", n, m);
            batch::gram_xy_into(x, y, out)?;
            out.mapv_inplace(|z| k.transform(z));
        }
        Some(Statistic::SquaredDistance) => {
            debug!(
                "assembling {}x{} kernel matrix via batched squared-distance path",
                n, m
            );
            batch::gram_xy_into(x, y, out)?;
            let row_norms = batch::row_norms_sq(x);
            let col_norms = batch::row_norms_sq(y);
            batch::squared_distances_xy_in_place(
                &mut out.view_mut(),
                row_norms.view(),
                col_norms.view(),
            )?;
            out.mapv_inplace(|z| k.transform(z));
        }
        None => {
            debug!("assembling {}x{} kernel matrix via pairwise evaluation", n, m);
            for i in 0..n {
                for j in 0..m {
                    out[(i, j)] = k.compute(x.row(i), y.row(j))?;
                }
            }
        }
    }
    Ok(())
}

fn check_pairwise_inputs(x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<()> {
    if x.ncols() == 0 || y.ncols() == 0 {
        return Err(KernelError::EmptyInput);
    }
    if x.ncols() != y.ncols() {
        return Err(KernelError::DimensionMismatch {
            expected: x.ncols(),
            actual: y.ncols(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{ProductKernel, ScaledKernel, SumKernel};
    use crate::kernel::{ArdKernel, GaussianKernel, LinearKernel, MercerSigmoidKernel};
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    fn sample_data() -> Array2<f64> {
        array![
            [0.0, 0.0],
            [1.0, 0.0],
            [0.5, -1.5],
            [2.0, 1.0],
        ]
    }

    #[test]
    fn test_linear_kernel_matrix_identity() {
        let x = array![[1.0, 0.0], [0.0, 1.0]];
        let km = kernel_matrix(&LinearKernel::plain(), x.view()).unwrap();
        assert_eq!(km, array![[1.0, 0.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_batch_path_agrees_with_pairwise_gaussian() {
        let k = GaussianKernel::new(0.7).unwrap();
        let x = sample_data();
        let km = kernel_matrix(&k, x.view()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = k.compute(x.row(i), x.row(j)).unwrap();
                assert_relative_eq!(km[(i, j)], expected, max_relative = 1e-10);
            }
        }
    }

    #[test]
    fn test_batch_path_agrees_with_pairwise_composite() {
        // Scaled(2, Gaussian) keeps the squared-distance reduction
        let k = ScaledKernel::new(2.0, GaussianKernel::new(0.3).unwrap()).unwrap();
        assert_eq!(k.reduction(), Some(Statistic::SquaredDistance));
        let x = sample_data();
        let km = kernel_matrix(&k, x.view()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = k.compute(x.row(i), x.row(j)).unwrap();
                assert_relative_eq!(km[(i, j)], expected, max_relative = 1e-10);
            }
        }
    }

    #[test]
    fn test_pairwise_fallback_matches_direct_evaluation() {
        // mixed-statistic sum forces the fallback
        let k = SumKernel::new(
            1.0,
            GaussianKernel::unit(),
            1.0,
            LinearKernel::plain(),
        )
        .unwrap();
        assert_eq!(k.reduction(), None);
        let x = sample_data();
        let km = kernel_matrix(&k, x.view()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = k.compute(x.row(i), x.row(j)).unwrap();
                assert_relative_eq!(km[(i, j)], expected, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_kernel_matrix_symmetry() {
        let k = ProductKernel::new(
            1.5,
            GaussianKernel::new(0.4).unwrap(),
            GaussianKernel::new(1.1).unwrap(),
        )
        .unwrap();
        let x = sample_data();
        let km = kernel_matrix(&k, x.view()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(km[(i, j)], km[(j, i)]);
            }
        }
    }

    #[test]
    fn test_kernel_matrix_xy() {
        let k = GaussianKernel::new(0.9).unwrap();
        let x = sample_data();
        let y = array![[1.0, 1.0], [-0.5, 0.5], [0.0, 2.0]];
        let km = kernel_matrix_xy(&k, x.view(), y.view()).unwrap();
        assert_eq!(km.dim(), (4, 3));
        for i in 0..4 {
            for j in 0..3 {
                let expected = k.compute(x.row(i), y.row(j)).unwrap();
                assert_relative_eq!(km[(i, j)], expected, max_relative = 1e-10);
            }
        }
    }

    #[test]
    fn test_kernel_matrix_xy_feature_mismatch() {
        let k = GaussianKernel::unit();
        let x = array![[1.0, 0.0]];
        let y = array![[1.0, 0.0, 2.0]];
        assert!(matches!(
            kernel_matrix_xy(&k, x.view(), y.view()),
            Err(KernelError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_in_place_shape_validation_is_all_or_nothing() {
        let k = GaussianKernel::unit();
        let x = sample_data();
        let mut wrong = Array2::from_elem((3, 4), 7.0);
        assert!(matches!(
            kernel_matrix_into(&k, x.view(), &mut wrong),
            Err(KernelError::DimensionMismatch { .. })
        ));
        // buffer untouched on failure
        assert!(wrong.iter().all(|&v| v == 7.0));

        let mut out = Array2::zeros((4, 4));
        kernel_matrix_into(&k, x.view(), &mut out).unwrap();
        assert_relative_eq!(out[(0, 0)], 1.0);
    }

    #[test]
    fn test_ard_kernel_uses_fallback() {
        let ard = ArdKernel::new(GaussianKernel::unit(), array![1.0, 0.5]).unwrap();
        let x = sample_data();
        let km = kernel_matrix(&ard, x.view()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = ard.compute(x.row(i), x.row(j)).unwrap();
                assert_relative_eq!(km[(i, j)], expected, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_separable_kernel_matrix() {
        let k = MercerSigmoidKernel::default();
        let x = sample_data();
        let km = kernel_matrix(&k, x.view()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = k.compute(x.row(i), x.row(j)).unwrap();
                assert_relative_eq!(km[(i, j)], expected, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_kernel_matrix_dx_matches_per_pair_gradient() {
        let k = GaussianKernel::new(0.6).unwrap();
        let x = sample_data();
        let y = array![[1.0, 1.0], [-0.5, 0.5]];
        let dx = kernel_matrix_dx(&k, x.view(), y.view()).unwrap();
        assert_eq!(dx.dim(), (4, 2, 2));
        for i in 0..4 {
            for j in 0..2 {
                let g = k.grad_x(x.row(i), y.row(j)).unwrap();
                for l in 0..2 {
                    assert_relative_eq!(dx[(i, j, l)], g[l]);
                }
            }
        }
    }

    #[test]
    fn test_kernel_matrix_dy_is_dx_transposed_for_symmetric_kernel() {
        let k = GaussianKernel::new(0.6).unwrap();
        let x = sample_data();
        let dy = kernel_matrix_dy(&k, x.view(), x.view()).unwrap();
        let dx = kernel_matrix_dx(&k, x.view(), x.view()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                for l in 0..2 {
                    assert_relative_eq!(dy[(i, j, l)], dx[(j, i, l)]);
                }
            }
        }
    }

    #[test]
    fn test_kernel_matrix_dp() {
        let k = ScaledKernel::new(2.5, GaussianKernel::unit()).unwrap();
        let x = sample_data();
        let dp = kernel_matrix_dp(&k, "a", x.view(), x.view()).unwrap();
        let child = GaussianKernel::unit();
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(dp[(i, j)], child.compute(x.row(i), x.row(j)).unwrap());
            }
        }

        // index 0 is "a" in the flattened ordering
        let dp0 = kernel_matrix_dp_index(&k, 0, x.view(), x.view()).unwrap();
        assert_eq!(dp, dp0);

        assert!(matches!(
            kernel_matrix_dp_index(&k, 9, x.view(), x.view()),
            Err(KernelError::ParameterIndexOutOfRange { index: 9, count: 2 })
        ));
        assert!(matches!(
            kernel_matrix_dp(&k, "nope", x.view(), x.view()),
            Err(KernelError::UnrecognizedParameter(_))
        ));
    }

    #[test]
    fn test_kernel_matrix_dxdy_shape_and_values() {
        let k = GaussianKernel::new(0.8).unwrap();
        let x = array![[0.0, 0.0], [1.0, -1.0]];
        let dxdy = kernel_matrix_dxdy(&k, x.view(), x.view()).unwrap();
        assert_eq!(dxdy.dim(), (2, 2, 2, 2));
        for i in 0..2 {
            for j in 0..2 {
                let h = k.grad_xy(x.row(i), x.row(j)).unwrap();
                for p in 0..2 {
                    for q in 0..2 {
                        assert_relative_eq!(dxdy[(i, j, p, q)], h[(p, q)]);
                    }
                }
            }
        }
    }
}
