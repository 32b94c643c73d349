//! Batched linear-algebra primitives over observation matrices
//!
//! An observation matrix holds one observation per row (pass a transposed
//! view for column-major data; ndarray transposition is free). Pairwise
//! dot-product matrices are computed with a single gemm call instead of
//! O(n^2) separate dot products, and squared-distance matrices are derived
//! in place from the dot-product Gram matrix via
//! ||x - y||^2 = x'x - 2x'y + y'y.
//!
//! With the `blas` cargo feature the gemm call is routed to the linked
//! BLAS; the default build uses ndarray's pure-Rust backend. Nothing else
//! in the crate depends on which backend is active.

use crate::core::{KernelError, Result};
use ndarray::linalg::general_mat_mul;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, Axis};

/// Per-row squared norms of an observation matrix
pub fn row_norms_sq(x: ArrayView2<f64>) -> Array1<f64> {
    x.map_axis(Axis(1), |row| row.dot(&row))
}

/// Per-column squared norms, for feature-major layouts
pub fn col_norms_sq(x: ArrayView2<f64>) -> Array1<f64> {
    x.map_axis(Axis(0), |col| col.dot(&col))
}

/// Write per-row squared norms into a caller-supplied buffer
///
/// Fails with a dimension mismatch if the buffer length disagrees with the
/// observation count; nothing is written in that case.
pub fn row_norms_sq_into(x: ArrayView2<f64>, mut out: ArrayViewMut1<f64>) -> Result<()> {
    if out.len() != x.nrows() {
        return Err(KernelError::DimensionMismatch {
            expected: x.nrows(),
            actual: out.len(),
        });
    }
    for (dst, row) in out.iter_mut().zip(x.rows()) {
        *dst = row.dot(&row);
    }
    Ok(())
}

/// Symmetric inner-product matrix X·X' via one rank-k matrix product
///
/// The product is numerically symmetric up to round-off; with `symmetrize`
/// the strict lower triangle is overwritten by the upper one so the result
/// is exactly symmetric.
pub fn gram(x: ArrayView2<f64>, symmetrize: bool) -> Array2<f64> {
    let n = x.nrows();
    let mut g = Array2::zeros((n, n));
    general_mat_mul(1.0, &x, &x.t(), 0.0, &mut g);
    if symmetrize {
        mirror_upper(&mut g.view_mut());
    }
    g
}

/// `gram` writing into a caller-owned n×n buffer
pub fn gram_into(x: ArrayView2<f64>, out: &mut Array2<f64>, symmetrize: bool) -> Result<()> {
    let n = x.nrows();
    check_shape(out.dim(), (n, n))?;
    general_mat_mul(1.0, &x, &x.t(), 0.0, out);
    if symmetrize {
        mirror_upper(&mut out.view_mut());
    }
    Ok(())
}

/// General inner-product matrix X·Y' between two observation sets
pub fn gram_xy(x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<Array2<f64>> {
    check_features(x, y)?;
    let mut g = Array2::zeros((x.nrows(), y.nrows()));
    general_mat_mul(1.0, &x, &y.t(), 0.0, &mut g);
    Ok(g)
}

/// `gram_xy` writing into a caller-owned n×m buffer
pub fn gram_xy_into(
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
    out: &mut Array2<f64>,
) -> Result<()> {
    check_features(x, y)?;
    check_shape(out.dim(), (x.nrows(), y.nrows()))?;
    general_mat_mul(1.0, &x, &y.t(), 0.0, out);
    Ok(())
}

/// Convert a symmetric dot-product Gram matrix into squared distances, in place
///
/// `norms` must hold the per-observation squared norms of the matrix the
/// Gram was computed from. The diagonal is set to exactly zero and
/// round-off negatives are clamped.
pub fn squared_distances_in_place(
    g: &mut ArrayViewMut2<f64>,
    norms: ArrayView1<f64>,
    symmetrize: bool,
) -> Result<()> {
    let (n, m) = g.dim();
    check_shape((n, m), (n, n))?;
    if norms.len() != n {
        return Err(KernelError::DimensionMismatch {
            expected: n,
            actual: norms.len(),
        });
    }
    for i in 0..n {
        for j in 0..n {
            let d = if i == j {
                0.0
            } else {
                (norms[i] - 2.0 * g[(i, j)] + norms[j]).max(0.0)
            };
            g[(i, j)] = d;
        }
    }
    if symmetrize {
        mirror_upper(g);
    }
    Ok(())
}

/// Convert an asymmetric dot-product matrix into squared distances, in place
///
/// Row and column norms are indexed independently; their lengths must match
/// the corresponding matrix dimensions.
pub fn squared_distances_xy_in_place(
    g: &mut ArrayViewMut2<f64>,
    row_norms: ArrayView1<f64>,
    col_norms: ArrayView1<f64>,
) -> Result<()> {
    let (n, m) = g.dim();
    if row_norms.len() != n {
        return Err(KernelError::DimensionMismatch {
            expected: n,
            actual: row_norms.len(),
        });
    }
    if col_norms.len() != m {
        return Err(KernelError::DimensionMismatch {
            expected: m,
            actual: col_norms.len(),
        });
    }
    for i in 0..n {
        for j in 0..m {
            g[(i, j)] = (row_norms[i] - 2.0 * g[(i, j)] + col_norms[j]).max(0.0);
        }
    }
    Ok(())
}

/// Copy the strict upper triangle over the strict lower triangle
fn mirror_upper(g: &mut ArrayViewMut2<f64>) {
    let n = g.nrows();
    for i in 1..n {
        for j in 0..i {
            g[(i, j)] = g[(j, i)];
        }
    }
}

fn check_features(x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<()> {
    if x.ncols() != y.ncols() {
        return Err(KernelError::DimensionMismatch {
            expected: x.ncols(),
            actual: y.ncols(),
        });
    }
    Ok(())
}

pub(crate) fn check_shape(actual: (usize, usize), expected: (usize, usize)) -> Result<()> {
    if actual.0 != expected.0 {
        return Err(KernelError::DimensionMismatch {
            expected: expected.0,
            actual: actual.0,
        });
    }
    if actual.1 != expected.1 {
        return Err(KernelError::DimensionMismatch {
            expected: expected.1,
            actual: actual.1,
        });
    }
    Ok(())
}
