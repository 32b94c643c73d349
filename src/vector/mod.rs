//! Pairwise vector primitives
//!
//! Scalar product and squared Euclidean distance between two dense vectors,
//! optionally weighted per dimension, together with their gradients. These
//! are the statistics every scalar-transform kernel is built on.
//!
//! Weighted variants square the weights: `dot_weighted` computes
//! sum(w_i^2 * x_i * y_i) and `sqdist_weighted` computes
//! sum(w_i^2 * (x_i - y_i)^2), so a weight vector acts like a per-dimension
//! rescaling of the inputs.

use crate::core::{KernelError, Result};
use ndarray::{Array1, ArrayView1};

/// Validate that two vectors have equal, nonzero length
fn check_pair(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<()> {
    if x.is_empty() || y.is_empty() {
        return Err(KernelError::EmptyInput);
    }
    if x.len() != y.len() {
        return Err(KernelError::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok(())
}

/// Validate a weight vector against the input dimensionality
fn check_weights(x: ArrayView1<f64>, w: ArrayView1<f64>) -> Result<()> {
    if w.len() != x.len() {
        return Err(KernelError::DimensionMismatch {
            expected: x.len(),
            actual: w.len(),
        });
    }
    Ok(())
}

/// Euclidean inner product <x, y>
pub fn dot(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
    check_pair(x, y)?;
    Ok(x.dot(&y))
}

/// Weighted inner product sum(w_i^2 * x_i * y_i)
pub fn dot_weighted(x: ArrayView1<f64>, y: ArrayView1<f64>, w: ArrayView1<f64>) -> Result<f64> {
    check_pair(x, y)?;
    check_weights(x, w)?;
    Ok(x.iter()
        .zip(y.iter())
        .zip(w.iter())
        .map(|((&xi, &yi), &wi)| wi * wi * xi * yi)
        .sum())
}

/// Squared Euclidean distance sum((x_i - y_i)^2)
pub fn sqdist(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
    check_pair(x, y)?;
    Ok(x.iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - yi) * (xi - yi))
        .sum())
}

/// Weighted squared distance sum(w_i^2 * (x_i - y_i)^2)
pub fn sqdist_weighted(x: ArrayView1<f64>, y: ArrayView1<f64>, w: ArrayView1<f64>) -> Result<f64> {
    check_pair(x, y)?;
    check_weights(x, w)?;
    Ok(x.iter()
        .zip(y.iter())
        .zip(w.iter())
        .map(|((&xi, &yi), &wi)| wi * wi * (xi - yi) * (xi - yi))
        .sum())
}

/// Gradient of `dot` with respect to x: y
pub fn dot_grad_x(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
    check_pair(x, y)?;
    Ok(y.to_owned())
}

/// Gradient of `dot_weighted` with respect to x: w^2 ⊙ y
pub fn dot_weighted_grad_x(
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    w: ArrayView1<f64>,
) -> Result<Array1<f64>> {
    check_pair(x, y)?;
    check_weights(x, w)?;
    Ok(y.iter()
        .zip(w.iter())
        .map(|(&yi, &wi)| wi * wi * yi)
        .collect())
}

/// Gradient of `dot_weighted` with respect to w: 2w ⊙ x ⊙ y
pub fn dot_grad_w(
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    w: ArrayView1<f64>,
) -> Result<Array1<f64>> {
    check_pair(x, y)?;
    check_weights(x, w)?;
    Ok(x.iter()
        .zip(y.iter())
        .zip(w.iter())
        .map(|((&xi, &yi), &wi)| 2.0 * wi * xi * yi)
        .collect())
}

/// Gradient of `sqdist` with respect to x: 2(x - y)
pub fn sqdist_grad_x(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
    check_pair(x, y)?;
    Ok(x.iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| 2.0 * (xi - yi))
        .collect())
}

/// Gradient of `sqdist_weighted` with respect to x: 2w^2 ⊙ (x - y)
pub fn sqdist_weighted_grad_x(
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    w: ArrayView1<f64>,
) -> Result<Array1<f64>> {
    check_pair(x, y)?;
    check_weights(x, w)?;
    Ok(x.iter()
        .zip(y.iter())
        .zip(w.iter())
        .map(|((&xi, &yi), &wi)| 2.0 * wi * wi * (xi - yi))
        .collect())
}

/// Gradient of `sqdist_weighted` with respect to w: 2w ⊙ (x - y)^2
pub fn sqdist_grad_w(
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    w: ArrayView1<f64>,
) -> Result<Array1<f64>> {
    check_pair(x, y)?;
    check_weights(x, w)?;
    Ok(x.iter()
        .zip(y.iter())
        .zip(w.iter())
        .map(|((&xi, &yi), &wi)| 2.0 * wi * (xi - yi) * (xi - yi))
        .collect())
}
