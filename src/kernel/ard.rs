//! ARD (automatic relevance determination) kernel wrapper
//!
//! Wraps a scalar-transform primitive and substitutes the weighted batch
//! statistic for the unweighted one: the dot product becomes
//! Σ wᵢ²xᵢyᵢ and the squared distance Σ wᵢ²(xᵢ-yᵢ)², one non-negative
//! weight per input dimension. Everything else — the transform κ and its
//! derivatives — comes from the wrapped kernel.
//!
//! The weight vector length is fixed at construction and checked against
//! the input dimensionality on every call, since the data dimensionality
//! is unknown until data arrives.

use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::traits::{Kernel, ScalarKernel};
use crate::vector;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// ARD wrapper: per-dimension weighting of the statistic feeding a primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArdKernel<K> {
    weights: Array1<f64>,
    kernel: K,
}

impl<K: ScalarKernel> ArdKernel<K> {
    /// Create a new ARD kernel
    ///
    /// # Arguments
    /// * `kernel` - The scalar-transform primitive to wrap
    /// * `weights` - One non-negative weight per input dimension
    ///
    /// # Errors
    /// Returns a construction-domain error if the weight vector is empty or
    /// contains a negative or non-finite entry
    pub fn new(kernel: K, weights: Array1<f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(KernelError::invalid_parameter("weights", "must be non-empty"));
        }
        if let Some(w) = weights.iter().find(|w| !(**w >= 0.0 && w.is_finite())) {
            return Err(KernelError::invalid_parameter(
                "weights",
                format!("must be non-negative, got {}", w),
            ));
        }
        Ok(Self { weights, kernel })
    }

    /// Get the weight vector
    pub fn weights(&self) -> ArrayView1<f64> {
        self.weights.view()
    }

    /// Get the wrapped kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Weighted statistic for a pair of vectors
    fn statistic(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        match self.kernel.statistic() {
            Statistic::DotProduct => vector::dot_weighted(x, y, self.weights.view()),
            Statistic::SquaredDistance => vector::sqdist_weighted(x, y, self.weights.view()),
        }
    }

    /// Gradient of k(x, y) with respect to the weight vector
    pub fn grad_weights(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
        let z = self.statistic(x, y)?;
        let d1 = self.kernel.kappa_d1(z);
        let dz_dw = match self.kernel.statistic() {
            Statistic::DotProduct => vector::dot_grad_w(x, y, self.weights.view())?,
            Statistic::SquaredDistance => vector::sqdist_grad_w(x, y, self.weights.view())?,
        };
        Ok(dz_dw.mapv(|v| d1 * v))
    }
}

impl<K: ScalarKernel> Kernel for ArdKernel<K> {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        Ok(self.kernel.kappa(self.statistic(x, y)?))
    }

    fn grad_x(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
        let z = self.statistic(x, y)?;
        let d1 = self.kernel.kappa_d1(z);
        let dz_dx = match self.kernel.statistic() {
            Statistic::DotProduct => vector::dot_weighted_grad_x(x, y, self.weights.view())?,
            Statistic::SquaredDistance => {
                vector::sqdist_weighted_grad_x(x, y, self.weights.view())?
            }
        };
        Ok(dz_dx.mapv(|v| d1 * v))
    }

    fn grad_xy(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array2<f64>> {
        let z = self.statistic(x, y)?;
        let d1 = self.kernel.kappa_d1(z);
        let d2 = self.kernel.kappa_d2(z);
        let w = self.weights.view();
        let (dz_dx, dz_dy) = match self.kernel.statistic() {
            Statistic::DotProduct => (
                vector::dot_weighted_grad_x(x, y, w)?,
                vector::dot_weighted_grad_x(y, x, w)?,
            ),
            Statistic::SquaredDistance => (
                vector::sqdist_weighted_grad_x(x, y, w)?,
                vector::sqdist_weighted_grad_x(y, x, w)?,
            ),
        };
        // κ''·(∂z/∂x)(∂z/∂y)ᵀ + κ'·∂²z/∂x∂y, the latter being ±diag(w²)
        let mut m = crate::kernel::outer_scaled(d2, dz_dx.view(), dz_dy.view());
        let diag_sign = match self.kernel.statistic() {
            Statistic::DotProduct => 1.0,
            Statistic::SquaredDistance => -2.0,
        };
        for i in 0..self.weights.len() {
            m[(i, i)] += d1 * diag_sign * self.weights[i] * self.weights[i];
        }
        Ok(m)
    }

    fn param_names(&self) -> Vec<String> {
        let mut names: Vec<String> = (0..self.weights.len())
            .map(|i| format!("weights[{}]", i))
            .collect();
        names.extend(self.kernel.scalar_params().iter().map(|s| s.to_string()));
        names
    }

    fn grad_param(&self, param: &str, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        if let Some(idx) = parse_weight_slot(param) {
            if idx >= self.weights.len() {
                return Err(KernelError::UnrecognizedParameter(param.to_string()));
            }
            return Ok(self.grad_weights(x, y)?[idx]);
        }
        let z = self.statistic(x, y)?;
        self.kernel.kappa_dp(param, z)
    }

    fn is_psd(&self) -> bool {
        self.kernel.scalar_psd()
    }

    fn describe(&self) -> KernelDescription {
        KernelDescription {
            name: "ARD",
            params: self
                .weights
                .iter()
                .enumerate()
                .map(|(i, &w)| (format!("weights[{}]", i), w))
                .collect(),
            children: vec![self.kernel.scalar_describe()],
        }
    }
}

/// Parse a "weights[i]" parameter slot name
fn parse_weight_slot(param: &str) -> Option<usize> {
    param
        .strip_prefix("weights[")?
        .strip_suffix(']')?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{GaussianKernel, LinearKernel};
    use approx::assert_relative_eq;
    use ndarray::{array, Array1};

    #[test]
    fn test_ard_creation() {
        let ard = ArdKernel::new(GaussianKernel::unit(), array![1.0, 0.5]).unwrap();
        assert_eq!(ard.weights().len(), 2);

        assert!(ArdKernel::new(GaussianKernel::unit(), array![1.0, -0.5]).is_err());
        assert!(ArdKernel::new(GaussianKernel::unit(), Array1::zeros(0)).is_err());
        assert!(ArdKernel::new(GaussianKernel::unit(), array![f64::NAN]).is_err());
    }

    #[test]
    fn test_ard_unit_weights_match_unweighted() {
        let base = GaussianKernel::new(0.7).unwrap();
        let ard = ArdKernel::new(base, array![1.0, 1.0, 1.0]).unwrap();
        let x = array![1.0, -0.5, 2.0];
        let y = array![0.0, 0.3, 1.0];
        assert_relative_eq!(
            ard.compute(x.view(), y.view()).unwrap(),
            base.compute(x.view(), y.view()).unwrap()
        );
        let ga = ard.grad_x(x.view(), y.view()).unwrap();
        let gb = base.grad_x(x.view(), y.view()).unwrap();
        for i in 0..3 {
            assert_relative_eq!(ga[i], gb[i]);
        }
    }

    #[test]
    fn test_ard_zero_weight_drops_dimension() {
        let ard = ArdKernel::new(LinearKernel::plain(), array![1.0, 0.0]).unwrap();
        let x = array![2.0, 100.0];
        let y = array![3.0, -50.0];
        // second dimension is masked out
        assert_relative_eq!(ard.compute(x.view(), y.view()).unwrap(), 6.0);
    }

    #[test]
    fn test_ard_dimension_checked_per_call() {
        let ard = ArdKernel::new(GaussianKernel::unit(), array![1.0, 1.0]).unwrap();
        let x = array![1.0, 2.0, 3.0];
        let y = array![1.0, 2.0, 3.0];
        assert!(matches!(
            ard.compute(x.view(), y.view()),
            Err(KernelError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_ard_param_names_flattening() {
        let ard = ArdKernel::new(GaussianKernel::unit(), array![1.0, 2.0]).unwrap();
        assert_eq!(
            ard.param_names(),
            vec!["weights[0]", "weights[1]", "alpha"]
        );
    }

    #[test]
    fn test_ard_grad_weights_finite_difference() {
        let base = GaussianKernel::new(0.4).unwrap();
        let weights = array![0.8, 1.2];
        let ard = ArdKernel::new(base, weights.clone()).unwrap();
        let x = array![1.0, -0.5];
        let y = array![0.2, 0.9];
        let h = 1e-6;
        let grad = ard.grad_weights(x.view(), y.view()).unwrap();
        for i in 0..2 {
            let mut wp = weights.clone();
            let mut wm = weights.clone();
            wp[i] += h;
            wm[i] -= h;
            let kp = ArdKernel::new(base, wp).unwrap();
            let km = ArdKernel::new(base, wm).unwrap();
            let fd = (kp.compute(x.view(), y.view()).unwrap()
                - km.compute(x.view(), y.view()).unwrap())
                / (2.0 * h);
            assert_relative_eq!(grad[i], fd, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_ard_weight_slot_addressing() {
        let ard = ArdKernel::new(GaussianKernel::unit(), array![0.5, 1.5]).unwrap();
        let x = array![1.0, 0.0];
        let y = array![0.0, 1.0];
        let full = ard.grad_weights(x.view(), y.view()).unwrap();
        assert_relative_eq!(
            ard.grad_param("weights[0]", x.view(), y.view()).unwrap(),
            full[0]
        );
        assert_relative_eq!(
            ard.grad_param_index(1, x.view(), y.view()).unwrap(),
            full[1]
        );
        assert!(ard.grad_param("weights[5]", x.view(), y.view()).is_err());
        assert!(ard.grad_param("nope", x.view(), y.view()).is_err());
    }

    #[test]
    fn test_ard_falls_back_to_pairwise() {
        let ard = ArdKernel::new(GaussianKernel::unit(), array![1.0, 1.0]).unwrap();
        assert!(ard.reduction().is_none());
    }
}
