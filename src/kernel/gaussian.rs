//! Gaussian (RBF) kernel implementation
//!
//! The Gaussian kernel is defined as: K(x, y) = exp(-α * ||x - y||²)
//! where α (alpha) is a positive bandwidth parameter controlling the
//! kernel width.
//!
//! This is one of the most popular kernels for non-linear methods. The
//! alpha parameter controls the "reach" of each observation:
//! - High alpha: only close points are similar (potential overfitting)
//! - Low alpha: distant points stay similar (potential underfitting)
//!
//! Common alpha values:
//! - 1.0 / n_features: good default starting point
//! - Manual tuning based on validation performance

use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::traits::ScalarKernel;
use serde::{Deserialize, Serialize};

/// Gaussian (RBF) kernel: K(x, y) = exp(-α * ||x - y||²)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianKernel {
    alpha: f64,
}

impl GaussianKernel {
    /// Create a new Gaussian kernel with the specified bandwidth parameter
    ///
    /// # Arguments
    /// * `alpha` - The bandwidth parameter (must be positive and finite)
    ///
    /// # Errors
    /// Returns a construction-domain error if alpha is not positive
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha.is_finite()) {
            return Err(KernelError::invalid_parameter(
                "alpha",
                format!("must be positive, got {}", alpha),
            ));
        }
        Ok(Self { alpha })
    }

    /// Create a Gaussian kernel with alpha = 1.0 / n_features
    ///
    /// A common default choice that scales inversely with dimensionality.
    pub fn with_auto_alpha(n_features: usize) -> Result<Self> {
        if n_features == 0 {
            return Err(KernelError::invalid_parameter(
                "n_features",
                "must be positive",
            ));
        }
        Self::new(1.0 / n_features as f64)
    }

    /// Create a Gaussian kernel with alpha = 1.0
    ///
    /// Useful for normalized data where feature variance is around 1.
    pub fn unit() -> Self {
        Self { alpha: 1.0 }
    }

    /// Get the bandwidth parameter
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for GaussianKernel {
    /// Default Gaussian kernel with alpha = 1.0
    fn default() -> Self {
        Self::unit()
    }
}

impl ScalarKernel for GaussianKernel {
    fn statistic(&self) -> Statistic {
        Statistic::SquaredDistance
    }

    fn kappa(&self, z: f64) -> f64 {
        (-self.alpha * z).exp()
    }

    fn kappa_d1(&self, z: f64) -> f64 {
        -self.alpha * (-self.alpha * z).exp()
    }

    fn kappa_d2(&self, z: f64) -> f64 {
        self.alpha * self.alpha * (-self.alpha * z).exp()
    }

    fn scalar_params(&self) -> &'static [&'static str] {
        &["alpha"]
    }

    fn kappa_dp(&self, param: &str, z: f64) -> Result<f64> {
        match param {
            "alpha" => Ok(-z * (-self.alpha * z).exp()),
            _ => Err(KernelError::UnrecognizedParameter(param.to_string())),
        }
    }

    fn scalar_psd(&self) -> bool {
        true
    }

    fn scalar_describe(&self) -> KernelDescription {
        KernelDescription::leaf("Gaussian", vec![("alpha".to_string(), self.alpha)])
    }
}

crate::kernel::impl_kernel_via_scalar!(GaussianKernel);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Kernel;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_gaussian_creation() {
        let kernel = GaussianKernel::new(0.5).unwrap();
        assert_eq!(kernel.alpha(), 0.5);

        let kernel_auto = GaussianKernel::with_auto_alpha(10).unwrap();
        assert_eq!(kernel_auto.alpha(), 0.1);

        assert_eq!(GaussianKernel::unit().alpha(), 1.0);
        assert_eq!(GaussianKernel::default().alpha(), 1.0);
    }

    #[test]
    fn test_gaussian_invalid_alpha() {
        assert!(GaussianKernel::new(-1.0).is_err());
        assert!(GaussianKernel::new(0.0).is_err());
        assert!(GaussianKernel::new(f64::NAN).is_err());
        assert!(GaussianKernel::with_auto_alpha(0).is_err());
    }

    #[test]
    fn test_gaussian_known_values() {
        // alpha=1, x=[0,0], y=[1,0] => squared distance 1, value exp(-1)
        let x = array![0.0, 0.0];
        let y = array![1.0, 0.0];

        let k1 = GaussianKernel::new(1.0).unwrap();
        assert_relative_eq!(k1.compute(x.view(), y.view()).unwrap(), (-1.0f64).exp());

        let k2 = GaussianKernel::new(2.0).unwrap();
        assert_relative_eq!(k2.compute(x.view(), y.view()).unwrap(), (-2.0f64).exp());
    }

    #[test]
    fn test_gaussian_identical_vectors() {
        let kernel = GaussianKernel::unit();
        let x = array![1.0, 2.0, 3.0];
        assert_relative_eq!(kernel.compute(x.view(), x.view()).unwrap(), 1.0);
    }

    #[test]
    fn test_gaussian_symmetry() {
        let kernel = GaussianKernel::new(0.5).unwrap();
        let x = array![1.0, 2.0, 3.0];
        let y = array![0.0, 2.0, -1.0];
        assert_eq!(
            kernel.compute(x.view(), y.view()).unwrap(),
            kernel.compute(y.view(), x.view()).unwrap()
        );
    }

    #[test]
    fn test_gaussian_gradient_x() {
        // grad_x = 2 kappa'(z) (x - y) = -2 alpha exp(-alpha z) (x - y)
        let kernel = GaussianKernel::new(0.5).unwrap();
        let x = array![1.0, 0.0];
        let y = array![0.0, 1.0];
        let z = 2.0_f64;
        let expected_scale = -2.0 * 0.5 * (-0.5 * z).exp();
        let grad = kernel.grad_x(x.view(), y.view()).unwrap();
        assert_relative_eq!(grad[0], expected_scale * 1.0);
        assert_relative_eq!(grad[1], expected_scale * -1.0);
    }

    #[test]
    fn test_gaussian_grad_at_identical_points_is_zero() {
        let kernel = GaussianKernel::unit();
        let x = array![0.3, -0.7];
        let grad = kernel.grad_x(x.view(), x.view()).unwrap();
        assert_eq!(grad, array![0.0, 0.0]);
    }

    #[test]
    fn test_gaussian_param_gradient() {
        let kernel = GaussianKernel::new(1.5).unwrap();
        let x = array![0.0, 0.0];
        let y = array![2.0, 0.0];
        // dk/dalpha = -z exp(-alpha z), z = 4
        assert_relative_eq!(
            kernel.grad_param("alpha", x.view(), y.view()).unwrap(),
            -4.0 * (-6.0f64).exp()
        );
        assert!(kernel.grad_param("gamma", x.view(), y.view()).is_err());
    }

    #[test]
    fn test_gaussian_numerical_stability() {
        let kernel = GaussianKernel::new(1e-6).unwrap();
        let x = array![1e6];
        let y = array![-1e6];
        let value = kernel.compute(x.view(), y.view()).unwrap();
        assert!(value.is_finite());
        assert!((0.0..=1.0).contains(&value));
    }
}
