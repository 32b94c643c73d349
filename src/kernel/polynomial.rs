//! Polynomial kernel implementation
//!
//! The polynomial kernel is defined as:
//! K(x, y) = (a * <x, y> + c)^d
//!
//! Where:
//! - a: scaling factor for the dot product
//! - c: independent term in the polynomial
//! - d (degree): degree of the polynomial
//!
//! Common configurations:
//! - Quadratic kernel: d=2, a=1, c=1
//! - Cubic kernel: d=3, a=1, c=1
//!
//! The degree is a structural integer: it selects the polynomial family and
//! is not part of the differentiable parameter list.

use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::traits::ScalarKernel;
use serde::{Deserialize, Serialize};

/// Polynomial kernel with configurable degree, scale, and offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolynomialKernel {
    a: f64,
    c: f64,
    degree: u32,
}

impl PolynomialKernel {
    /// Create a new polynomial kernel
    ///
    /// # Arguments
    /// * `degree` - Degree of the polynomial (must be > 0)
    /// * `a` - Scaling factor for the dot product (must be positive)
    /// * `c` - Independent term (must be non-negative)
    ///
    /// # Errors
    /// Returns a construction-domain error when a parameter lies outside
    /// its valid domain
    pub fn new(degree: u32, a: f64, c: f64) -> Result<Self> {
        if degree == 0 {
            return Err(KernelError::invalid_parameter("degree", "must be positive"));
        }
        if !(a > 0.0 && a.is_finite()) {
            return Err(KernelError::invalid_parameter(
                "a",
                format!("must be positive, got {}", a),
            ));
        }
        if !(c >= 0.0 && c.is_finite()) {
            return Err(KernelError::invalid_parameter(
                "c",
                format!("must be non-negative, got {}", c),
            ));
        }
        Ok(Self { a, c, degree })
    }

    /// Quadratic kernel: (a * <x,y> + 1)²
    pub fn quadratic(a: f64) -> Result<Self> {
        Self::new(2, a, 1.0)
    }

    /// Cubic kernel: (a * <x,y> + 1)³
    pub fn cubic(a: f64) -> Result<Self> {
        Self::new(3, a, 1.0)
    }

    /// Get the scale parameter
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Get the offset parameter
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Get the polynomial degree
    pub fn degree(&self) -> u32 {
        self.degree
    }
}

impl ScalarKernel for PolynomialKernel {
    fn statistic(&self) -> Statistic {
        Statistic::DotProduct
    }

    fn kappa(&self, z: f64) -> f64 {
        (self.a * z + self.c).powi(self.degree as i32)
    }

    fn kappa_d1(&self, z: f64) -> f64 {
        let d = self.degree as f64;
        d * self.a * (self.a * z + self.c).powi(self.degree as i32 - 1)
    }

    fn kappa_d2(&self, z: f64) -> f64 {
        if self.degree < 2 {
            return 0.0;
        }
        let d = self.degree as f64;
        d * (d - 1.0) * self.a * self.a * (self.a * z + self.c).powi(self.degree as i32 - 2)
    }

    fn scalar_params(&self) -> &'static [&'static str] {
        &["a", "c"]
    }

    fn kappa_dp(&self, param: &str, z: f64) -> Result<f64> {
        let d = self.degree as f64;
        let base = (self.a * z + self.c).powi(self.degree as i32 - 1);
        match param {
            "a" => Ok(d * z * base),
            "c" => Ok(d * base),
            _ => Err(KernelError::UnrecognizedParameter(param.to_string())),
        }
    }

    fn scalar_psd(&self) -> bool {
        true
    }

    fn scalar_describe(&self) -> KernelDescription {
        KernelDescription::leaf(
            "Polynomial",
            vec![
                ("a".to_string(), self.a),
                ("c".to_string(), self.c),
                ("degree".to_string(), self.degree as f64),
            ],
        )
    }
}

crate::kernel::impl_kernel_via_scalar!(PolynomialKernel);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Kernel;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_polynomial_creation() {
        let kernel = PolynomialKernel::new(3, 0.5, 1.0).unwrap();
        assert_eq!(kernel.degree(), 3);
        assert_eq!(kernel.a(), 0.5);
        assert_eq!(kernel.c(), 1.0);

        assert_eq!(PolynomialKernel::quadratic(1.0).unwrap().degree(), 2);
        assert_eq!(PolynomialKernel::cubic(1.0).unwrap().degree(), 3);
    }

    #[test]
    fn test_polynomial_invalid_parameters() {
        assert!(PolynomialKernel::new(0, 1.0, 1.0).is_err());
        assert!(PolynomialKernel::new(2, 0.0, 1.0).is_err());
        assert!(PolynomialKernel::new(2, -1.0, 1.0).is_err());
        assert!(PolynomialKernel::new(2, 1.0, -1.0).is_err());
    }

    #[test]
    fn test_polynomial_known_values() {
        let kernel = PolynomialKernel::quadratic(1.0).unwrap();
        let x = array![1.0, 1.0];
        let y = array![2.0, 2.0];
        // (<x,y> + 1)^2 = 25
        assert_relative_eq!(kernel.compute(x.view(), y.view()).unwrap(), 25.0);
    }

    #[test]
    fn test_polynomial_degree_one_matches_linear() {
        let poly = PolynomialKernel::new(1, 2.0, 0.5).unwrap();
        let linear = crate::kernel::LinearKernel::new(2.0, 0.5).unwrap();
        let x = array![1.0, -3.0, 2.0];
        let y = array![0.5, 1.0, -1.0];
        assert_relative_eq!(
            poly.compute(x.view(), y.view()).unwrap(),
            linear.compute(x.view(), y.view()).unwrap()
        );
    }

    #[test]
    fn test_polynomial_gradient_finite_difference() {
        let kernel = PolynomialKernel::new(3, 0.7, 1.2).unwrap();
        let x = array![0.4, -0.9];
        let y = array![1.1, 0.3];
        let h = 1e-6;
        let grad = kernel.grad_x(x.view(), y.view()).unwrap();
        for i in 0..2 {
            let mut xp = x.clone();
            let mut xm = x.clone();
            xp[i] += h;
            xm[i] -= h;
            let fd = (kernel.compute(xp.view(), y.view()).unwrap()
                - kernel.compute(xm.view(), y.view()).unwrap())
                / (2.0 * h);
            assert_relative_eq!(grad[i], fd, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_polynomial_param_gradients() {
        let kernel = PolynomialKernel::quadratic(1.0).unwrap();
        let x = array![1.0, 0.0];
        let y = array![2.0, 0.0];
        // z = 2: dk/da = 2 z (z + 1) = 12, dk/dc = 2 (z + 1) = 6
        assert_relative_eq!(kernel.grad_param("a", x.view(), y.view()).unwrap(), 12.0);
        assert_relative_eq!(kernel.grad_param("c", x.view(), y.view()).unwrap(), 6.0);
        assert!(matches!(
            kernel.grad_param("degree", x.view(), y.view()),
            Err(KernelError::UnrecognizedParameter(_))
        ));
    }
}
