//! Sigmoid (hyperbolic tangent) kernel implementation
//!
//! The sigmoid kernel is defined as:
//! K(x, y) = tanh(a * <x, y> + c)
//!
//! It mimics the activation of a neural network layer and is one of the
//! classic kernels that is NOT positive semi-definite for general
//! parameter values; `is_psd` reports false accordingly.

use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::traits::ScalarKernel;
use serde::{Deserialize, Serialize};

/// Sigmoid kernel: K(x, y) = tanh(a * <x, y> + c)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SigmoidKernel {
    /// Scaling parameter for the dot product (must be positive)
    a: f64,
    /// Bias/offset parameter (must be non-negative)
    c: f64,
}

impl SigmoidKernel {
    /// Create a new sigmoid kernel
    ///
    /// # Arguments
    /// * `a` - Scaling parameter for the dot product (must be positive)
    /// * `c` - Bias parameter (must be non-negative)
    pub fn new(a: f64, c: f64) -> Result<Self> {
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
        Ok(Self { a, c })
    }

    /// Sigmoid kernel with a = 1/n_features and c = 1, a common default
    pub fn with_auto_scale(n_features: usize) -> Result<Self> {
        if n_features == 0 {
            return Err(KernelError::invalid_parameter(
                "n_features",
                "must be positive",
            ));
        }
        Self::new(1.0 / n_features as f64, 1.0)
    }

    /// Get the scale parameter
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Get the bias parameter
    pub fn c(&self) -> f64 {
        self.c
    }
}

impl ScalarKernel for SigmoidKernel {
    fn statistic(&self) -> Statistic {
        Statistic::DotProduct
    }

    fn kappa(&self, z: f64) -> f64 {
        (self.a * z + self.c).tanh()
    }

    fn kappa_d1(&self, z: f64) -> f64 {
        let t = (self.a * z + self.c).tanh();
        self.a * (1.0 - t * t)
    }

    fn kappa_d2(&self, z: f64) -> f64 {
        let t = (self.a * z + self.c).tanh();
        -2.0 * self.a * self.a * t * (1.0 - t * t)
    }

    fn scalar_params(&self) -> &'static [&'static str] {
        &["a", "c"]
    }

    fn kappa_dp(&self, param: &str, z: f64) -> Result<f64> {
        let t = (self.a * z + self.c).tanh();
        let sech2 = 1.0 - t * t;
        match param {
            "a" => Ok(z * sech2),
            "c" => Ok(sech2),
            _ => Err(KernelError::UnrecognizedParameter(param.to_string())),
        }
    }

    fn scalar_psd(&self) -> bool {
        false
    }

    fn scalar_describe(&self) -> KernelDescription {
        KernelDescription::leaf(
            "Sigmoid",
            vec![("a".to_string(), self.a), ("c".to_string(), self.c)],
        )
    }
}

crate::kernel::impl_kernel_via_scalar!(SigmoidKernel);
