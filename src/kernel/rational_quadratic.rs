//! Rational quadratic kernel implementation
//!
//! K(x, y) = (1 + α * ||x - y||²)^(-β). Behaves like a scale mixture of
//! Gaussian kernels; as β → ∞ with α = γ/β it approaches a Gaussian.

use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::traits::ScalarKernel;
use serde::{Deserialize, Serialize};

/// Rational quadratic kernel: K(x, y) = (1 + α * ||x - y||²)^(-β)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RationalQuadraticKernel {
    alpha: f64,
    beta: f64,
}

impl RationalQuadraticKernel {
    /// Create a new rational quadratic kernel
    ///
    /// # Arguments
    /// * `alpha` - Scale on the squared distance (must be positive)
    /// * `beta` - Exponent (must be positive)
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha.is_finite()) {
            return Err(KernelError::invalid_parameter(
                "alpha",
                format!("must be positive, got {}", alpha),
            ));
        }
        if !(beta > 0.0 && beta.is_finite()) {
            return Err(KernelError::invalid_parameter(
                "beta",
                format!("must be positive, got {}", beta),
            ));
        }
        Ok(Self { alpha, beta })
    }

    /// Get the scale parameter
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Get the exponent parameter
    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl ScalarKernel for RationalQuadraticKernel {
    fn statistic(&self) -> Statistic {
        Statistic::SquaredDistance
    }

    fn kappa(&self, z: f64) -> f64 {
        (1.0 + self.alpha * z).powf(-self.beta)
    }

    fn kappa_d1(&self, z: f64) -> f64 {
        -self.alpha * self.beta * (1.0 + self.alpha * z).powf(-self.beta - 1.0)
    }

    fn kappa_d2(&self, z: f64) -> f64 {
        self.alpha * self.alpha * self.beta * (self.beta + 1.0)
            * (1.0 + self.alpha * z).powf(-self.beta - 2.0)
    }

    fn scalar_params(&self) -> &'static [&'static str] {
        &["alpha", "beta"]
    }

    fn kappa_dp(&self, param: &str, z: f64) -> Result<f64> {
        let base = 1.0 + self.alpha * z;
        match param {
            "alpha" => Ok(-self.beta * z * base.powf(-self.beta - 1.0)),
            "beta" => Ok(-base.powf(-self.beta) * base.ln()),
            _ => Err(KernelError::UnrecognizedParameter(param.to_string())),
        }
    }

    fn scalar_psd(&self) -> bool {
        true
    }

    fn scalar_describe(&self) -> KernelDescription {
        KernelDescription::leaf(
            "RationalQuadratic",
            vec![
                ("alpha".to_string(), self.alpha),
                ("beta".to_string(), self.beta),
            ],
        )
    }
}

crate::kernel::impl_kernel_via_scalar!(RationalQuadraticKernel);
