//! Laplacian (exponential) kernel implementation
//!
//! K(x, y) = exp(-α * ||x - y||), parameterized over the squared distance
//! as κ(z) = exp(-α * √z). The transform is not differentiable at z = 0;
//! κ' and κ'' are taken as 0 there so gradients at coincident points are
//! finite.

use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::traits::ScalarKernel;
use serde::{Deserialize, Serialize};

/// Laplacian kernel: K(x, y) = exp(-α * √(||x - y||²))
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaplacianKernel {
    alpha: f64,
}

impl LaplacianKernel {
    /// Create a new Laplacian kernel
    ///
    /// # Arguments
    /// * `alpha` - The bandwidth parameter (must be positive)
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha.is_finite()) {
            return Err(KernelError::invalid_parameter(
                "alpha",
                format!("must be positive, got {}", alpha),
            ));
        }
        Ok(Self { alpha })
    }

    /// Get the bandwidth parameter
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl ScalarKernel for LaplacianKernel {
    fn statistic(&self) -> Statistic {
        Statistic::SquaredDistance
    }

    fn kappa(&self, z: f64) -> f64 {
        (-self.alpha * z.sqrt()).exp()
    }

    fn kappa_d1(&self, z: f64) -> f64 {
        if z == 0.0 {
            return 0.0;
        }
        let r = z.sqrt();
        -self.alpha / (2.0 * r) * (-self.alpha * r).exp()
    }

    fn kappa_d2(&self, z: f64) -> f64 {
        if z == 0.0 {
            return 0.0;
        }
        let r = z.sqrt();
        let e = (-self.alpha * r).exp();
        self.alpha / (4.0 * z) * (1.0 / r + self.alpha) * e
    }

    fn scalar_params(&self) -> &'static [&'static str] {
        &["alpha"]
    }

    fn kappa_dp(&self, param: &str, z: f64) -> Result<f64> {
        match param {
            "alpha" => {
                let r = z.sqrt();
                Ok(-r * (-self.alpha * r).exp())
            }
            _ => Err(KernelError::UnrecognizedParameter(param.to_string())),
        }
    }

    fn scalar_psd(&self) -> bool {
        true
    }

    fn scalar_describe(&self) -> KernelDescription {
        KernelDescription::leaf("Laplacian", vec![("alpha".to_string(), self.alpha)])
    }
}

crate::kernel::impl_kernel_via_scalar!(LaplacianKernel);
