//! Log kernel implementation
//!
//! K(x, y) = -ln(1 + α * ||x - y||^(2γ)) with α > 0 and 0 < γ ≤ 1.
//! Conditionally negative definite, like the power kernel it is built on;
//! `is_psd` reports false.

use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::traits::ScalarKernel;
use serde::{Deserialize, Serialize};

/// Log kernel: K(x, y) = -ln(1 + α * (||x - y||²)^γ)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogKernel {
    alpha: f64,
    gamma: f64,
}

impl LogKernel {
    /// Create a new log kernel
    ///
    /// # Arguments
    /// * `alpha` - Scale on the distance term (must be positive)
    /// * `gamma` - Exponent on the squared distance (must satisfy 0 < gamma <= 1)
    pub fn new(alpha: f64, gamma: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha.is_finite()) {
            return Err(KernelError::invalid_parameter(
                "alpha",
                format!("must be positive, got {}", alpha),
            ));
        }
        if !(gamma > 0.0 && gamma <= 1.0) {
            return Err(KernelError::invalid_parameter(
                "gamma",
                format!("must lie in (0, 1], got {}", gamma),
            ));
        }
        Ok(Self { alpha, gamma })
    }

    /// Get the scale parameter
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Get the exponent parameter
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl ScalarKernel for LogKernel {
    fn statistic(&self) -> Statistic {
        Statistic::SquaredDistance
    }

    fn kappa(&self, z: f64) -> f64 {
        -(1.0 + self.alpha * z.powf(self.gamma)).ln()
    }

    fn kappa_d1(&self, z: f64) -> f64 {
        if z == 0.0 {
            // singular for gamma < 1, exact for gamma = 1
            return if self.gamma == 1.0 { -self.alpha } else { 0.0 };
        }
        let u = self.alpha * z.powf(self.gamma);
        -self.alpha * self.gamma * z.powf(self.gamma - 1.0) / (1.0 + u)
    }

    fn kappa_d2(&self, z: f64) -> f64 {
        if z == 0.0 {
            return if self.gamma == 1.0 {
                self.alpha * self.alpha
            } else {
                0.0
            };
        }
        let u = self.alpha * z.powf(self.gamma);
        let denom = (1.0 + u) * (1.0 + u);
        let t1 = (self.gamma - 1.0) * z.powf(self.gamma - 2.0) * (1.0 + u);
        let t2 = self.gamma * self.alpha * z.powf(2.0 * self.gamma - 2.0);
        -self.alpha * self.gamma * (t1 - t2) / denom
    }

    fn scalar_params(&self) -> &'static [&'static str] {
        &["alpha", "gamma"]
    }

    fn kappa_dp(&self, param: &str, z: f64) -> Result<f64> {
        let u = self.alpha * z.powf(self.gamma);
        match param {
            "alpha" => Ok(-z.powf(self.gamma) / (1.0 + u)),
            "gamma" => {
                if z == 0.0 {
                    return Ok(0.0);
                }
                Ok(-u * z.ln() / (1.0 + u))
            }
            _ => Err(KernelError::UnrecognizedParameter(param.to_string())),
        }
    }

    fn scalar_psd(&self) -> bool {
        false
    }

    fn scalar_describe(&self) -> KernelDescription {
        KernelDescription::leaf(
            "Log",
            vec![
                ("alpha".to_string(), self.alpha),
                ("gamma".to_string(), self.gamma),
            ],
        )
    }
}

crate::kernel::impl_kernel_via_scalar!(LogKernel);
