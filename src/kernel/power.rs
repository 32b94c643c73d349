//! Power (negative distance) kernel implementation
//!
//! K(x, y) = -||x - y||^(2γ) with 0 < γ ≤ 1. A conditionally negative
//! definite kernel; `is_psd` reports false. The transform is singular at
//! z = 0 for γ < 1, where κ' and κ'' are taken as 0.

use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::traits::ScalarKernel;
use serde::{Deserialize, Serialize};

/// Power kernel: K(x, y) = -(||x - y||²)^γ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerKernel {
    gamma: f64,
}

impl PowerKernel {
    /// Create a new power kernel
    ///
    /// # Arguments
    /// * `gamma` - Exponent on the squared distance (must satisfy 0 < gamma <= 1)
    pub fn new(gamma: f64) -> Result<Self> {
        if !(gamma > 0.0 && gamma <= 1.0) {
            return Err(KernelError::invalid_parameter(
                "gamma",
                format!("must lie in (0, 1], got {}", gamma),
            ));
        }
        Ok(Self { gamma })
    }

    /// Get the exponent parameter
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl ScalarKernel for PowerKernel {
    fn statistic(&self) -> Statistic {
        Statistic::SquaredDistance
    }

    fn kappa(&self, z: f64) -> f64 {
        -z.powf(self.gamma)
    }

    fn kappa_d1(&self, z: f64) -> f64 {
        if z == 0.0 {
            return 0.0;
        }
        -self.gamma * z.powf(self.gamma - 1.0)
    }

    fn kappa_d2(&self, z: f64) -> f64 {
        if z == 0.0 {
            return 0.0;
        }
        -self.gamma * (self.gamma - 1.0) * z.powf(self.gamma - 2.0)
    }

    fn scalar_params(&self) -> &'static [&'static str] {
        &["gamma"]
    }

    fn kappa_dp(&self, param: &str, z: f64) -> Result<f64> {
        match param {
            "gamma" => {
                if z == 0.0 {
                    return Ok(0.0);
                }
                Ok(-z.powf(self.gamma) * z.ln())
            }
            _ => Err(KernelError::UnrecognizedParameter(param.to_string())),
        }
    }

    fn scalar_psd(&self) -> bool {
        false
    }

    fn scalar_describe(&self) -> KernelDescription {
        KernelDescription::leaf("Power", vec![("gamma".to_string(), self.gamma)])
    }
}

crate::kernel::impl_kernel_via_scalar!(PowerKernel);
