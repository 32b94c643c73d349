//! Multiquadratic kernel implementation

use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::traits::ScalarKernel;
use serde::{Deserialize, Serialize};

/// Multiquadratic kernel: K(x, y) = √(||x - y||² + c²)
///
/// Grows with distance, so it is not positive semi-definite; it is used in
/// radial-basis-function interpolation rather than as a covariance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiquadraticKernel {
    c: f64,
}

impl MultiquadraticKernel {
    /// Create a new multiquadratic kernel
    ///
    /// # Arguments
    /// * `c` - Shift parameter (must be positive)
    pub fn new(c: f64) -> Result<Self> {
        if !(c > 0.0 && c.is_finite()) {
            return Err(KernelError::invalid_parameter(
                "c",
                format!("must be positive, got {}", c),
            ));
        }
        Ok(Self { c })
    }

    /// Get the shift parameter
    pub fn c(&self) -> f64 {
        self.c
    }
}

impl ScalarKernel for MultiquadraticKernel {
    fn statistic(&self) -> Statistic {
        Statistic::SquaredDistance
    }

    fn kappa(&self, z: f64) -> f64 {
        (z + self.c * self.c).sqrt()
    }

    fn kappa_d1(&self, z: f64) -> f64 {
        0.5 / (z + self.c * self.c).sqrt()
    }

    fn kappa_d2(&self, z: f64) -> f64 {
        -0.25 * (z + self.c * self.c).powf(-1.5)
    }

    fn scalar_params(&self) -> &'static [&'static str] {
        &["c"]
    }

    fn kappa_dp(&self, param: &str, z: f64) -> Result<f64> {
        match param {
            "c" => Ok(self.c / (z + self.c * self.c).sqrt()),
            _ => Err(KernelError::UnrecognizedParameter(param.to_string())),
        }
    }

    fn scalar_psd(&self) -> bool {
        false
    }

    fn scalar_describe(&self) -> KernelDescription {
        KernelDescription::leaf("Multiquadratic", vec![("c".to_string(), self.c)])
    }
}

crate::kernel::impl_kernel_via_scalar!(MultiquadraticKernel);
