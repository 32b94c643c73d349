//! Linear kernel implementation

use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::traits::ScalarKernel;
use serde::{Deserialize, Serialize};

/// Linear kernel: K(x, y) = a * <x, y> + c
///
/// The simplest dot-product kernel. With a = 1 and c = 0 it is the plain
/// Euclidean inner product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearKernel {
    a: f64,
    c: f64,
}

impl LinearKernel {
    /// Create a new linear kernel
    ///
    /// # Arguments
    /// * `a` - Slope on the dot product (must be positive)
    /// * `c` - Offset (must be non-negative)
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

    /// Plain inner-product kernel: K(x, y) = <x, y>
    pub fn plain() -> Self {
        Self { a: 1.0, c: 0.0 }
    }

    /// Get the slope parameter
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Get the offset parameter
    pub fn c(&self) -> f64 {
        self.c
    }
}

impl Default for LinearKernel {
    fn default() -> Self {
        Self::plain()
    }
}

impl ScalarKernel for LinearKernel {
    fn statistic(&self) -> Statistic {
        Statistic::DotProduct
    }

    fn kappa(&self, z: f64) -> f64 {
        self.a * z + self.c
    }

    fn kappa_d1(&self, _z: f64) -> f64 {
        self.a
    }

    fn kappa_d2(&self, _z: f64) -> f64 {
        0.0
    }

    fn scalar_params(&self) -> &'static [&'static str] {
        &["a", "c"]
    }

    fn kappa_dp(&self, param: &str, z: f64) -> Result<f64> {
        match param {
            "a" => Ok(z),
            "c" => Ok(1.0),
            _ => Err(KernelError::UnrecognizedParameter(param.to_string())),
        }
    }

    fn scalar_psd(&self) -> bool {
        true
    }

    fn scalar_describe(&self) -> KernelDescription {
        KernelDescription::leaf(
            "Linear",
            vec![("a".to_string(), self.a), ("c".to_string(), self.c)],
        )
    }
}

crate::kernel::impl_kernel_via_scalar!(LinearKernel);
