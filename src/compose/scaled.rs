//! Positive rescaling of a kernel

use crate::compose::{check_coefficient, strip_child};
use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::Kernel;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Scaled kernel: K(x, y) = a * k(x, y) with a > 0
///
/// Every derivative scales linearly by `a`; the gradient with respect to
/// `a` itself is the child's value. Child parameters are addressed under
/// the `k.` prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledKernel<K> {
    a: f64,
    kernel: K,
}

impl<K: Kernel> ScaledKernel<K> {
    /// Create a new scaled kernel
    ///
    /// # Arguments
    /// * `a` - Positive scaling coefficient
    /// * `kernel` - Sub-kernel, owned by the composite from here on
    pub fn new(a: f64, kernel: K) -> Result<Self> {
        check_coefficient("a", a)?;
        Ok(Self { a, kernel })
    }

    /// Get the scaling coefficient
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Get the sub-kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }
}

impl<K: Kernel> Kernel for ScaledKernel<K> {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        Ok(self.a * self.kernel.compute(x, y)?)
    }

    fn grad_x(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
        Ok(self.kernel.grad_x(x, y)?.mapv_into(|v| self.a * v))
    }

    fn grad_xy(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array2<f64>> {
        Ok(self.kernel.grad_xy(x, y)?.mapv_into(|v| self.a * v))
    }

    fn param_names(&self) -> Vec<String> {
        let mut names = vec!["a".to_string()];
        names.extend(
            self.kernel
                .param_names()
                .into_iter()
                .map(|n| format!("k.{}", n)),
        );
        names
    }

    fn grad_param(&self, param: &str, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        if param == "a" {
            return self.kernel.compute(x, y);
        }
        if let Some(rest) = strip_child(param, "k") {
            return Ok(self.a * self.kernel.grad_param(rest, x, y)?);
        }
        Err(KernelError::UnrecognizedParameter(param.to_string()))
    }

    fn is_psd(&self) -> bool {
        self.kernel.is_psd()
    }

    fn describe(&self) -> KernelDescription {
        KernelDescription {
            name: "Scaled",
            params: vec![("a".to_string(), self.a)],
            children: vec![self.kernel.describe()],
        }
    }

    fn reduction(&self) -> Option<Statistic> {
        self.kernel.reduction()
    }

    fn transform(&self, z: f64) -> f64 {
        self.a * self.kernel.transform(z)
    }
}
