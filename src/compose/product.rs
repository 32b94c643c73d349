//! Product of two kernels

use crate::compose::{check_coefficient, strip_child};
use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::{outer_scaled, Kernel};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Product kernel: K(x, y) = a * k1(x, y) * k2(x, y) with a > 0
///
/// Gradients follow the two-factor product rule; the mixed second
/// derivative expands into four terms:
///
/// a * [∂²k1·k2 + (∂k1/∂x)(∂k2/∂y)ᵀ + (∂k2/∂x)(∂k1/∂y)ᵀ + k1·∂²k2]
///
/// Child parameters are addressed under the `k1.` and `k2.` prefixes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductKernel<K1, K2> {
    a: f64,
    k1: K1,
    k2: K2,
}

impl<K1: Kernel, K2: Kernel> ProductKernel<K1, K2> {
    /// Create a new product kernel
    ///
    /// # Arguments
    /// * `a` - Positive coefficient
    /// * `k1`, `k2` - Sub-kernels, owned by the composite from here on
    pub fn new(a: f64, k1: K1, k2: K2) -> Result<Self> {
        check_coefficient("a", a)?;
        Ok(Self { a, k1, k2 })
    }

    /// Get the coefficient
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Get the first sub-kernel
    pub fn k1(&self) -> &K1 {
        &self.k1
    }

    /// Get the second sub-kernel
    pub fn k2(&self) -> &K2 {
        &self.k2
    }
}

impl<K1: Kernel, K2: Kernel> Kernel for ProductKernel<K1, K2> {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        Ok(self.a * self.k1.compute(x, y)? * self.k2.compute(x, y)?)
    }

    fn grad_x(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
        let v1 = self.k1.compute(x, y)?;
        let v2 = self.k2.compute(x, y)?;
        let g1 = self.k1.grad_x(x, y)?;
        let g2 = self.k2.grad_x(x, y)?;
        Ok(Array1::from_shape_fn(x.len(), |i| {
            self.a * (g1[i] * v2 + v1 * g2[i])
        }))
    }

    fn grad_xy(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array2<f64>> {
        let v1 = self.k1.compute(x, y)?;
        let v2 = self.k2.compute(x, y)?;
        let g1x = self.k1.grad_x(x, y)?;
        let g1y = self.k1.grad_y(x, y)?;
        let g2x = self.k2.grad_x(x, y)?;
        let g2y = self.k2.grad_y(x, y)?;
        let h1 = self.k1.grad_xy(x, y)?;
        let h2 = self.k2.grad_xy(x, y)?;

        let mut m = outer_scaled(1.0, g1x.view(), g2y.view());
        m += &outer_scaled(1.0, g2x.view(), g1y.view());
        m += &h1.mapv(|v| v * v2);
        m += &h2.mapv(|v| v * v1);
        m.mapv_inplace(|v| self.a * v);
        Ok(m)
    }

    fn param_names(&self) -> Vec<String> {
        let mut names = vec!["a".to_string()];
        names.extend(self.k1.param_names().into_iter().map(|n| format!("k1.{}", n)));
        names.extend(self.k2.param_names().into_iter().map(|n| format!("k2.{}", n)));
        names
    }

    fn grad_param(&self, param: &str, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        if param == "a" {
            return Ok(self.k1.compute(x, y)? * self.k2.compute(x, y)?);
        }
        if let Some(rest) = strip_child(param, "k1") {
            return Ok(self.a * self.k2.compute(x, y)? * self.k1.grad_param(rest, x, y)?);
        }
        if let Some(rest) = strip_child(param, "k2") {
            return Ok(self.a * self.k1.compute(x, y)? * self.k2.grad_param(rest, x, y)?);
        }
        Err(KernelError::UnrecognizedParameter(param.to_string()))
    }

    fn is_psd(&self) -> bool {
        self.k1.is_psd() && self.k2.is_psd()
    }

    fn describe(&self) -> KernelDescription {
        KernelDescription {
            name: "Product",
            params: vec![("a".to_string(), self.a)],
            children: vec![self.k1.describe(), self.k2.describe()],
        }
    }

    fn reduction(&self) -> Option<Statistic> {
        match (self.k1.reduction(), self.k2.reduction()) {
            (Some(s1), Some(s2)) if s1 == s2 => Some(s1),
            _ => None,
        }
    }

    fn transform(&self, z: f64) -> f64 {
        self.a * self.k1.transform(z) * self.k2.transform(z)
    }
}
