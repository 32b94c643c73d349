//! Weighted sum of two kernels

use crate::compose::{check_coefficient, strip_child};
use crate::core::{KernelDescription, KernelError, Result, Statistic};
use crate::kernel::Kernel;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Sum kernel: K(x, y) = a1 * k1(x, y) + a2 * k2(x, y) with a1, a2 > 0
///
/// Every derivative is the weighted sum of the child derivatives; there
/// are no cross terms. Child parameters are addressed under the `k1.` and
/// `k2.` prefixes, after the two coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SumKernel<K1, K2> {
    a1: f64,
    a2: f64,
    k1: K1,
    k2: K2,
}

impl<K1: Kernel, K2: Kernel> SumKernel<K1, K2> {
    /// Create a new sum kernel
    ///
    /// # Arguments
    /// * `a1`, `a2` - Positive coefficients
    /// * `k1`, `k2` - Sub-kernels, owned by the composite from here on
    pub fn new(a1: f64, k1: K1, a2: f64, k2: K2) -> Result<Self> {
        check_coefficient("a1", a1)?;
        check_coefficient("a2", a2)?;
        Ok(Self { a1, a2, k1, k2 })
    }

    /// Get the first coefficient
    pub fn a1(&self) -> f64 {
        self.a1
    }

    /// Get the second coefficient
    pub fn a2(&self) -> f64 {
        self.a2
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

impl<K1: Kernel, K2: Kernel> Kernel for SumKernel<K1, K2> {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        Ok(self.a1 * self.k1.compute(x, y)? + self.a2 * self.k2.compute(x, y)?)
    }

    fn grad_x(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
        let g1 = self.k1.grad_x(x, y)?;
        let g2 = self.k2.grad_x(x, y)?;
        Ok(Array1::from_shape_fn(x.len(), |i| {
            self.a1 * g1[i] + self.a2 * g2[i]
        }))
    }

    fn grad_xy(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array2<f64>> {
        let h1 = self.k1.grad_xy(x, y)?;
        let h2 = self.k2.grad_xy(x, y)?;
        let mut m = h1.mapv(|v| self.a1 * v);
        m += &h2.mapv(|v| self.a2 * v);
        Ok(m)
    }

    fn param_names(&self) -> Vec<String> {
        let mut names = vec!["a1".to_string(), "a2".to_string()];
        names.extend(self.k1.param_names().into_iter().map(|n| format!("k1.{}", n)));
        names.extend(self.k2.param_names().into_iter().map(|n| format!("k2.{}", n)));
        names
    }

    fn grad_param(&self, param: &str, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        match param {
            "a1" => return self.k1.compute(x, y),
            "a2" => return self.k2.compute(x, y),
            _ => {}
        }
        if let Some(rest) = strip_child(param, "k1") {
            return Ok(self.a1 * self.k1.grad_param(rest, x, y)?);
        }
        if let Some(rest) = strip_child(param, "k2") {
            return Ok(self.a2 * self.k2.grad_param(rest, x, y)?);
        }
        Err(KernelError::UnrecognizedParameter(param.to_string()))
    }

    fn is_psd(&self) -> bool {
        self.k1.is_psd() && self.k2.is_psd()
    }

    fn describe(&self) -> KernelDescription {
        KernelDescription {
            name: "Sum",
            params: vec![("a1".to_string(), self.a1), ("a2".to_string(), self.a2)],
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
        self.a1 * self.k1.transform(z) + self.a2 * self.k2.transform(z)
    }
}
