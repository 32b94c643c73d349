//! Mercer sigmoid kernel implementation
//!
//! A separable kernel: each coordinate is passed through the elementwise
//! map κ(t) = tanh((t - d) / b) and the kernel value is the inner product
//! of the mapped vectors,
//!
//! K(x, y) = Σᵢ κ(xᵢ) * κ(yᵢ)
//!
//! Unlike the plain sigmoid kernel this construction is an explicit feature
//! map, so it is positive semi-definite for every parameter choice. Being
//! separable it has no single batch statistic and is always evaluated
//! pairwise by the Gram-matrix engine.

use crate::core::{KernelDescription, KernelError, Result};
use crate::kernel::Kernel;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Mercer sigmoid kernel: K(x, y) = Σ tanh((xᵢ-d)/b) * tanh((yᵢ-d)/b)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MercerSigmoidKernel {
    center: f64,
    bandwidth: f64,
}

impl MercerSigmoidKernel {
    /// Create a new Mercer sigmoid kernel
    ///
    /// # Arguments
    /// * `center` - Horizontal shift d of the elementwise map (any finite value)
    /// * `bandwidth` - Scale b of the elementwise map (must be positive)
    pub fn new(center: f64, bandwidth: f64) -> Result<Self> {
        if !center.is_finite() {
            return Err(KernelError::invalid_parameter(
                "center",
                format!("must be finite, got {}", center),
            ));
        }
        if !(bandwidth > 0.0 && bandwidth.is_finite()) {
            return Err(KernelError::invalid_parameter(
                "bandwidth",
                format!("must be positive, got {}", bandwidth),
            ));
        }
        Ok(Self { center, bandwidth })
    }

    /// Get the center parameter
    pub fn center(&self) -> f64 {
        self.center
    }

    /// Get the bandwidth parameter
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Elementwise map κ(t)
    fn phi(&self, t: f64) -> f64 {
        ((t - self.center) / self.bandwidth).tanh()
    }

    /// Elementwise map derivative κ'(t)
    fn phi_d1(&self, t: f64) -> f64 {
        let u = self.phi(t);
        (1.0 - u * u) / self.bandwidth
    }

    fn check_pair(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<()> {
        if x.is_empty() || y.is_empty() {
            return Err(KernelError::EmptyInput);
        }
        if x.len() != y.len() {
            return Err(KernelError::DimensionMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }
        Ok(())
    }
}

impl Default for MercerSigmoidKernel {
    /// Default Mercer sigmoid kernel with center 0 and bandwidth 1
    fn default() -> Self {
        Self {
            center: 0.0,
            bandwidth: 1.0,
        }
    }
}

impl Kernel for MercerSigmoidKernel {
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        Self::check_pair(x, y)?;
        Ok(x.iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| self.phi(xi) * self.phi(yi))
            .sum())
    }

    fn grad_x(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
        Self::check_pair(x, y)?;
        Ok(x.iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| self.phi_d1(xi) * self.phi(yi))
            .collect())
    }

    fn grad_xy(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array2<f64>> {
        Self::check_pair(x, y)?;
        let mut m = Array2::zeros((x.len(), x.len()));
        for (i, (&xi, &yi)) in x.iter().zip(y.iter()).enumerate() {
            m[(i, i)] = self.phi_d1(xi) * self.phi_d1(yi);
        }
        Ok(m)
    }

    fn param_names(&self) -> Vec<String> {
        vec!["center".to_string(), "bandwidth".to_string()]
    }

    fn grad_param(&self, param: &str, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        Self::check_pair(x, y)?;
        match param {
            // dκ(t)/dd = -κ'(t)
            "center" => Ok(x
                .iter()
                .zip(y.iter())
                .map(|(&xi, &yi)| {
                    -self.phi_d1(xi) * self.phi(yi) - self.phi(xi) * self.phi_d1(yi)
                })
                .sum()),
            // dκ(t)/db = -κ'(t) * (t - d) / b
            "bandwidth" => Ok(x
                .iter()
                .zip(y.iter())
                .map(|(&xi, &yi)| {
                    let dxi = -self.phi_d1(xi) * (xi - self.center) / self.bandwidth;
                    let dyi = -self.phi_d1(yi) * (yi - self.center) / self.bandwidth;
                    dxi * self.phi(yi) + self.phi(xi) * dyi
                })
                .sum()),
            _ => Err(KernelError::UnrecognizedParameter(param.to_string())),
        }
    }

    fn is_psd(&self) -> bool {
        true
    }

    fn describe(&self) -> KernelDescription {
        KernelDescription::leaf(
            "MercerSigmoid",
            vec![
                ("center".to_string(), self.center),
                ("bandwidth".to_string(), self.bandwidth),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_mercer_sigmoid_creation() {
        let k = MercerSigmoidKernel::new(0.5, 2.0).unwrap();
        assert_eq!(k.center(), 0.5);
        assert_eq!(k.bandwidth(), 2.0);
        assert!(MercerSigmoidKernel::new(0.0, 0.0).is_err());
        assert!(MercerSigmoidKernel::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_mercer_sigmoid_known_value() {
        let k = MercerSigmoidKernel::default();
        let x = array![1.0, 0.0];
        let y = array![1.0, 2.0];
        let expected = 1.0f64.tanh() * 1.0f64.tanh();
        assert_relative_eq!(k.compute(x.view(), y.view()).unwrap(), expected);
    }

    #[test]
    fn test_mercer_sigmoid_symmetry() {
        let k = MercerSigmoidKernel::new(0.3, 1.5).unwrap();
        let x = array![1.0, -2.0, 0.5];
        let y = array![0.0, 1.0, -0.7];
        assert_eq!(
            k.compute(x.view(), y.view()).unwrap(),
            k.compute(y.view(), x.view()).unwrap()
        );
    }

    #[test]
    fn test_mercer_sigmoid_gradient_finite_difference() {
        let k = MercerSigmoidKernel::new(0.2, 1.3).unwrap();
        let x = array![0.8, -0.4];
        let y = array![0.1, 0.9];
        let h = 1e-6;
        let grad = k.grad_x(x.view(), y.view()).unwrap();
        for i in 0..2 {
            let mut xp = x.clone();
            let mut xm = x.clone();
            xp[i] += h;
            xm[i] -= h;
            let fd = (k.compute(xp.view(), y.view()).unwrap()
                - k.compute(xm.view(), y.view()).unwrap())
                / (2.0 * h);
            assert_relative_eq!(grad[i], fd, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_mercer_sigmoid_param_gradient_finite_difference() {
        let x = array![0.8, -0.4];
        let y = array![0.1, 0.9];
        let h = 1e-6;
        let k = MercerSigmoidKernel::new(0.2, 1.3).unwrap();

        let gc = k.grad_param("center", x.view(), y.view()).unwrap();
        let kp = MercerSigmoidKernel::new(0.2 + h, 1.3).unwrap();
        let km = MercerSigmoidKernel::new(0.2 - h, 1.3).unwrap();
        let fd = (kp.compute(x.view(), y.view()).unwrap()
            - km.compute(x.view(), y.view()).unwrap())
            / (2.0 * h);
        assert_relative_eq!(gc, fd, max_relative = 1e-5);

        let gb = k.grad_param("bandwidth", x.view(), y.view()).unwrap();
        let kp = MercerSigmoidKernel::new(0.2, 1.3 + h).unwrap();
        let km = MercerSigmoidKernel::new(0.2, 1.3 - h).unwrap();
        let fd = (kp.compute(x.view(), y.view()).unwrap()
            - km.compute(x.view(), y.view()).unwrap())
            / (2.0 * h);
        assert_relative_eq!(gb, fd, max_relative = 1e-5);
    }

    #[test]
    fn test_mercer_sigmoid_grad_xy_is_diagonal() {
        let k = MercerSigmoidKernel::default();
        let x = array![0.5, -1.0, 2.0];
        let y = array![1.0, 0.0, -0.5];
        let m = k.grad_xy(x.view(), y.view()).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                if i != j {
                    assert_eq!(m[(i, j)], 0.0);
                }
            }
        }
    }

    #[test]
    fn test_mercer_sigmoid_no_batch_reduction() {
        let k = MercerSigmoidKernel::default();
        assert!(k.reduction().is_none());
    }
}
