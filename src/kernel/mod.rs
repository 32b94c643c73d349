//! Kernel functions
//!
//! One file per primitive kernel family, plus the ARD wrapper. Primitives
//! implement [`ScalarKernel`]; the generic statistic-family derivative
//! formulas in the private `family` module turn that into a full
//! [`Kernel`] implementation via `impl_kernel_via_scalar!`, so each
//! concrete kernel only defines κ, κ', κ'' and its parameter partials.

pub mod ard;
pub mod gaussian;
pub mod inverse_multiquadratic;
pub mod laplacian;
pub mod linear;
pub mod log;
pub mod mercer_sigmoid;
pub mod multiquadratic;
pub mod polynomial;
pub mod power;
pub mod rational_quadratic;
pub mod sigmoid;
pub mod traits;

pub use self::ard::ArdKernel;
pub use self::gaussian::GaussianKernel;
pub use self::inverse_multiquadratic::InverseMultiquadraticKernel;
pub use self::laplacian::LaplacianKernel;
pub use self::linear::LinearKernel;
pub use self::log::LogKernel;
pub use self::mercer_sigmoid::MercerSigmoidKernel;
pub use self::multiquadratic::MultiquadraticKernel;
pub use self::polynomial::PolynomialKernel;
pub use self::power::PowerKernel;
pub use self::rational_quadratic::RationalQuadraticKernel;
pub use self::sigmoid::SigmoidKernel;
pub use self::traits::{Kernel, ScalarKernel};

/// Generic derivative formulas per statistic family
///
/// Implemented once against [`ScalarKernel`]; every scalar-transform
/// primitive gets its `Kernel` behavior from here.
pub(crate) mod family {
    use super::ScalarKernel;
    use crate::core::{Result, Statistic};
    use crate::vector;
    use ndarray::{Array1, Array2, ArrayView1};

    /// Batch statistic z for a pair of vectors
    pub fn statistic<K: ScalarKernel + ?Sized>(
        k: &K,
        x: ArrayView1<f64>,
        y: ArrayView1<f64>,
    ) -> Result<f64> {
        match k.statistic() {
            Statistic::DotProduct => vector::dot(x, y),
            Statistic::SquaredDistance => vector::sqdist(x, y),
        }
    }

    /// k(x, y) = κ(z)
    pub fn compute<K: ScalarKernel + ?Sized>(
        k: &K,
        x: ArrayView1<f64>,
        y: ArrayView1<f64>,
    ) -> Result<f64> {
        Ok(k.kappa(statistic(k, x, y)?))
    }

    /// Family gradient with respect to x:
    /// dot-product: κ'(z)·y; squared-distance: 2κ'(z)·(x − y)
    pub fn grad_x<K: ScalarKernel + ?Sized>(
        k: &K,
        x: ArrayView1<f64>,
        y: ArrayView1<f64>,
    ) -> Result<Array1<f64>> {
        let z = statistic(k, x, y)?;
        let d1 = k.kappa_d1(z);
        let dz_dx = match k.statistic() {
            Statistic::DotProduct => vector::dot_grad_x(x, y)?,
            Statistic::SquaredDistance => vector::sqdist_grad_x(x, y)?,
        };
        Ok(dz_dx.mapv_into(|v| d1 * v))
    }

    /// Family mixed second derivative:
    /// dot-product: κ''·y·xᵀ + κ'·I;
    /// squared-distance: −4κ''·(x−y)(x−y)ᵀ − 2κ'·I
    pub fn grad_xy<K: ScalarKernel + ?Sized>(
        k: &K,
        x: ArrayView1<f64>,
        y: ArrayView1<f64>,
    ) -> Result<Array2<f64>> {
        let z = statistic(k, x, y)?;
        let d1 = k.kappa_d1(z);
        let d2 = k.kappa_d2(z);
        let dim = x.len();
        let mut m = match k.statistic() {
            Statistic::DotProduct => super::outer_scaled(d2, y, x),
            Statistic::SquaredDistance => {
                let diff = &x - &y;
                super::outer_scaled(-4.0 * d2, diff.view(), diff.view())
            }
        };
        let diag = match k.statistic() {
            Statistic::DotProduct => d1,
            Statistic::SquaredDistance => -2.0 * d1,
        };
        for i in 0..dim {
            m[(i, i)] += diag;
        }
        Ok(m)
    }

    /// Parameter partial: the statistic does not depend on the parameters,
    /// so dk/dp = dκ/dp at z
    pub fn grad_param<K: ScalarKernel + ?Sized>(
        k: &K,
        param: &str,
        x: ArrayView1<f64>,
        y: ArrayView1<f64>,
    ) -> Result<f64> {
        let z = statistic(k, x, y)?;
        k.kappa_dp(param, z)
    }
}

/// Scaled outer product c·u·vᵀ
pub(crate) fn outer_scaled(
    c: f64,
    u: ndarray::ArrayView1<f64>,
    v: ndarray::ArrayView1<f64>,
) -> ndarray::Array2<f64> {
    let (n, m) = (u.len(), v.len());
    ndarray::Array2::from_shape_fn((n, m), |(i, j)| c * u[i] * v[j])
}

/// Wire a [`ScalarKernel`] implementation up as a full [`Kernel`]
///
/// A macro rather than a blanket impl: `impl<K: ScalarKernel> Kernel for K`
/// would conflict with the composite `Kernel` impls under coherence rules.
macro_rules! impl_kernel_via_scalar {
    ($kernel:ty) => {
        impl $crate::kernel::Kernel for $kernel {
            fn compute(
                &self,
                x: ndarray::ArrayView1<f64>,
                y: ndarray::ArrayView1<f64>,
            ) -> $crate::core::Result<f64> {
                $crate::kernel::family::compute(self, x, y)
            }

            fn grad_x(
                &self,
                x: ndarray::ArrayView1<f64>,
                y: ndarray::ArrayView1<f64>,
            ) -> $crate::core::Result<ndarray::Array1<f64>> {
                $crate::kernel::family::grad_x(self, x, y)
            }

            fn grad_xy(
                &self,
                x: ndarray::ArrayView1<f64>,
                y: ndarray::ArrayView1<f64>,
            ) -> $crate::core::Result<ndarray::Array2<f64>> {
                $crate::kernel::family::grad_xy(self, x, y)
            }

            fn param_names(&self) -> Vec<String> {
                $crate::kernel::ScalarKernel::scalar_params(self)
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            }

            fn grad_param(
                &self,
                param: &str,
                x: ndarray::ArrayView1<f64>,
                y: ndarray::ArrayView1<f64>,
            ) -> $crate::core::Result<f64> {
                $crate::kernel::family::grad_param(self, param, x, y)
            }

            fn is_psd(&self) -> bool {
                $crate::kernel::ScalarKernel::scalar_psd(self)
            }

            fn describe(&self) -> $crate::core::KernelDescription {
                $crate::kernel::ScalarKernel::scalar_describe(self)
            }

            fn reduction(&self) -> Option<$crate::core::Statistic> {
                Some($crate::kernel::ScalarKernel::statistic(self))
            }

            fn transform(&self, z: f64) -> f64 {
                $crate::kernel::ScalarKernel::kappa(self, z)
            }
        }
    };
}

pub(crate) use impl_kernel_via_scalar;
