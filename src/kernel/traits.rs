//! Kernel trait definitions
//!
//! `Kernel` is the full evaluation protocol shared by primitive kernels and
//! arbitrarily nested compositions: pairwise values, gradients with respect
//! to either argument, the mixed second derivative, and gradients with
//! respect to named or indexed parameters.
//!
//! `ScalarKernel` is the much smaller statistic-family capability a
//! primitive implements instead: declare which batch statistic it
//! transforms, supply the closed-form transform and its derivatives, and
//! the generic family formulas provide the rest.

use crate::core::{KernelDescription, KernelError, Result, Statistic};
use ndarray::{Array1, Array2, ArrayView1};

/// Kernel function trait
///
/// A kernel k(x, y) is a symmetric similarity function over feature
/// vectors. Implementations are immutable value objects: nothing mutates a
/// kernel after construction, so shared read-only use across concurrent
/// computations is safe.
pub trait Kernel: Send + Sync {
    /// Compute the kernel value k(x, y)
    fn compute(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64>;

    /// Gradient of k(x, y) with respect to x
    fn grad_x(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>>;

    /// Gradient of k(x, y) with respect to y
    ///
    /// Kernels are symmetric, so the default forwards to `grad_x` with the
    /// arguments swapped.
    fn grad_y(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.grad_x(y, x)
    }

    /// Mixed second derivative d²k/dx∂y as a (d, d) matrix
    fn grad_xy(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array2<f64>>;

    /// Flattened parameter names in their fixed addressing order
    ///
    /// Composites list coefficients first, then the first child's
    /// parameters (dotted prefix), then the second child's. Integer
    /// parameter indexing follows exactly this order.
    fn param_names(&self) -> Vec<String>;

    /// Number of flattened parameters
    fn param_count(&self) -> usize {
        self.param_names().len()
    }

    /// Derivative of k(x, y) with respect to a named parameter path
    ///
    /// Composite kernels resolve dotted paths (e.g. `"k1.alpha"`) by
    /// recursing into the addressed child. Unknown paths are an error,
    /// never silently zero.
    fn grad_param(&self, param: &str, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64>;

    /// Derivative of k(x, y) with respect to the index-th flattened parameter
    fn grad_param_index(
        &self,
        index: usize,
        x: ArrayView1<f64>,
        y: ArrayView1<f64>,
    ) -> Result<f64> {
        let names = self.param_names();
        match names.get(index) {
            Some(name) => self.grad_param(name, x, y),
            None => Err(KernelError::ParameterIndexOutOfRange {
                index,
                count: names.len(),
            }),
        }
    }

    /// Whether the kernel is guaranteed positive semi-definite
    fn is_psd(&self) -> bool;

    /// Structured name + parameter description, recursive for composites
    fn describe(&self) -> KernelDescription;

    /// Batch statistic this kernel is a pointwise transform of, if any
    ///
    /// `Some` enables the batched Gram-matrix path: the statistic matrix is
    /// computed once with gemm and `transform` is mapped over it. Kernels
    /// whose evaluation is weighted, separable or mixed return `None` and
    /// are evaluated pairwise.
    fn reduction(&self) -> Option<Statistic> {
        None
    }

    /// Kernel value from a precomputed statistic
    ///
    /// Only meaningful when `reduction` returns `Some`.
    fn transform(&self, z: f64) -> f64 {
        z
    }
}

/// Statistic-family capability of a primitive scalar-transform kernel
///
/// A scalar-transform kernel is k(x, y) = κ(z) where z is one of the batch
/// statistics. A primitive only defines κ, κ', κ'' and its per-parameter
/// partials; the family-generic derivative formulas are implemented once
/// against this trait and wired up with `impl_kernel_via_scalar!`.
pub trait ScalarKernel: Send + Sync {
    /// Statistic the scalar transform applies to
    fn statistic(&self) -> Statistic;

    /// Scalar transform κ(z)
    fn kappa(&self, z: f64) -> f64;

    /// First derivative ∂κ/∂z
    fn kappa_d1(&self, z: f64) -> f64;

    /// Second derivative ∂²κ/∂z²
    fn kappa_d2(&self, z: f64) -> f64;

    /// Own differentiable parameter names in fixed order
    fn scalar_params(&self) -> &'static [&'static str];

    /// Partial derivative ∂κ/∂param at fixed z
    fn kappa_dp(&self, param: &str, z: f64) -> Result<f64>;

    /// Whether the transform yields a positive semi-definite kernel
    fn scalar_psd(&self) -> bool;

    /// Family name + parameters
    fn scalar_describe(&self) -> KernelDescription;
}
