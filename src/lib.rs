//! Mercer kernel functions, derivatives, and Gram matrix computation
//!
//! This crate provides the numeric core of kernel-method machine learning:
//! a family of closed-form primitive kernels (Gaussian, Laplacian,
//! polynomial, sigmoid, ...), a composition algebra (scaling, products,
//! sums, ARD weighting), closed-form first and second derivatives with
//! respect to inputs and parameters, and a batched Gram-matrix engine that
//! exploits symmetry and a single matrix product instead of per-pair loops
//! whenever the kernel allows it.
//!
//! # Quick Start
//!
//! ```rust
//! use mercer::{kernel_matrix, GaussianKernel, Kernel};
//! use ndarray::array;
//!
//! # fn main() -> Result<(), mercer::KernelError> {
//! let kernel = GaussianKernel::new(1.0)?;
//!
//! // pairwise evaluation
//! let x = array![0.0, 0.0];
//! let y = array![1.0, 0.0];
//! let value = kernel.compute(x.view(), y.view())?;
//! assert!((value - (-1.0f64).exp()).abs() < 1e-12);
//!
//! // batched Gram matrix over a whole observation set (rows = observations)
//! let data = array![[0.0, 0.0], [1.0, 0.0], [0.0, 2.0]];
//! let gram = kernel_matrix(&kernel, data.view())?;
//! assert_eq!(gram.dim(), (3, 3));
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod compose;
pub mod core;
pub mod kernel;
pub mod matrix;
pub mod vector;

// Re-export main types for convenience
pub use crate::compose::{ProductKernel, ScaledKernel, SumKernel};
pub use crate::core::{KernelDescription, KernelError, Result, Statistic};
pub use crate::kernel::{
    ArdKernel, GaussianKernel, InverseMultiquadraticKernel, Kernel, LaplacianKernel,
    LinearKernel, LogKernel, MercerSigmoidKernel, MultiquadraticKernel, PolynomialKernel,
    PowerKernel, RationalQuadraticKernel, ScalarKernel, SigmoidKernel,
};
pub use crate::matrix::{
    kernel_matrix, kernel_matrix_dp, kernel_matrix_dp_index, kernel_matrix_dx,
    kernel_matrix_dxdy, kernel_matrix_dy, kernel_matrix_into, kernel_matrix_xy,
    kernel_matrix_xy_into,
};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
