//! Kernel composition algebra
//!
//! `ScaledKernel`, `ProductKernel` and `SumKernel` combine kernels
//! recursively, forwarding evaluation and derivatives through the product
//! and chain rules. Composites take exclusive ownership of their children
//! at construction; since kernels expose no mutation API this gives the
//! same isolation as a deep copy.
//!
//! Parameters form a flattened, order-dependent namespace: coefficients
//! first, then the first child's parameters under the `k.`/`k1.` prefix,
//! then the second child's under `k2.`. Integer indexing follows that
//! exact order, and unknown paths fail rather than defaulting to zero.

pub mod product;
pub mod scaled;
pub mod sum;

pub use self::product::ProductKernel;
pub use self::scaled::ScaledKernel;
pub use self::sum::SumKernel;

use crate::core::{KernelError, Result};

/// Validate a composition coefficient
pub(crate) fn check_coefficient(name: &'static str, value: f64) -> Result<()> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(KernelError::invalid_parameter(
            name,
            format!("must be positive, got {}", value),
        ));
    }
    Ok(())
}

/// Strip a child prefix like "k1." from a parameter path
pub(crate) fn strip_child<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('.'))
        .filter(|rest| !rest.is_empty())
}
