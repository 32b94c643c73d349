//! Core type definitions for kernel computation

use serde::{Deserialize, Serialize};

/// Batch statistic a scalar-transform kernel is defined over
///
/// Every standard primitive kernel is a closed-form function of exactly one
/// of these pairwise quantities, which determines both its generic
/// derivative formulas and the batched path the Gram-matrix engine can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    /// Euclidean inner product <x, y>
    DotProduct,
    /// Squared Euclidean distance ||x - y||^2
    SquaredDistance,
}

/// Structured, read-only description of a kernel
///
/// Composites describe themselves recursively: coefficients appear in
/// `params` before any child, and `children` holds the sub-kernel
/// descriptions in flattening order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KernelDescription {
    /// Kernel family name, e.g. "Gaussian" or "Product"
    pub name: &'static str,
    /// Own scalar parameters in flattening order
    pub params: Vec<(String, f64)>,
    /// Sub-kernel descriptions, empty for primitives
    pub children: Vec<KernelDescription>,
}

impl KernelDescription {
    /// Create a leaf description with no sub-kernels
    pub fn leaf(name: &'static str, params: Vec<(String, f64)>) -> Self {
        Self {
            name,
            params,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_description() {
        let desc = KernelDescription::leaf("Gaussian", vec![("alpha".to_string(), 2.0)]);
        assert_eq!(desc.name, "Gaussian");
        assert_eq!(desc.params, vec![("alpha".to_string(), 2.0)]);
        assert!(desc.children.is_empty());
    }

    #[test]
    fn test_nested_description() {
        let child = KernelDescription::leaf("Linear", vec![]);
        let desc = KernelDescription {
            name: "Scaled",
            params: vec![("a".to_string(), 3.0)],
            children: vec![child.clone()],
        };
        assert_eq!(desc.children.len(), 1);
        assert_eq!(desc.children[0], child);
    }
}
