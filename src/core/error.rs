//! Error types for kernel computation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty input")]
    EmptyInput,

    #[error("Unrecognized kernel parameter: {0}")]
    UnrecognizedParameter(String),

    #[error("Parameter index {index} out of range: kernel has {count} parameters")]
    ParameterIndexOutOfRange { index: usize, count: usize },
}

impl KernelError {
    /// Shorthand for a construction-domain violation
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KernelError>;
