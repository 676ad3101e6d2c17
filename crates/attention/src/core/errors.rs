//! Error types emitted by attention kernels and mask builders.

use thiserror::Error;

/// Result alias used throughout the attention crate.
pub type Result<T> = std::result::Result<T, AttentionError>;

/// Attention-specific error category.
///
/// Every variant describes a contract violation detected before any tensor
/// work runs, except [`AttentionError::Backend`] which wraps failures surfaced
/// by Candle itself.
#[derive(Debug, Error)]
pub enum AttentionError {
    /// Dimensions of `q`, `k`, `v`, or the mask are incompatible.
    #[error("shape mismatch: {context}")]
    ShapeMismatch { context: String },
    /// A tensor does not have the rank the operation expects.
    #[error("invalid rank for {name}: expected {expected}, got {actual}")]
    InvalidRank {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Temperature or dropout configuration is out of range.
    #[error("invalid attention config: {context}")]
    InvalidConfig { context: String },
    /// The operation does not support the supplied data type.
    #[error("unsupported dtype {requested}")]
    UnsupportedDType { requested: String },
    /// Inputs live on different devices.
    #[error("device mismatch: {context}")]
    DeviceMismatch { context: String },
    /// A backend-specific failure propagated to the caller.
    #[error(transparent)]
    Backend(#[from] candle_core::Error),
}

impl AttentionError {
    pub(crate) fn shape(context: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
        }
    }

    pub(crate) fn config(context: impl Into<String>) -> Self {
        Self::InvalidConfig {
            context: context.into(),
        }
    }
}
