//! Rank, dtype and device assertions shared by the attention kernels and the
//! mask builders. Each helper returns a typed [`AttentionError`] so call sites
//! can reject bad inputs before any tensor work runs.

use candle_core::{DType, Tensor};

use super::errors::{AttentionError, Result};

/// Unpacks a rank-3 tensor or reports [`AttentionError::InvalidRank`].
pub fn expect_rank3(name: &'static str, tensor: &Tensor) -> Result<(usize, usize, usize)> {
    match tensor.dims() {
        [a, b, c] => Ok((*a, *b, *c)),
        dims => Err(AttentionError::InvalidRank {
            name,
            expected: 3,
            actual: dims.len(),
        }),
    }
}

/// Unpacks a rank-2 tensor or reports [`AttentionError::InvalidRank`].
pub fn expect_rank2(name: &'static str, tensor: &Tensor) -> Result<(usize, usize)> {
    match tensor.dims() {
        [a, b] => Ok((*a, *b)),
        dims => Err(AttentionError::InvalidRank {
            name,
            expected: 2,
            actual: dims.len(),
        }),
    }
}

/// Token id sequences and masks must hold integers.
pub fn expect_integer(name: &'static str, tensor: &Tensor) -> Result<()> {
    if tensor.dtype().is_int() {
        Ok(())
    } else {
        Err(AttentionError::UnsupportedDType {
            requested: format!("{name} expects an integer dtype, got {:?}", tensor.dtype()),
        })
    }
}

/// Attention inputs must be floating point.
pub fn expect_float(name: &'static str, tensor: &Tensor) -> Result<()> {
    match tensor.dtype() {
        DType::F16 | DType::BF16 | DType::F32 | DType::F64 => Ok(()),
        other => Err(AttentionError::UnsupportedDType {
            requested: format!("{name} expects a float dtype, got {other:?}"),
        }),
    }
}

/// Ensures `tensor` lives on the same device as `reference`.
pub fn expect_same_device(name: &'static str, tensor: &Tensor, reference: &Tensor) -> Result<()> {
    if tensor.device().same_device(reference.device()) {
        Ok(())
    } else {
        Err(AttentionError::DeviceMismatch {
            context: format!("{name} must reside on the same device as q"),
        })
    }
}
