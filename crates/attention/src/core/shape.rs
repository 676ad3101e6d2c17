//! Logical description of a validated attention invocation.

use candle_core::Tensor;

use super::checks::{expect_float, expect_rank3, expect_same_device};
use super::errors::{AttentionError, Result};

/// Dimensions shared by `q`, `k`, and `v` once they have been checked against
/// each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttentionShape {
    /// Flattened `batch * heads` leading dimension.
    pub batch: usize,
    /// Number of query positions.
    pub q_len: usize,
    /// Number of key/value positions.
    pub k_len: usize,
    /// Feature size shared by queries and keys.
    pub head_dim: usize,
    /// Feature size of values (and of the output).
    pub value_dim: usize,
}

impl AttentionShape {
    /// Validates `q [N, Lq, D]`, `k [N, Lk, D]`, `v [N, Lk, Dv]`.
    pub fn from_qkv(q: &Tensor, k: &Tensor, v: &Tensor) -> Result<Self> {
        let (batch, q_len, head_dim) = expect_rank3("q", q)?;
        let (kb, k_len, kd) = expect_rank3("k", k)?;
        let (vb, vk, value_dim) = expect_rank3("v", v)?;

        expect_same_device("k", k, q)?;
        expect_same_device("v", v, q)?;
        expect_float("q", q)?;
        if k.dtype() != q.dtype() || v.dtype() != q.dtype() {
            return Err(AttentionError::UnsupportedDType {
                requested: format!(
                    "q, k, v must share a dtype, got {:?}, {:?}, {:?}",
                    q.dtype(),
                    k.dtype(),
                    v.dtype()
                ),
            });
        }

        if kb != batch || vb != batch {
            return Err(AttentionError::shape(format!(
                "leading dimension differs across q/k/v: {batch}, {kb}, {vb}"
            )));
        }
        if kd != head_dim {
            return Err(AttentionError::shape(format!(
                "q feature size {head_dim} does not match k feature size {kd}"
            )));
        }
        if vk != k_len {
            return Err(AttentionError::shape(format!(
                "v length {vk} does not match k length {k_len}"
            )));
        }

        Ok(Self {
            batch,
            q_len,
            k_len,
            head_dim,
            value_dim,
        })
    }

    /// Shape of the attention score and weight tensors.
    pub fn scores(&self) -> (usize, usize, usize) {
        (self.batch, self.q_len, self.k_len)
    }

    /// Shape of the attention output.
    pub fn output(&self) -> (usize, usize, usize) {
        (self.batch, self.q_len, self.value_dim)
    }
}
