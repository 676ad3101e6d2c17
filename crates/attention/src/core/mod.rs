//! Core traits and types shared across attention implementations.
//!
//! Implementations operate on rank-3 tensors whose leading dimension is the
//! caller-flattened `batch * heads`: `q [N, Lq, D]`, `k [N, Lk, D]`,
//! `v [N, Lk, Dv]`. Masks are integer tensors shaped `[N or 1, Lq, Lk]` where
//! a nonzero entry marks a key position the query must not attend to.

pub mod checks;
pub mod config;
pub mod errors;
pub mod shape;

use candle_core::Tensor;

pub use config::{Config, PrecisionPolicy};
pub use errors::{AttentionError, Result};
pub use shape::AttentionShape;

/// Unified interface for attention kernels.
///
/// * `q`, `k`, and `v` are rank-3 with a shared leading dimension; `q` and `k`
///   share their feature size and `k` and `v` share their length.
/// * `mask`, when present, is an integer tensor `[N or 1, Lq, Lk]`; truthy
///   entries are driven to `-inf` before the softmax.
/// * Returns `(output [N, Lq, Dv], weights [N, Lq, Lk])`. `weights` is the
///   tensor actually multiplied with `v`, i.e. after dropout.
pub trait Attention {
    /// Compute attention with an optional suppression mask.
    fn attend(
        &self,
        q: &Tensor,
        k: &Tensor,
        v: &Tensor,
        mask: Option<&Tensor>,
    ) -> Result<(Tensor, Tensor)>;
}
