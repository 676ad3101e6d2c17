//! Mask builders for attention inputs.
//!
//! Suppression masks ([`key_pad_mask`], [`causal_mask`]) are `u8` tensors
//! shaped `[batch, q_len, k_len]` where `1` blocks a key position and `0`
//! leaves it visible. The attention kernels overwrite blocked scores with
//! `-inf`. Callers needing both padding and causality combine the two with an
//! elementwise `maximum` (logical OR); nothing here merges them.
//!
//! [`pad_mask`] is different: it is an `f32` multiplier `[batch, len, 1]`
//! that is `1.0` on real tokens and `0.0` on padding.

pub mod causal;
pub mod padding;

use candle_core::DType;

/// Dtype shared by all suppression masks.
pub const MASK_DTYPE: DType = DType::U8;

pub use causal::causal_mask;
pub use padding::{key_pad_mask, pad_mask};
