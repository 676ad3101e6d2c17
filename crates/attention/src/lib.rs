//! Scaled dot-product attention primitives for the transformer project.
//!
//! The crate computes `softmax(q · kᵀ / temperature) · v` over rank-3 tensors
//! whose leading dimension is the caller-flattened `batch * heads`, and builds
//! the suppression masks fed into it.
//!
//! Masks follow a single polarity: a nonzero entry blocks the corresponding
//! key position. Blocked scores become exactly `-inf`, so their softmax weight
//! is exactly zero regardless of the magnitude of the other logits.
//!
//! Dropout is a train-only concern controlled via [`Config::dropout_p`] and a
//! caller-supplied seed. Switch an attention unit to inference with
//! `set_training(false)` when deterministic outputs are required.

pub mod core;
pub mod dropout;
pub mod masks;
pub mod reference;

pub use crate::core::{Attention, AttentionError, Config, PrecisionPolicy, Result};
pub use masks::{causal_mask, key_pad_mask, pad_mask};
pub use reference::ScaledDotProductAttention;
