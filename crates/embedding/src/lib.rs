//! Embedding crate
//!
//! The positional module exposes the fixed sinusoidal position table and the
//! trainable relative position embedding.

pub mod errors;
pub mod positional;

pub use errors::{EmbeddingError, Result};
pub use positional::*;
