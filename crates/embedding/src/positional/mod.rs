//! Position encoders.
//!
//! [`sinusoid`] holds the pure, deterministic absolute table; [`relative`]
//! holds the clipped relative-distance lookup backed by a trainable matrix.

pub mod relative;
pub mod sinusoid;

pub use relative::{relative_position_indices, RelativePositionConfig, RelativePositionEmbedding};
pub use sinusoid::sinusoid_table;
