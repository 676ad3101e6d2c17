//! Portable, exact implementation of scaled dot-product attention.
//!
//! This path favours clarity over absolute performance and serves as the
//! baseline for validating optimised kernels.

pub mod exact;

pub use exact::ScaledDotProductAttention;
