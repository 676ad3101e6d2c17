//! Error types for position encoders.

use thiserror::Error;

/// Result alias used throughout the embedding crate.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Table geometry or pad index is out of range.
    #[error("invalid embedding config: {0}")]
    InvalidConfig(String),
    /// A tensor handed to the encoder has the wrong rank.
    #[error("invalid rank for {name}: expected {expected}, got {actual}")]
    InvalidRank {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Backend(#[from] candle_core::Error),
}
