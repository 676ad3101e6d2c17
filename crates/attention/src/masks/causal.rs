//! Builders for causal (subsequent-position) masks.

use candle_core::Tensor;

use crate::core::checks::{expect_integer, expect_rank2};
use crate::core::Result;

/// Construct the causal mask for a `[batch, len]` token sequence.
///
/// The result is a [`MASK_DTYPE`](super::MASK_DTYPE) tensor shaped
/// `[batch, len, len]` with `mask[b, i, j] = (j > i)`: query `i` may only see
/// keys at or before position `i`. Only the shape of `sequence` is read, but
/// it must still hold integer token ids like the input of the padding
/// builders, so a float tensor passed by mistake is reported as
/// [`UnsupportedDType`](crate::AttentionError::UnsupportedDType).
pub fn causal_mask(sequence: &Tensor) -> Result<Tensor> {
    let (batch, len) = expect_rank2("sequence", sequence)?;
    expect_integer("sequence", sequence)?;

    let mut data = vec![0u8; len * len];
    for q in 0..len {
        let row_start = q * len;
        for k in (q + 1)..len {
            data[row_start + k] = 1;
        }
    }

    log::debug!("causal mask built: batch={batch} len={len}");
    let mask = Tensor::from_vec(data, (1, len, len), sequence.device())?;
    Ok(mask.broadcast_as((batch, len, len))?.contiguous()?)
}
