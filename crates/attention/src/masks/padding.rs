//! Builders for padding masks.

use candle_core::{DType, Tensor};

use crate::core::checks::{expect_integer, expect_rank2};
use crate::core::{AttentionError, Result};

fn pad_tensor(sequence: &Tensor, pad_id: u32) -> Result<Tensor> {
    // Casting a pad id the dtype cannot hold would wrap it onto a real token.
    if sequence.dtype() == DType::U8 && pad_id > u32::from(u8::MAX) {
        return Err(AttentionError::config(format!(
            "pad_id {pad_id} does not fit sequence dtype u8"
        )));
    }
    let pad = Tensor::full(pad_id, sequence.dims(), sequence.device())?;
    if pad.dtype() == sequence.dtype() {
        Ok(pad)
    } else {
        Ok(pad.to_dtype(sequence.dtype())?)
    }
}

/// Multiplicative mask `[batch, len, 1]` that is `1.0` on real tokens and
/// `0.0` where `sequence == pad_id`.
///
/// Fails with [`InvalidRank`](crate::AttentionError::InvalidRank) unless
/// `sequence` is `[batch, len]`, and with
/// [`InvalidConfig`](crate::AttentionError::InvalidConfig) when `pad_id` is
/// not representable in the sequence dtype.
pub fn pad_mask(sequence: &Tensor, pad_id: u32) -> Result<Tensor> {
    expect_rank2("sequence", sequence)?;
    expect_integer("sequence", sequence)?;

    let pad = pad_tensor(sequence, pad_id)?;
    let keep = sequence.ne(&pad)?.to_dtype(DType::F32)?;
    Ok(keep.unsqueeze(2)?)
}

/// Suppression mask `[batch, q_len, k_len]` blocking padded keys.
///
/// Entry `[b, i, j]` is `1` when `key_seq[b, j] == pad_id`, for every query
/// position `i`. Only the length of `query_seq` is read.
pub fn key_pad_mask(key_seq: &Tensor, query_seq: &Tensor, pad_id: u32) -> Result<Tensor> {
    let (batch, k_len) = expect_rank2("key_seq", key_seq)?;
    let (_, q_len) = expect_rank2("query_seq", query_seq)?;
    expect_integer("key_seq", key_seq)?;

    let pad = pad_tensor(key_seq, pad_id)?;
    let is_pad = key_seq.eq(&pad)?;
    log::debug!("key padding mask built: batch={batch} q_len={q_len} k_len={k_len}");
    Ok(is_pad
        .unsqueeze(1)?
        .broadcast_as((batch, q_len, k_len))?
        .contiguous()?)
}
