//! Fixed sinusoidal position table.

use candle_core::{Device, Tensor};

use crate::errors::{EmbeddingError, Result};

const BASE: f64 = 10_000.0;

/// Build the `[num_positions, embedding_size]` sinusoidal table.
///
/// Column `i` of row `pos` holds `sin(angle)` for even `i` and `cos(angle)` for
/// odd `i`, with `angle = pos / 10000^(2 * (i / 2) / embedding_size)`. When
/// `pad_id` is given that row is zeroed so lookups at the pad index carry no
/// positional signal.
///
/// The table is a pure function of its arguments and is returned as `f32`.
/// Angles are evaluated in `f64` before narrowing.
pub fn sinusoid_table(
    num_positions: usize,
    embedding_size: usize,
    pad_id: Option<usize>,
    device: &Device,
) -> Result<Tensor> {
    if embedding_size == 0 {
        return Err(EmbeddingError::InvalidConfig(
            "sinusoid table requires embedding_size > 0".into(),
        ));
    }
    if let Some(pad) = pad_id {
        if pad >= num_positions {
            return Err(EmbeddingError::InvalidConfig(format!(
                "pad_id {pad} is outside the table of {num_positions} positions"
            )));
        }
    }

    let inv_freqs: Vec<f64> = (0..embedding_size)
        .map(|idx| {
            let exponent = (2 * (idx / 2)) as f64 / embedding_size as f64;
            BASE.powf(-exponent)
        })
        .collect();

    let mut data = Vec::with_capacity(num_positions * embedding_size);
    for pos in 0..num_positions {
        if Some(pos) == pad_id {
            data.extend(std::iter::repeat(0f32).take(embedding_size));
            continue;
        }
        let pos_f = pos as f64;
        for (idx, &inv_freq) in inv_freqs.iter().enumerate() {
            let angle = pos_f * inv_freq;
            let value = if idx % 2 == 0 { angle.sin() } else { angle.cos() };
            data.push(value as f32);
        }
    }

    log::debug!(
        "sinusoid table built: positions={num_positions} size={embedding_size} pad={pad_id:?}"
    );
    Ok(Tensor::from_vec(data, (num_positions, embedding_size), device)?)
}
