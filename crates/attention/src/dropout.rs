//! Seeded inverted dropout for attention weights.
//!
//! Each attention unit owns its RNG, seeded from [`Config::seed`], so dropout
//! patterns are reproducible and never drawn from process-wide state.
//!
//! [`Config::seed`]: crate::core::Config::seed

use std::sync::Mutex;

use candle_core::{DType, Tensor};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::core::Result;

/// Dropout policy applied to attention weights.
#[derive(Debug)]
pub enum DropoutMode {
    /// Dropout is disabled (no probability configured, or probability zero).
    Disabled,
    /// Dropout is active and draws keep/drop decisions from a seeded RNG.
    Enabled { probability: f32, rng: Mutex<StdRng> },
}

impl Clone for DropoutMode {
    fn clone(&self) -> Self {
        match self {
            DropoutMode::Disabled => DropoutMode::Disabled,
            DropoutMode::Enabled { probability, rng } => {
                let state = match rng.lock() {
                    Ok(guard) => guard.clone(),
                    Err(poisoned) => poisoned.into_inner().clone(),
                };
                DropoutMode::Enabled {
                    probability: *probability,
                    rng: Mutex::new(state),
                }
            }
        }
    }
}

impl DropoutMode {
    /// Builds a mode from an optional probability; `None` or `0.0` disables dropout.
    ///
    /// The probability is expected to have been validated to lie in `[0, 1)`.
    pub fn from_probability(probability: Option<f32>, seed: u64) -> Self {
        match probability {
            Some(p) if p > 0.0 => DropoutMode::Enabled {
                probability: p,
                rng: Mutex::new(StdRng::seed_from_u64(seed)),
            },
            _ => DropoutMode::Disabled,
        }
    }

    /// Whether this mode can change its input.
    pub fn is_enabled(&self) -> bool {
        matches!(self, DropoutMode::Enabled { .. })
    }

    /// Zeroes each element with the configured probability and rescales the
    /// survivors by `1 / (1 - p)`. Identity when disabled.
    pub fn apply(&self, tensor: &Tensor) -> Result<Tensor> {
        let (probability, rng) = match self {
            DropoutMode::Disabled => return Ok(tensor.clone()),
            DropoutMode::Enabled { probability, rng } => (*probability, rng),
        };

        let keep_prob = 1.0 - probability;
        let scale = 1.0 / keep_prob;
        let total = tensor.elem_count();
        let mask_data = {
            let mut rng = match rng.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            (0..total)
                .map(|_| {
                    if rng.gen::<f32>() < keep_prob {
                        scale
                    } else {
                        0.0
                    }
                })
                .collect::<Vec<f32>>()
        };

        let mask = Tensor::from_vec(mask_data, tensor.dims(), tensor.device())?;
        let mask = if tensor.dtype() == DType::F32 {
            mask
        } else {
            mask.to_dtype(tensor.dtype())?
        };
        Ok(tensor.mul(&mask)?)
    }
}
