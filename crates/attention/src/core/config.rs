//! Configuration options for scaled dot-product attention.
//!
//! The [`Config`] struct captures the knobs a caller tunes per attention unit:
//! the softmax temperature, the dropout rate applied to attention weights, the
//! seed feeding the dropout RNG, and the precision policy used for the score
//! computation.

use serde::Deserialize;

use super::errors::{AttentionError, Result};

/// Dtype handling for the score and softmax computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionPolicy {
    /// Promote `f16`/`bf16` inputs to `f32`, casting results back afterwards.
    #[default]
    ForceF32,
    /// Compute directly in the dtype of the inputs.
    Inherit,
}

/// Configuration driving attention behaviour.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Divisor applied to raw `q · kᵀ` scores. Typically `sqrt(head_dim)`.
    pub temperature: f64,
    /// Probability for dropout applied to attention weights during training.
    ///
    /// When `None`, dropout is disabled and the computation is deterministic.
    pub dropout_p: Option<f32>,
    /// Seed for the dropout RNG owned by the attention unit.
    pub seed: u64,
    /// Dtype policy for the score computation.
    pub precision: PrecisionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            dropout_p: None,
            seed: 0,
            precision: PrecisionPolicy::default(),
        }
    }
}

impl Config {
    /// Configuration with `temperature = sqrt(head_dim)` and no dropout.
    pub fn for_head_dim(head_dim: usize) -> Self {
        Self {
            temperature: (head_dim as f64).sqrt(),
            ..Self::default()
        }
    }

    /// Sets the dropout probability.
    pub fn with_dropout(mut self, dropout_p: f32) -> Self {
        self.dropout_p = Some(dropout_p);
        self
    }

    /// Sets the dropout RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the temperature and dropout ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(AttentionError::config(format!(
                "temperature must be a positive finite number, got {}",
                self.temperature
            )));
        }
        if let Some(p) = self.dropout_p {
            if !(0.0..1.0).contains(&p) {
                return Err(AttentionError::config(format!(
                    "dropout probability must be in [0, 1), got {p}"
                )));
            }
        }
        Ok(())
    }

    /// Layers `ATTENTION_*` environment variables on top of this config.
    ///
    /// - `ATTENTION_DROPOUT`: dropout probability; `none` or `0` disables it.
    /// - `ATTENTION_SEED`: dropout RNG seed.
    /// - `ATTENTION_PRECISION`: `f32` or `inherit`.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    pub(crate) fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("ATTENTION_DROPOUT") {
            let raw = raw.trim();
            if raw.eq_ignore_ascii_case("none") {
                self.dropout_p = None;
            } else {
                match raw.parse::<f32>() {
                    Ok(p) if p == 0.0 => self.dropout_p = None,
                    Ok(p) => self.dropout_p = Some(p),
                    Err(_) => log::warn!("ignoring unparseable ATTENTION_DROPOUT={raw:?}"),
                }
            }
        }

        if let Some(raw) = lookup("ATTENTION_SEED") {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.seed = seed,
                Err(_) => log::warn!("ignoring unparseable ATTENTION_SEED={raw:?}"),
            }
        }

        if let Some(raw) = lookup("ATTENTION_PRECISION") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "f32" | "force_f32" => self.precision = PrecisionPolicy::ForceF32,
                "inherit" => self.precision = PrecisionPolicy::Inherit,
                other => log::warn!("ignoring unknown ATTENTION_PRECISION={other:?}"),
            }
        }
    }
}
