//! Reference scaled dot-product attention.
//!
//! The computation follows `softmax(q · kᵀ / temperature) · v`, with masked
//! scores overwritten by exact `-inf` and optional inverted dropout on the
//! normalised weights while in training mode.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use candle_core::{DType, Tensor, D};
use candle_nn::ops::softmax;

use crate::core::checks::{expect_integer, expect_rank3, expect_same_device};
use crate::core::{Attention, AttentionError, AttentionShape, Config, PrecisionPolicy, Result};
use crate::dropout::DropoutMode;

/// Scaled dot-product attention parameterised by temperature and dropout.
///
/// Starts in training mode; call [`set_training(false)`](Self::set_training)
/// for inference so dropout becomes the identity.
#[derive(Debug)]
pub struct ScaledDotProductAttention {
    config: Config,
    dropout: DropoutMode,
    training: AtomicBool,
    first_call: OnceLock<()>,
}

impl ScaledDotProductAttention {
    /// Builds an attention unit after validating `config`.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let dropout = DropoutMode::from_probability(config.dropout_p, config.seed);
        Ok(Self {
            config,
            dropout,
            training: AtomicBool::new(true),
            first_call: OnceLock::new(),
        })
    }

    /// The configuration this unit was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Temperature dividing the raw scores.
    pub fn temperature(&self) -> f64 {
        self.config.temperature
    }

    /// Enables or disables dropout based on training mode.
    pub fn set_training(&self, training: bool) {
        self.training.store(training, Ordering::Relaxed);
    }

    /// Returns whether dropout is currently applied.
    pub fn is_training(&self) -> bool {
        self.training.load(Ordering::Relaxed)
    }

    fn validate_mask(&self, mask: &Tensor, q: &Tensor, shape: &AttentionShape) -> Result<()> {
        let (mb, mq, mk) = expect_rank3("mask", mask)?;
        expect_same_device("mask", mask, q)?;
        expect_integer("mask", mask)?;
        if mq != shape.q_len || mk != shape.k_len {
            return Err(AttentionError::shape(format!(
                "mask trailing dims [{mq}, {mk}] do not match scores [{}, {}]",
                shape.q_len, shape.k_len
            )));
        }
        if mb != shape.batch && mb != 1 {
            return Err(AttentionError::shape(format!(
                "mask leading dim must be 1 or {}, got {mb}",
                shape.batch
            )));
        }
        Ok(())
    }

    fn compute_dtype(&self, dtype: DType) -> DType {
        match (self.config.precision, dtype) {
            (PrecisionPolicy::ForceF32, DType::F16 | DType::BF16) => DType::F32,
            _ => dtype,
        }
    }
}

fn cast(tensor: &Tensor, dtype: DType) -> Result<Tensor> {
    if tensor.dtype() == dtype {
        Ok(tensor.clone())
    } else {
        Ok(tensor.to_dtype(dtype)?)
    }
}

impl Attention for ScaledDotProductAttention {
    fn attend(
        &self,
        q: &Tensor,
        k: &Tensor,
        v: &Tensor,
        mask: Option<&Tensor>,
    ) -> Result<(Tensor, Tensor)> {
        if self.first_call.set(()).is_ok() {
            log::info!(
                "attention::reference init temperature={} dropout={:?} seed={} precision={:?}",
                self.config.temperature,
                self.config.dropout_p,
                self.config.seed,
                self.config.precision
            );
        }

        let shape = AttentionShape::from_qkv(q, k, v)?;
        if let Some(mask) = mask {
            self.validate_mask(mask, q, &shape)?;
        }

        let dtype = q.dtype();
        let work_dtype = self.compute_dtype(dtype);
        let q_work = cast(q, work_dtype)?;
        let k_work = cast(k, work_dtype)?;
        let v_work = cast(v, work_dtype)?;

        let k_t = k_work.transpose(1, 2)?;
        let scores = q_work.matmul(&k_t)?;
        let mut scores = scores.affine(1.0 / self.config.temperature, 0.0)?;

        if let Some(mask) = mask {
            let mask = mask.broadcast_as(shape.scores())?;
            let neg_inf = Tensor::new(f32::NEG_INFINITY, scores.device())?
                .to_dtype(work_dtype)?
                .broadcast_as(shape.scores())?;
            scores = mask.where_cond(&neg_inf, &scores)?;
        }

        let weights = softmax(&scores, D::Minus1)?;
        let weights = if self.is_training() && self.dropout.is_enabled() {
            log::debug!(
                "attention dropout p={:?} over {:?}",
                self.config.dropout_p,
                shape.scores()
            );
            self.dropout.apply(&weights)?
        } else {
            weights
        };

        let output = weights.matmul(&v_work)?;
        debug_assert_eq!(output.dims3()?, shape.output());

        Ok((cast(&output, dtype)?, cast(&weights, dtype)?))
    }
}
