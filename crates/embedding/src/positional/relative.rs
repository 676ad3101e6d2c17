//! Clipped relative position embeddings.
//!
//! A pair of positions `(i, j)` is mapped to the signed distance `i - j`,
//! clipped to `[-max_relative_pos, max_relative_pos]` and shifted to a
//! non-negative bucket. Buckets index rows of a trainable
//! `[2 * max_relative_pos + 1, embedding_size]` matrix owned by
//! [`RelativePositionEmbedding`].

use candle_core::{DType, Device, Tensor, Var};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::errors::{EmbeddingError, Result};

/// Configuration for building a relative position embedding.
#[derive(Debug, Clone)]
pub struct RelativePositionConfig {
    /// Dimensionality of each embedding vector.
    pub embedding_size: usize,
    /// Distances beyond this window collapse onto the boundary bucket.
    pub max_relative_pos: usize,
    /// Seed for the uniform `[0, 1)` initialisation of the matrix.
    pub seed: u64,
    /// Storage dtype used for the matrix and the gathered tables.
    pub dtype: DType,
    /// Device hosting the matrix.
    pub device: Device,
}

impl RelativePositionConfig {
    /// `f32` CPU configuration with seed `0`.
    pub fn new(embedding_size: usize, max_relative_pos: usize) -> Self {
        Self {
            embedding_size,
            max_relative_pos,
            seed: 0,
            dtype: DType::F32,
            device: Device::Cpu,
        }
    }

    /// Number of rows in the embedding matrix (`2 * max_relative_pos + 1`).
    pub fn num_buckets(&self) -> usize {
        2 * self.max_relative_pos + 1
    }
}

/// Bucket indices `[num_positions, num_positions]` (`u32`) for every pair of
/// positions: `clamp(i - j, -max_relative_pos, max_relative_pos) + max_relative_pos`.
pub fn relative_position_indices(
    num_positions: usize,
    max_relative_pos: usize,
    device: &Device,
) -> Result<Tensor> {
    if max_relative_pos > (u32::MAX as usize - 1) / 2 {
        return Err(EmbeddingError::InvalidConfig(format!(
            "max_relative_pos {max_relative_pos} exceeds the u32 bucket range"
        )));
    }
    let max = max_relative_pos as i64;

    let mut data = Vec::with_capacity(num_positions * num_positions);
    for i in 0..num_positions as i64 {
        for j in 0..num_positions as i64 {
            let clipped = (i - j).clamp(-max, max);
            data.push((clipped + max) as u32);
        }
    }
    Ok(Tensor::from_vec(data, (num_positions, num_positions), device)?)
}

/// Trainable relative position lookup.
///
/// The matrix is a [`Var`] with a stable identity for the lifetime of the
/// struct, so optimisers holding it (via [`named_parameters`]) see every
/// update. Tables gathered from it stay differentiable w.r.t. the matrix.
///
/// [`named_parameters`]: RelativePositionEmbedding::named_parameters
#[derive(Debug, Clone)]
pub struct RelativePositionEmbedding {
    config: RelativePositionConfig,
    weight: Var,
}

impl RelativePositionEmbedding {
    /// Builds the matrix and samples it uniformly from `[0, 1)` using the
    /// configured seed.
    pub fn new(config: RelativePositionConfig) -> Result<Self> {
        if config.embedding_size == 0 {
            return Err(EmbeddingError::InvalidConfig(
                "relative embedding requires embedding_size > 0".into(),
            ));
        }

        let rows = config.num_buckets();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let data: Vec<f32> = (0..rows * config.embedding_size)
            .map(|_| rng.gen::<f32>())
            .collect();
        let initial = Tensor::from_vec(data, (rows, config.embedding_size), &config.device)?;
        let initial = if config.dtype == DType::F32 {
            initial
        } else {
            initial.to_dtype(config.dtype)?
        };

        log::debug!(
            "relative embedding initialised: buckets={rows} size={} seed={}",
            config.embedding_size,
            config.seed
        );
        Ok(Self {
            weight: Var::from_tensor(&initial)?,
            config,
        })
    }

    /// Wraps an existing `[2 * max_relative_pos + 1, embedding_size]` matrix,
    /// e.g. one restored from a checkpoint.
    pub fn from_weight(weight: &Tensor, max_relative_pos: usize) -> Result<Self> {
        let (rows, embedding_size) = match weight.dims() {
            [rows, cols] => (*rows, *cols),
            dims => {
                return Err(EmbeddingError::InvalidRank {
                    name: "weight",
                    expected: 2,
                    actual: dims.len(),
                })
            }
        };
        let config = RelativePositionConfig {
            embedding_size,
            max_relative_pos,
            seed: 0,
            dtype: weight.dtype(),
            device: weight.device().clone(),
        };
        if rows != config.num_buckets() || embedding_size == 0 {
            return Err(EmbeddingError::InvalidConfig(format!(
                "weight shaped [{rows}, {embedding_size}] does not match {} buckets",
                config.num_buckets()
            )));
        }
        Ok(Self {
            weight: Var::from_tensor(weight)?,
            config,
        })
    }

    /// Returns the embedding configuration.
    pub fn config(&self) -> &RelativePositionConfig {
        &self.config
    }

    /// Returns a clone of the underlying weight tensor.
    pub fn weight(&self) -> Tensor {
        self.weight.as_tensor().clone()
    }

    /// The trainable matrix itself.
    pub fn var(&self) -> &Var {
        &self.weight
    }

    /// Returns the trainable parameters with an optional scope prefix.
    pub fn named_parameters(&self, scope: &str) -> Vec<(String, Var)> {
        let prefix = if scope.is_empty() {
            "relative_position"
        } else {
            scope
        };
        vec![(format!("{prefix}.weight"), self.weight.clone())]
    }

    /// Gathers the `[num_positions, num_positions, embedding_size]` relative
    /// table from the current matrix.
    pub fn table(&self, num_positions: usize) -> Result<Tensor> {
        if num_positions == 0 {
            return Err(EmbeddingError::InvalidConfig(
                "relative table requires num_positions > 0".into(),
            ));
        }
        let indices = relative_position_indices(
            num_positions,
            self.config.max_relative_pos,
            &self.config.device,
        )?;
        let flat = indices.flatten_all()?;
        let gathered = self.weight.as_tensor().index_select(&flat, 0)?;
        Ok(gathered.reshape((num_positions, num_positions, self.config.embedding_size))?)
    }
}
