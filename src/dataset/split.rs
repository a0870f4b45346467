//! Train/validation/test split assignment.

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::config::ConfigError;
use crate::core::errors::SegResult;

/// The dataset split a slice is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSplit {
    Train,
    Validation,
    Test,
}

impl DatasetSplit {
    /// All splits, in sampling-weight order.
    pub const ALL: [DatasetSplit; 3] = [
        DatasetSplit::Train,
        DatasetSplit::Validation,
        DatasetSplit::Test,
    ];

    /// Directory name for this split.
    pub fn dir_name(&self) -> &'static str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Validation => "validation",
            DatasetSplit::Test => "test",
        }
    }
}

impl std::fmt::Display for DatasetSplit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Samples split assignments with fixed weights from a seeded source.
pub struct SplitSampler {
    dist: WeightedIndex<f64>,
    rng: StdRng,
}

impl SplitSampler {
    /// Default split weights: 80% train, 10% validation, 10% test.
    pub const DEFAULT_WEIGHTS: [f64; 3] = [0.8, 0.1, 0.1];

    /// Creates a sampler with the given weights (train, validation, test).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the weights are unusable (all zero,
    /// negative, or non-finite).
    pub fn new(weights: [f64; 3], seed: u64) -> SegResult<Self> {
        let dist = WeightedIndex::new(weights.iter()).map_err(|e| ConfigError::InvalidConfig {
            message: format!("invalid split weights {:?}: {}", weights, e),
        })?;
        Ok(Self {
            dist,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Creates a sampler with the default 0.8/0.1/0.1 weights.
    pub fn with_default_weights(seed: u64) -> Self {
        // The default weights are statically valid.
        Self::new(Self::DEFAULT_WEIGHTS, seed)
            .unwrap_or_else(|_| unreachable!("default split weights are valid"))
    }

    /// Draws the split for the next slice.
    pub fn sample(&mut self) -> DatasetSplit {
        DatasetSplit::ALL[self.dist.sample(&mut self.rng)]
    }
}
