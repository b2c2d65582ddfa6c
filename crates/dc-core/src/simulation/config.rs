//! Configuration for a simulation run.

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};

/// Trials run when the caller does not specify a count.
pub const DEFAULT_SIMULATIONS: u64 = 1_000_000;

/// Trials per parallel batch.
pub const DEFAULT_BATCH_SIZE: u64 = 10_000;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Total number of trials per scenario.
    pub simulations: u64,
    /// Trials per batch. The last batch holds the remainder.
    pub batch_size: u64,
    /// Base RNG seed. `None` draws a fresh seed for every run.
    pub seed: Option<u64>,
    /// Worker threads. 0 = rayon's global pool.
    pub threads: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            simulations: DEFAULT_SIMULATIONS,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            threads: 0,
        }
    }
}

impl SimConfig {
    /// Set the number of trials per scenario.
    pub fn with_simulations(mut self, simulations: u64) -> Self {
        self.simulations = simulations;
        self
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Fix the base RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run on a dedicated pool of `threads` workers (0 = global pool).
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Check that the configuration can drive a run.
    pub fn validate(&self) -> DiceResult<()> {
        if self.simulations == 0 {
            return Err(DiceError::InvalidArgument(
                "number of simulations must be positive".into(),
            ));
        }
        if self.batch_size == 0 {
            return Err(DiceError::InvalidArgument(
                "batch size must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Number of batches: full batches plus one for the remainder, if any.
    pub fn batch_count(&self) -> u64 {
        self.simulations.div_ceil(self.batch_size)
    }

    /// Trials in batch `index`. Only the last batch may be short.
    pub fn batch_len(&self, index: u64) -> u64 {
        let start = index.saturating_mul(self.batch_size);
        self.batch_size.min(self.simulations.saturating_sub(start))
    }
}
