//! Monte Carlo comparison of two scenarios.
//!
//! A run is split into batches of [`SimConfig::batch_size`] trials, plus one
//! shorter batch for the remainder. Batches run in parallel on a rayon pool.
//! Each batch owns a `StdRng` seeded from the run's base seed and the batch
//! index, so no generator is shared between workers and a seeded run gives
//! the same counts on any number of threads. Batch totals are merged into
//! atomic counters.

pub mod config;
pub mod report;

pub use config::{DEFAULT_BATCH_SIZE, DEFAULT_SIMULATIONS, SimConfig};
pub use report::{Comparison, Verdict};

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::condition::RollCondition;
use crate::dice::DiceRoll;
use crate::error::{DiceError, DiceResult};

/// Odd constant spreading batch indices across the seed space.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// A dice configuration paired with the condition it has to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scenario {
    /// The dice rolled each trial.
    pub dice: DiceRoll,
    /// The condition a trial's roll must satisfy to count as a success.
    pub condition: RollCondition,
}

impl Scenario {
    /// Pair dice with a condition.
    pub fn new(dice: DiceRoll, condition: RollCondition) -> Self {
        Self { dice, condition }
    }

    /// Roll once and report whether the condition held.
    pub fn trial<R: Rng>(&self, rng: &mut R) -> bool {
        self.condition.evaluate(&self.dice.roll(rng))
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} with condition {}", self.dice, self.condition)
    }
}

/// Compare two scenarios over `simulations` trials with default settings.
pub fn simulate(a: &Scenario, b: &Scenario, simulations: u64) -> DiceResult<Comparison> {
    Simulator::new(SimConfig::default().with_simulations(simulations)).run(a, b)
}

/// Runs scenario comparisons under a fixed [`SimConfig`].
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimConfig,
}

impl Simulator {
    /// Create a simulator.
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// The configuration runs use.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run every batch and return both empirical probabilities.
    pub fn run(&self, a: &Scenario, b: &Scenario) -> DiceResult<Comparison> {
        self.execute(a, b, None)
    }

    /// Like [`Simulator::run`], but stops starting new batches once `cancel`
    /// is set.
    ///
    /// Batches already in flight finish and are counted. Probabilities are
    /// then computed over the completed trials only, and the report is marked
    /// as cancelled. Fails with [`DiceError::Cancelled`] if no batch finished.
    pub fn run_with_cancel(
        &self,
        a: &Scenario,
        b: &Scenario,
        cancel: &AtomicBool,
    ) -> DiceResult<Comparison> {
        self.execute(a, b, Some(cancel))
    }

    fn execute(
        &self,
        a: &Scenario,
        b: &Scenario,
        cancel: Option<&AtomicBool>,
    ) -> DiceResult<Comparison> {
        self.config.validate()?;

        let pool = match self.config.threads {
            0 => None,
            n => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| DiceError::WorkerPool(e.to_string()))?,
            ),
        };

        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        let batches = self.config.batch_count();
        debug!(
            simulations = self.config.simulations,
            batch_size = self.config.batch_size,
            batches,
            threads = self.config.threads,
            seeded = self.config.seed.is_some(),
            "starting simulation"
        );

        let tally = Tally::default();
        let start = Instant::now();
        let work = || {
            (0..batches).into_par_iter().for_each(|index| {
                if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
                    return;
                }
                let len = self.config.batch_len(index);
                let mut rng = batch_rng(base_seed, index);
                let (hits_a, hits_b) = run_batch(a, b, len, &mut rng);
                trace!(batch = index, len, hits_a, hits_b, "batch complete");
                tally.record(len, hits_a, hits_b);
            });
        };
        match &pool {
            Some(pool) => pool.install(work),
            None => work(),
        }
        let elapsed = start.elapsed();

        let (trials, successes_a, successes_b) = tally.into_counts();
        if trials == 0 {
            warn!("simulation cancelled before any batch completed");
            return Err(DiceError::Cancelled);
        }
        let cancelled = trials < self.config.simulations;
        if cancelled {
            warn!(
                completed = trials,
                requested = self.config.simulations,
                "simulation cancelled, using completed trials"
            );
        }
        info!(
            simulations = trials,
            successes_a,
            successes_b,
            elapsed_ms = elapsed.as_millis() as u64,
            "simulation finished"
        );

        Ok(Comparison::new(
            trials,
            successes_a,
            successes_b,
            elapsed,
            cancelled,
        ))
    }
}

/// Success counters shared by all batches of one run.
#[derive(Debug, Default)]
struct Tally {
    trials: AtomicU64,
    successes_a: AtomicU64,
    successes_b: AtomicU64,
}

impl Tally {
    fn record(&self, trials: u64, hits_a: u64, hits_b: u64) {
        self.trials.fetch_add(trials, Ordering::Relaxed);
        self.successes_a.fetch_add(hits_a, Ordering::Relaxed);
        self.successes_b.fetch_add(hits_b, Ordering::Relaxed);
    }

    fn into_counts(self) -> (u64, u64, u64) {
        (
            self.trials.into_inner(),
            self.successes_a.into_inner(),
            self.successes_b.into_inner(),
        )
    }
}

fn batch_rng(base_seed: u64, index: u64) -> StdRng {
    StdRng::seed_from_u64(base_seed ^ index.wrapping_mul(SEED_STRIDE))
}

fn run_batch(a: &Scenario, b: &Scenario, len: u64, rng: &mut StdRng) -> (u64, u64) {
    let mut hits_a = 0;
    let mut hits_b = 0;
    for _ in 0..len {
        if a.trial(rng) {
            hits_a += 1;
        }
        if b.trial(rng) {
            hits_b += 1;
        }
    }
    (hits_a, hits_b)
}
