//! Monte Carlo dice probability engine for DiceCheck.
//!
//! Provides dice rolling, a closed set of roll conditions, and a parallel
//! simulator that estimates how often each of two scenarios succeeds.
//! Exact probabilities are available from [`theory`] for comparison.

pub mod condition;
pub mod dice;
pub mod error;
pub mod simulation;
pub mod theory;

pub use condition::{ConditionKind, ConditionValue, RollCondition};
pub use dice::{DiceRoll, RollResult, roll};
pub use error::{DiceError, DiceResult};
pub use simulation::{
    Comparison, DEFAULT_BATCH_SIZE, DEFAULT_SIMULATIONS, Scenario, SimConfig, Simulator, Verdict,
    simulate,
};
