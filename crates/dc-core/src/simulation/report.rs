//! The outcome of comparing two scenarios.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which scenario came out ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    /// Scenario A succeeded more often.
    FirstMoreLikely,
    /// Scenario B succeeded more often.
    SecondMoreLikely,
    /// Both succeeded equally often.
    EquallyLikely,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstMoreLikely => write!(f, "Scenario 1 is more likely!"),
            Self::SecondMoreLikely => write!(f, "Scenario 2 is more likely!"),
            Self::EquallyLikely => write!(f, "Both scenarios are equally likely!"),
        }
    }
}

/// Empirical probabilities from one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Trials actually run per scenario.
    pub simulations: u64,
    /// Trials in which scenario A's condition held.
    pub successes_a: u64,
    /// Trials in which scenario B's condition held.
    pub successes_b: u64,
    /// `successes_a / simulations`.
    pub probability_a: f64,
    /// `successes_b / simulations`.
    pub probability_b: f64,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// True if the run was cut short; `simulations` then counts completed trials.
    pub cancelled: bool,
}

impl Comparison {
    pub(crate) fn new(
        simulations: u64,
        successes_a: u64,
        successes_b: u64,
        elapsed: Duration,
        cancelled: bool,
    ) -> Self {
        let total = simulations as f64;
        Self {
            simulations,
            successes_a,
            successes_b,
            probability_a: successes_a as f64 / total,
            probability_b: successes_b as f64 / total,
            elapsed,
            cancelled,
        }
    }

    /// Absolute difference between the two probabilities.
    pub fn difference(&self) -> f64 {
        (self.probability_a - self.probability_b).abs()
    }

    /// Which scenario is more likely.
    pub fn verdict(&self) -> Verdict {
        match self.successes_a.cmp(&self.successes_b) {
            std::cmp::Ordering::Greater => Verdict::FirstMoreLikely,
            std::cmp::Ordering::Less => Verdict::SecondMoreLikely,
            std::cmp::Ordering::Equal => Verdict::EquallyLikely,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probabilities_and_difference() {
        let c = Comparison::new(1000, 250, 100, Duration::from_millis(5), false);
        assert!((c.probability_a - 0.25).abs() < f64::EPSILON);
        assert!((c.probability_b - 0.1).abs() < f64::EPSILON);
        assert!((c.difference() - 0.15).abs() < 1e-12);
    }

    #[test]
    fn verdicts() {
        let d = Duration::ZERO;
        assert_eq!(
            Comparison::new(10, 5, 3, d, false).verdict(),
            Verdict::FirstMoreLikely
        );
        assert_eq!(
            Comparison::new(10, 3, 5, d, false).verdict(),
            Verdict::SecondMoreLikely
        );
        assert_eq!(
            Comparison::new(10, 4, 4, d, false).verdict(),
            Verdict::EquallyLikely
        );
    }

    #[test]
    fn verdict_display() {
        assert_eq!(
            Verdict::FirstMoreLikely.to_string(),
            "Scenario 1 is more likely!"
        );
        assert_eq!(
            Verdict::EquallyLikely.to_string(),
            "Both scenarios are equally likely!"
        );
    }
}
