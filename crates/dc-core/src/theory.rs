//! Exact probabilities for a scenario.
//!
//! Sum conditions use the distribution of the dice total, built one die at a
//! time with a sliding-window convolution. Face conditions use the binomial
//! distribution of how many dice show the target face.

use crate::condition::ConditionKind;
use crate::simulation::Scenario;

/// Upper bound on `count * max_sum` cells for the sum distribution.
const MAX_SUM_WORK: u64 = 50_000_000;

/// The exact probability that one trial of `scenario` succeeds.
///
/// Returns `None` for sum conditions whose distribution would be too large
/// to compute.
pub fn probability(scenario: &Scenario) -> Option<f64> {
    let sides = scenario.dice.sides();
    let count = scenario.dice.count();
    let value = scenario.condition.value();
    let target = value.value;

    let face_p = if (1..=i64::from(sides)).contains(&target) {
        1.0 / f64::from(sides)
    } else {
        0.0
    };

    match scenario.condition.kind() {
        ConditionKind::SumEquals => {
            sum_distribution(sides, count).map(|dist| sum_where(&dist, |t| t == target))
        }
        ConditionKind::SumGreaterThan => {
            sum_distribution(sides, count).map(|dist| sum_where(&dist, |t| t > target))
        }
        ConditionKind::SumLessThan => {
            sum_distribution(sides, count).map(|dist| sum_where(&dist, |t| t < target))
        }
        ConditionKind::AtLeastOne => Some(1.0 - (1.0 - face_p).powf(f64::from(count))),
        ConditionKind::All => Some(face_p.powf(f64::from(count))),
        ConditionKind::CountMatching => value
            .count
            .map(|k| binomial_pmf(u64::from(count), u64::from(k), face_p)),
    }
}

/// `dist[t]` is the probability that `count` dice with `sides` faces total `t`.
fn sum_distribution(sides: u32, count: u32) -> Option<Vec<f64>> {
    let max_sum = u64::from(sides) * u64::from(count);
    if u64::from(count).saturating_mul(max_sum) > MAX_SUM_WORK {
        return None;
    }

    let sides = sides as usize;
    let inv = 1.0 / sides as f64;
    let mut dist = vec![1.0];
    for _ in 0..count {
        let mut next = vec![0.0; dist.len() + sides];
        let mut window = 0.0;
        for (t, slot) in next.iter_mut().enumerate() {
            // window = sum of dist[t - sides ..= t - 1]
            if let Some(p) = t.checked_sub(1).and_then(|i| dist.get(i)) {
                window += p;
            }
            if let Some(p) = t.checked_sub(sides + 1).and_then(|i| dist.get(i)) {
                window -= p;
            }
            *slot = window * inv;
        }
        dist = next;
    }
    Some(dist)
}

fn sum_where(dist: &[f64], keep: impl Fn(i64) -> bool) -> f64 {
    dist.iter()
        .enumerate()
        .filter(|(t, _)| keep(*t as i64))
        .map(|(_, p)| p)
        .sum()
}

fn binomial_pmf(n: u64, k: u64, p: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    if p == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }
    let k_small = k.min(n - k);
    let ln_choose: f64 = (0..k_small)
        .map(|i| ((n - i) as f64).ln() - ((i + 1) as f64).ln())
        .sum();
    (ln_choose + k as f64 * p.ln() + (n - k) as f64 * (1.0 - p).ln()).exp()
}
