//! Roll results and the queries conditions are built on.

use serde::{Deserialize, Serialize};

/// The values produced by one roll, in the order the dice were rolled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    values: Vec<u32>,
}

impl RollResult {
    /// Wrap a sequence of rolled values.
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    /// The rolled values; position `i` is the `i`-th die.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Sum of all values.
    pub fn sum(&self) -> u64 {
        self.values.iter().map(|&v| u64::from(v)).sum()
    }

    /// Whether any die shows `target`.
    pub fn contains(&self, target: u32) -> bool {
        self.values.contains(&target)
    }

    /// Whether every die satisfies `predicate`. True for an empty result.
    pub fn all(&self, predicate: impl Fn(u32) -> bool) -> bool {
        self.values.iter().all(|&v| predicate(v))
    }

    /// Number of dice satisfying `predicate`.
    pub fn count_matching(&self, predicate: impl Fn(u32) -> bool) -> usize {
        self.values.iter().filter(|&&v| predicate(v)).count()
    }

    /// Number of dice in the result.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no dice were rolled.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<u32>> for RollResult {
    fn from(values: Vec<u32>) -> Self {
        Self::new(values)
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}] = {}", values.join(", "), self.sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum() {
        assert_eq!(RollResult::new(vec![2, 3, 4]).sum(), 9);
    }

    #[test]
    fn contains() {
        let r = RollResult::new(vec![2, 3, 4]);
        assert!(r.contains(3));
        assert!(!r.contains(5));
    }

    #[test]
    fn all() {
        assert!(RollResult::new(vec![6, 6, 6]).all(|v| v == 6));
        assert!(!RollResult::new(vec![6, 5, 6]).all(|v| v == 6));
    }

    #[test]
    fn count_matching() {
        let r = RollResult::new(vec![6, 3, 6, 4, 6]);
        assert_eq!(r.count_matching(|v| v == 6), 3);
        assert_eq!(r.count_matching(|v| v > 3), 4);
        assert_eq!(r.count_matching(|v| v == 1), 0);
    }

    #[test]
    fn empty_result() {
        let r = RollResult::default();
        assert_eq!(r.sum(), 0);
        assert_eq!(r.len(), 0);
        assert!(r.is_empty());
        assert!(!r.contains(1));
        assert!(r.all(|v| v == 1));
    }

    #[test]
    fn display() {
        assert_eq!(RollResult::from(vec![3, 5]).to_string(), "[3, 5] = 8");
    }
}
