//! The target of a roll condition.

use serde::{Deserialize, Serialize};

/// A condition's target value, with a match count for count-matching conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionValue {
    /// The face or sum the condition compares against.
    pub value: i64,
    /// How many dice must show `value`. Only set for count-matching conditions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl ConditionValue {
    /// A bare target value with no count.
    pub fn new(value: i64) -> Self {
        Self { value, count: None }
    }

    /// A target value that must appear exactly `count` times.
    pub fn with_count(value: i64, count: u32) -> Self {
        Self {
            value,
            count: Some(count),
        }
    }
}

impl std::fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.count {
            Some(count) => {
                let times = if count == 1 { "time" } else { "times" };
                write!(f, "{count} {times} the value {}", self.value)
            }
            None => write!(f, "{}", self.value),
        }
    }
}
