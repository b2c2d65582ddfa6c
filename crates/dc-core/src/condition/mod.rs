//! Conditions evaluated against a roll.
//!
//! The set of condition kinds is closed:
//! - **Sum** comparisons: the total equals, exceeds, or falls below a target
//! - **At least one**: some die shows the target face
//! - **All**: every die shows the target face
//! - **Count matching**: exactly `n` dice show the target face

pub mod value;

pub use value::ConditionValue;

use serde::{Deserialize, Serialize};

use crate::dice::RollResult;
use crate::error::{DiceError, DiceResult};

/// The kind of test a [`RollCondition`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionKind {
    /// The sum of all dice equals the target.
    SumEquals,
    /// The sum of all dice is greater than the target.
    SumGreaterThan,
    /// The sum of all dice is less than the target.
    SumLessThan,
    /// At least one die shows the target.
    AtLeastOne,
    /// Every die shows the target.
    All,
    /// Exactly `count` dice show the target.
    CountMatching,
}

impl ConditionKind {
    /// Every kind, in declaration order. The position is the kind's index.
    pub const ALL: [Self; 6] = [
        Self::SumEquals,
        Self::SumGreaterThan,
        Self::SumLessThan,
        Self::AtLeastOne,
        Self::All,
        Self::CountMatching,
    ];

    /// The kind's canonical name, e.g. `"SumGreaterThan"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::SumEquals => "SumEquals",
            Self::SumGreaterThan => "SumGreaterThan",
            Self::SumLessThan => "SumLessThan",
            Self::AtLeastOne => "AtLeastOne",
            Self::All => "All",
            Self::CountMatching => "CountMatching",
        }
    }

    /// The kind's position in [`ConditionKind::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).unwrap_or_default()
    }

    /// Look up a kind by its position in [`ConditionKind::ALL`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Whether conditions of this kind need a match count.
    pub fn requires_count(self) -> bool {
        self == Self::CountMatching
    }
}

impl std::fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ConditionKind {
    type Err = DiceError;

    /// Parse a kind name case-insensitively, ignoring `_` and `-`
    /// (`"sumEquals"`, `"SUM_EQUALS"`), or a numeric index (`"0"`).
    fn from_str(s: &str) -> DiceResult<Self> {
        let trimmed = s.trim();
        let unknown = || DiceError::InvalidCondition(format!("unknown condition type: {s}"));

        if let Ok(index) = trimmed.parse::<usize>() {
            return Self::from_index(index).ok_or_else(unknown);
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name().to_lowercase() == normalized)
            .ok_or_else(unknown)
    }
}

/// A predicate over a roll: a kind plus the value it tests against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCondition", into = "RawCondition")]
pub struct RollCondition {
    kind: ConditionKind,
    value: ConditionValue,
}

#[derive(Clone, Serialize, Deserialize)]
struct RawCondition {
    kind: ConditionKind,
    value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
}

impl TryFrom<RawCondition> for RollCondition {
    type Error = DiceError;

    fn try_from(raw: RawCondition) -> DiceResult<Self> {
        Self::new(
            raw.kind,
            ConditionValue {
                value: raw.value,
                count: raw.count,
            },
        )
    }
}

impl From<RollCondition> for RawCondition {
    fn from(condition: RollCondition) -> Self {
        Self {
            kind: condition.kind,
            value: condition.value.value,
            count: condition.value.count,
        }
    }
}

impl RollCondition {
    /// Create a condition.
    ///
    /// Count-matching conditions must carry a count. Any count supplied for
    /// another kind is dropped.
    pub fn new(kind: ConditionKind, value: ConditionValue) -> DiceResult<Self> {
        if kind.requires_count() {
            if value.count.is_none() {
                return Err(DiceError::InvalidCondition(
                    "count is required for CountMatching condition".into(),
                ));
            }
            return Ok(Self { kind, value });
        }
        Ok(Self {
            kind,
            value: ConditionValue::new(value.value),
        })
    }

    /// Create a condition that takes no count.
    pub fn simple(kind: ConditionKind, value: i64) -> DiceResult<Self> {
        Self::new(kind, ConditionValue::new(value))
    }

    /// Exactly `count` dice must show `value`.
    pub fn count_matching(count: u32, value: i64) -> Self {
        Self {
            kind: ConditionKind::CountMatching,
            value: ConditionValue::with_count(value, count),
        }
    }

    /// Build a condition from loosely typed input: a kind name or index, a
    /// target value, and an optional signed count.
    pub fn parse(kind: &str, value: i64, count: Option<i64>) -> DiceResult<Self> {
        let kind: ConditionKind = kind.parse()?;
        let count = match count {
            Some(n) if kind.requires_count() => Some(u32::try_from(n).map_err(|_| {
                DiceError::InvalidCondition(format!("count must be between 0 and {}", u32::MAX))
            })?),
            Some(_) | None => None,
        };
        Self::new(kind, ConditionValue { value, count })
    }

    /// The kind of test.
    pub fn kind(&self) -> ConditionKind {
        self.kind
    }

    /// The target value (and count, for count-matching).
    pub fn value(&self) -> ConditionValue {
        self.value
    }

    /// Whether `result` satisfies the condition.
    pub fn evaluate(&self, result: &RollResult) -> bool {
        let target = self.value.value;
        match self.kind {
            ConditionKind::SumEquals => i128::from(result.sum()) == i128::from(target),
            ConditionKind::SumGreaterThan => i128::from(result.sum()) > i128::from(target),
            ConditionKind::SumLessThan => i128::from(result.sum()) < i128::from(target),
            ConditionKind::AtLeastOne => u32::try_from(target).is_ok_and(|t| result.contains(t)),
            ConditionKind::All => result.all(|v| i64::from(v) == target),
            ConditionKind::CountMatching => self.value.count.is_some_and(|n| {
                result.count_matching(|v| i64::from(v) == target) as u64 == u64::from(n)
            }),
        }
    }

    /// A human-readable description, e.g. `"Exactly 2 dice showing 4"`.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for RollCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = self.value.value;
        match self.kind {
            ConditionKind::SumEquals => write!(f, "Sum equals {v}"),
            ConditionKind::SumGreaterThan => write!(f, "Sum greater than {v}"),
            ConditionKind::SumLessThan => write!(f, "Sum less than {v}"),
            ConditionKind::AtLeastOne => write!(f, "At least one die showing {v}"),
            ConditionKind::All => write!(f, "All dice showing {v}"),
            ConditionKind::CountMatching => match self.value.count {
                Some(n) => write!(f, "Exactly {n} dice showing {v}"),
                None => write!(f, "Count matching {v}"),
            },
        }
    }
}
