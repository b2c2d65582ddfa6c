//! Dice configuration and rolling.
//!
//! A [`DiceRoll`] is `count` identical dice with `sides` faces each. Rolling
//! draws every die independently and uniformly from `1..=sides`, keeping the
//! order in which the dice were rolled.

pub mod roll;

pub use roll::RollResult;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};

/// A validated dice configuration such as `2d6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDiceRoll")]
pub struct DiceRoll {
    sides: u32,
    count: u32,
}

#[derive(Deserialize)]
struct RawDiceRoll {
    sides: u32,
    count: u32,
}

impl TryFrom<RawDiceRoll> for DiceRoll {
    type Error = DiceError;

    fn try_from(raw: RawDiceRoll) -> DiceResult<Self> {
        Self::new(raw.sides, raw.count)
    }
}

impl DiceRoll {
    /// Create a dice configuration. Both `sides` and `count` must be positive.
    pub fn new(sides: u32, count: u32) -> DiceResult<Self> {
        if sides == 0 {
            return Err(DiceError::InvalidConfiguration(
                "number of sides must be positive".into(),
            ));
        }
        if count == 0 {
            return Err(DiceError::InvalidConfiguration(
                "number of dice must be positive".into(),
            ));
        }
        Ok(Self { sides, count })
    }

    /// Create a dice configuration from signed input, rejecting values below 1.
    pub fn from_signed(sides: i64, count: i64) -> DiceResult<Self> {
        let sides = u32::try_from(sides).unwrap_or(0);
        let count = u32::try_from(count).unwrap_or(0);
        Self::new(sides, count)
    }

    /// Parse dice notation like `"2d6"`, `"D20"`, or `"d12"` (one die).
    pub fn parse(notation: &str) -> DiceResult<Self> {
        let s = notation.trim().to_lowercase();
        let invalid =
            || DiceError::InvalidConfiguration(format!("invalid dice notation: {notation}"));

        let (count, sides) = s.split_once('d').ok_or_else(invalid)?;
        let count = if count.is_empty() {
            1
        } else {
            count.parse::<u32>().map_err(|_| invalid())?
        };
        let sides = sides.parse::<u32>().map_err(|_| invalid())?;
        Self::new(sides, count)
    }

    /// Number of faces on each die.
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Number of dice rolled together.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Roll every die using the given RNG.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> RollResult {
        let values = (0..self.count)
            .map(|_| rng.random_range(1..=self.sides))
            .collect();
        RollResult::new(values)
    }
}

impl std::str::FromStr for DiceRoll {
    type Err = DiceError;

    fn from_str(s: &str) -> DiceResult<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Roll `count` dice with `sides` faces on the calling thread's generator.
pub fn roll(sides: u32, count: u32) -> DiceResult<RollResult> {
    let dice = DiceRoll::new(sides, count)?;
    Ok(dice.roll(&mut rand::rng()))
}
