pub mod compare;
pub mod interactive;
pub mod roll;

use dc_core::{DiceRoll, RollCondition, Scenario};

/// Build a scenario from dice notation and loosely typed condition input.
pub fn scenario(
    dice: &str,
    kind: &str,
    value: i64,
    count: Option<i64>,
) -> Result<Scenario, String> {
    let dice = DiceRoll::parse(dice).map_err(|e| e.to_string())?;
    let condition = RollCondition::parse(kind, value, count).map_err(|e| e.to_string())?;
    Ok(Scenario::new(dice, condition))
}

/// Format a probability as a percentage with three decimals.
fn percent(p: f64) -> String {
    format!("{:.3}%", p * 100.0)
}

/// Format an integer with `,` thousands separators.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_from_parts() {
        let s = scenario("2d6", "sumEquals", 7, None).unwrap();
        assert_eq!(s.to_string(), "2d6 with condition Sum equals 7");

        let s = scenario("5d6", "countMatching", 6, Some(2)).unwrap();
        assert_eq!(s.condition.describe(), "Exactly 2 dice showing 6");
    }

    #[test]
    fn scenario_errors() {
        assert!(scenario("0d6", "sumEquals", 7, None).is_err());
        assert!(scenario("2d6", "bogus", 7, None).is_err());
        let err = scenario("2d6", "countMatching", 7, None).unwrap_err();
        assert!(err.contains("count is required"));
    }

    #[test]
    fn percent_format() {
        assert_eq!(percent(1.0 / 6.0), "16.667%");
        assert_eq!(percent(0.0), "0.000%");
    }

    #[test]
    fn thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }
}
