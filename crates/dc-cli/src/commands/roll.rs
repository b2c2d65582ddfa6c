use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use dc_core::{DiceRoll, RollCondition};

pub fn run(dice: &str, conditions: &[String], seed: Option<u64>) -> Result<(), String> {
    let dice = DiceRoll::parse(dice).map_err(|e| e.to_string())?;
    let conditions = conditions
        .iter()
        .map(String::as_str)
        .map(parse_condition)
        .collect::<Result<Vec<_>, _>>()?;

    let result = match seed {
        Some(seed) => dice.roll(&mut StdRng::seed_from_u64(seed)),
        None => dice.roll(&mut rand::rng()),
    };

    println!("  {} {dice}: {result}", "Rolled".bold());
    for condition in &conditions {
        let mark = if condition.evaluate(&result) {
            "yes".green().bold()
        } else {
            "no".red().bold()
        };
        println!("  [{mark}] {condition}");
    }
    Ok(())
}

/// Parse `KIND:VALUE` or `KIND:VALUE:COUNT`.
fn parse_condition(spec: &str) -> Result<RollCondition, String> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    let (kind, value, count) = match parts.as_slice() {
        [kind, value] => (*kind, *value, None),
        [kind, value, count] => (*kind, *value, Some(*count)),
        _ => {
            return Err(format!(
                "invalid condition '{spec}': expected KIND:VALUE or KIND:VALUE:COUNT"
            ));
        }
    };
    let value: i64 = value
        .parse()
        .map_err(|_| format!("invalid condition value '{value}'"))?;
    let count = count
        .map(|c| c.parse::<i64>().map_err(|_| format!("invalid condition count '{c}'")))
        .transpose()?;
    RollCondition::parse(kind, value, count).map_err(|e| e.to_string())
}
