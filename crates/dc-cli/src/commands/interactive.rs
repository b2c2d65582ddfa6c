use std::io::{self, BufRead, Write};
use std::str::FromStr;

use colored::Colorize;

use dc_core::{
    ConditionKind, ConditionValue, DEFAULT_BATCH_SIZE, DEFAULT_SIMULATIONS, DiceRoll,
    RollCondition, Scenario,
};

use crate::RunArgs;

pub fn run() -> Result<(), String> {
    println!("  {}", "DiceCheck - Monte Carlo Dice Roll Simulator".bold());

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let (a, b, args) = prompter.session()?;
    println!();
    super::compare::run(&a, &b, &args)
}

/// Line-oriented prompts over any reader/writer pair.
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn session(&mut self) -> Result<(Scenario, Scenario, RunArgs), String> {
        self.say("\nScenario 1:")?;
        let a = self.scenario()?;
        self.say("\nScenario 2:")?;
        let b = self.scenario()?;

        let simulations = self.number(
            &format!(
                "\nNumber of simulations (default: {}): ",
                super::group_thousands(DEFAULT_SIMULATIONS)
            ),
            Some(DEFAULT_SIMULATIONS),
        )?;
        let args = RunArgs {
            simulations,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            threads: 0,
        };
        Ok((a, b, args))
    }

    fn scenario(&mut self) -> Result<Scenario, String> {
        let count: u32 = self.number("Number of dice (default: 1): ", Some(1))?;
        let sides: u32 = self.number("Number of sides per die (default: 6): ", Some(6))?;
        let dice = DiceRoll::new(sides, count).map_err(|e| e.to_string())?;

        self.say("\nCondition types:")?;
        for kind in ConditionKind::ALL {
            self.say(&format!("  {}. {kind}", kind.index()))?;
        }
        let kind: ConditionKind = self
            .ask("Select condition type (number or name): ")?
            .parse()
            .map_err(|e: dc_core::DiceError| e.to_string())?;

        let value = if kind.requires_count() {
            let matches: u32 = self.number("How many matching dice? ", None)?;
            let value: i64 = self.number("What value to match? ", None)?;
            ConditionValue::with_count(value, matches)
        } else {
            ConditionValue::new(self.number("Condition value: ", None)?)
        };
        let condition = RollCondition::new(kind, value).map_err(|e| e.to_string())?;
        Ok(Scenario::new(dice, condition))
    }

    fn say(&mut self, line: &str) -> Result<(), String> {
        writeln!(self.output, "{line}").map_err(|e| e.to_string())
    }

    fn ask(&mut self, prompt: &str) -> Result<String, String> {
        write!(self.output, "{prompt}").map_err(|e| e.to_string())?;
        self.output.flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| e.to_string())?;
        if read == 0 {
            return Err("unexpected end of input".into());
        }
        Ok(line.trim().to_string())
    }

    /// Ask for a number. A blank answer takes `default` when there is one.
    fn number<T: FromStr>(&mut self, prompt: &str, default: Option<T>) -> Result<T, String> {
        let answer = self.ask(prompt)?;
        match default {
            Some(d) if answer.is_empty() => Ok(d),
            _ => answer
                .replace(['_', ','], "")
                .parse()
                .map_err(|_| format!("not a valid number: '{answer}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn session(input: &str) -> Result<(Scenario, Scenario, RunArgs), String> {
        let mut out = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes()), &mut out);
        prompter.session()
    }

    #[test]
    fn reads_two_scenarios_and_count() {
        let (a, b, args) = session("1\n6\n3\n1\n2\n12\natLeastOne\n1\n50000\n").unwrap();
        assert_eq!(a.to_string(), "1d6 with condition At least one die showing 1");
        assert_eq!(b.to_string(), "2d12 with condition At least one die showing 1");
        assert_eq!(args.simulations, 50_000);
    }

    #[test]
    fn blank_answers_use_defaults() {
        let (a, _, args) = session("\n\n0\n4\n\n\n0\n4\n\n").unwrap();
        assert_eq!(a.dice, DiceRoll::new(6, 1).unwrap());
        assert_eq!(args.simulations, DEFAULT_SIMULATIONS);
    }

    #[test]
    fn count_matching_asks_for_count_then_value() {
        let (a, _, _) = session("5\n6\n5\n2\n6\n1\n6\n0\n7\n1,000\n").unwrap();
        assert_eq!(a.condition.describe(), "Exactly 2 dice showing 6");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(session("x\n").unwrap_err().contains("not a valid number"));
        assert!(session("0\n6\n").is_err());
        assert!(session("1\n6\nbogus\n").is_err());
        assert_eq!(session("1\n6\n").unwrap_err(), "unexpected end of input");
    }

    #[test]
    fn lists_condition_types() {
        let mut out = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(b"1\n6\n0\n7\n".as_slice()), &mut out);
        prompter.scenario().unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("  0. SumEquals"));
        assert!(printed.contains("  5. CountMatching"));
    }
}
