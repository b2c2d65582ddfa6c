use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use dc_core::{Comparison, Scenario, SimConfig, Simulator, Verdict, theory};

use super::{group_thousands, percent};
use crate::RunArgs;

pub fn run(a: &Scenario, b: &Scenario, args: &RunArgs) -> Result<(), String> {
    let mut config = SimConfig::default()
        .with_simulations(args.simulations)
        .with_batch_size(args.batch_size)
        .with_threads(args.threads);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    tracing::debug!("comparing {} against {}", a, b);
    let comparison = Simulator::new(config)
        .run(a, b)
        .map_err(|e| e.to_string())?;

    print_report(a, b, &comparison);
    Ok(())
}

fn print_report(a: &Scenario, b: &Scenario, comparison: &Comparison) {
    println!(
        "  {} {}",
        format!(
            "Results after {} simulations",
            group_thousands(comparison.simulations)
        )
        .bold(),
        format!("(completed in {}ms)", comparison.elapsed.as_millis()).dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Scenario",
        "Dice",
        "Condition",
        "Probability",
        "Theoretical",
    ]);
    for (label, scenario, p) in [
        ("1", a, comparison.probability_a),
        ("2", b, comparison.probability_b),
    ] {
        let theoretical = theory::probability(scenario)
            .map(percent)
            .unwrap_or_else(|| "--".to_string());
        table.add_row(vec![
            label.to_string(),
            scenario.dice.to_string(),
            scenario.condition.describe(),
            percent(p),
            theoretical,
        ]);
    }
    println!("{table}");
    println!();

    println!(
        "  Difference in probabilities: {}",
        percent(comparison.difference())
    );
    let verdict = comparison.verdict().to_string();
    match comparison.verdict() {
        Verdict::FirstMoreLikely | Verdict::SecondMoreLikely => {
            println!("  {}", verdict.green().bold());
        }
        Verdict::EquallyLikely => println!("  {}", verdict.yellow().bold()),
    }
}
