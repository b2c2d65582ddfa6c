//! Integration tests for the dc-cli command-line interface.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

fn dicecheck() -> Command {
    let mut cmd = Command::cargo_bin("dicecheck").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

// ---------------------------------------------------------------------------
// compare
// ---------------------------------------------------------------------------

#[test]
fn compare_prints_both_scenarios() {
    dicecheck()
        .args([
            "compare", "1d6", "atLeastOne", "1", "2d12", "atLeastOne", "1", "-n", "200000",
            "--seed", "3",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Results after 200,000 simulations")
                .and(predicate::str::contains("At least one die showing 1"))
                .and(predicate::str::contains("2d12"))
                .and(predicate::str::contains("16.667%"))
                .and(predicate::str::contains("Difference in probabilities"))
                .and(predicate::str::contains("Scenario 2 is more likely!")),
        );
}

#[test]
fn compare_count_matching_with_remainder_batch() {
    dicecheck()
        .args([
            "compare",
            "5d6",
            "countMatching",
            "6",
            "--count-a",
            "2",
            "2d6",
            "sumEquals",
            "7",
            "-n",
            "12345",
            "--batch-size",
            "1000",
            "--threads",
            "2",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Exactly 2 dice showing 6")
                .and(predicate::str::contains("Sum equals 7"))
                .and(predicate::str::contains("12,345 simulations")),
        );
}

#[test]
fn compare_identical_scenarios_with_certain_outcome() {
    dicecheck()
        .args([
            "compare", "2d6", "sumGreaterThan", "0", "3d4", "sumGreaterThan", "-5", "-n", "100",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("100.000%")
                .and(predicate::str::contains("Both scenarios are equally likely!")),
        );
}

#[test]
fn compare_rejects_zero_simulations() {
    dicecheck()
        .args([
            "compare", "1d6", "sumEquals", "1", "1d6", "sumEquals", "1", "-n", "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("number of simulations must be positive"));
}

#[test]
fn compare_rejects_unknown_condition() {
    dicecheck()
        .args(["compare", "1d6", "bogus", "1", "1d6", "sumEquals", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown condition type: bogus"));
}

#[test]
fn compare_requires_count_for_count_matching() {
    dicecheck()
        .args(["compare", "3d6", "countMatching", "6", "1d6", "sumEquals", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("count is required"));
}

#[test]
fn compare_rejects_bad_dice() {
    dicecheck()
        .args(["compare", "0d6", "sumEquals", "1", "1d6", "sumEquals", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("number of dice must be positive"));
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_reports_values_and_conditions() {
    dicecheck()
        .args([
            "roll",
            "4d6",
            "-c",
            "sumGreaterThan:0",
            "-c",
            "countMatching:7:0",
            "-c",
            "all:7",
            "--seed",
            "9",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Rolled 4d6: [")
                .and(predicate::str::contains("[yes] Sum greater than 0"))
                .and(predicate::str::contains("[yes] Exactly 0 dice showing 7"))
                .and(predicate::str::contains("[no] All dice showing 7")),
        );
}

#[test]
fn roll_with_seed_is_reproducible() {
    let first = dicecheck()
        .args(["roll", "10d20", "--seed", "42"])
        .output()
        .unwrap();
    let second = dicecheck()
        .args(["roll", "10d20", "--seed", "42"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn roll_rejects_malformed_condition() {
    dicecheck()
        .args(["roll", "2d6", "-c", "sumEquals"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KIND:VALUE"));
}

// ---------------------------------------------------------------------------
// interactive
// ---------------------------------------------------------------------------

#[test]
fn interactive_runs_from_stdin() {
    dicecheck()
        .arg("interactive")
        .write_stdin("1\n6\n3\n1\n2\n12\natLeastOne\n1\n20000\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Condition types:")
                .and(predicate::str::contains("Results after 20,000 simulations")),
        );
}

#[test]
fn no_subcommand_starts_interactive_mode() {
    dicecheck()
        .write_stdin("")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Scenario 1:"))
        .stderr(predicate::str::contains("unexpected end of input"));
}
