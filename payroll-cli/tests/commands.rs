//! End-to-end runs of parsed command lines against the built-in policy.

use std::path::PathBuf;

use clap::Parser;
use pretty_assertions::assert_eq;

use payroll_cli::cli::Cli;
use payroll_cli::commands::{CommandError, Report, execute};
use payroll_cli::render::render;
use payroll_core::PayrollPolicy;

fn run(args: &[&str]) -> Result<Report, CommandError> {
    let cli = Cli::try_parse_from(std::iter::once("payroll").chain(args.iter().copied()))
        .expect("valid arguments");
    execute(&cli.command, &PayrollPolicy::vn_2025())
}

fn periods_fixture() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../payroll-data/test-data/periods.csv")
        .display()
        .to_string()
}

#[test]
fn salary_json_uses_camel_case() {
    let report = run(&["gross-to-net", "30000000", "--dependents", "1", "--region", "I"]).unwrap();

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["grossSalary"], 30_000_000);
    assert_eq!(json["netSalary"], 25_882_500);
    assert_eq!(json["personalIncomeTax"], 967_500);
    let employer_total = json["employer"]["total"].as_i64().unwrap();
    assert_eq!(json["employer"]["totalCost"], 30_000_000 + employer_total);
}

#[test]
fn tax_table_lists_brackets() {
    let report = run(&["tax", "30,000,000", "-d", "1", "-o", "3,150,000"]).unwrap();

    let text = render(&report);

    assert!(text.contains("Level 1 (5%)"));
    assert!(text.contains("Level 3 (15%)"));
    assert!(!text.contains("Level 4"));
    assert!(text.contains("967,500"));
}

#[test]
fn bhxh_reads_periods_file() {
    let fixture = periods_fixture();
    let Report::Bhxh(result) = run(&["bhxh", "--file", &fixture]).unwrap() else {
        panic!("expected bhxh report");
    };

    assert_eq!(result.total_months, 90);
    assert_eq!(result.months_before_cutoff, 48);
}

#[test]
fn bhxh_missing_file_is_not_a_validation_error() {
    let err = run(&["bhxh", "--file", "/no/such/periods.csv"]).unwrap_err();

    assert!(matches!(err, CommandError::Periods(_)));
}

#[test]
fn interest_rejects_out_of_range_values() {
    let err = run(&["interest", "100000000", "-r", "31", "-y", "51", "-f", "weekly"]).unwrap_err();

    let CommandError::Invalid(messages) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(messages.len(), 3);
    assert!(messages[0].starts_with("Compound frequency: "));
    assert_eq!(messages[1], "Annual rate exceeds maximum of 30%");
    assert_eq!(messages[2], "Years must not exceed 50");
}
