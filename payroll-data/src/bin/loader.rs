use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use payroll_core::PayrollPolicy;
use payroll_core::calculations::common::group_thousands;
use payroll_data::PolicyLoader;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// Validate a policy directory and print its tables.
///
/// A policy directory contains:
/// - policy.csv: deductions, insurance rates, cap multiplier and lump-sum factors
/// - tax_brackets.csv: level,lower_bound,upper_bound,rate (empty upper bound = unbounded)
/// - regional_wages.csv: region,minimum_wage
#[derive(Parser, Debug)]
#[command(name = "payroll-policy-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the policy CSV files
    #[arg(short, long, required_unless_present = "export")]
    dir: Option<PathBuf>,

    /// Write the built-in 2025 policy to this directory instead of loading one
    #[arg(short, long, conflicts_with = "dir")]
    export: Option<PathBuf>,
}

fn print_policy(policy: &PayrollPolicy) {
    println!("{} (effective {})", policy.name, policy.effective_from);

    println!("\nTax brackets:");
    for (index, bracket) in policy.tax_brackets.iter().enumerate() {
        let upper = bracket
            .upper_bound
            .map(group_thousands)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>2}  {:>15}  {:>15}  {:>5}%",
            index + 1,
            group_thousands(bracket.lower_bound),
            upper,
            (bracket.rate * Decimal::ONE_HUNDRED).normalize()
        );
    }

    println!("\nRegional minimum wages (insurance cap):");
    for (region, wage) in policy.insurance.regional_minimum_wages.iter() {
        println!(
            "  {region:<10}  {:>12}  ({})",
            group_thousands(wage),
            group_thousands(policy.insurance.insurance_base_cap(region))
        );
    }

    println!(
        "\nDeductions: personal {}, per dependent {}",
        group_thousands(policy.deductions.personal_deduction),
        group_thousands(policy.deductions.dependent_deduction)
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info")),
        )
        .without_time()
        .with_target(false)
        .init();

    let args = Args::parse();

    if let Some(dir) = &args.export {
        PolicyLoader::write_dir(&PayrollPolicy::vn_2025(), dir)
            .with_context(|| format!("Failed to write policy to: {}", dir.display()))?;
        println!("Wrote built-in policy to {}", dir.display());
        return Ok(());
    }

    let dir = args
        .dir
        .context("--dir is required unless --export is given")?;
    let policy = PolicyLoader::load_dir(&dir)
        .with_context(|| format!("Failed to load policy from: {}", dir.display()))?;

    print_policy(&policy);
    Ok(())
}
