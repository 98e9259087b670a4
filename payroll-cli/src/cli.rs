use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Vietnamese payroll calculator.
///
/// Converts between gross and net salary, computes personal income tax,
/// estimates the one-time BHXH withdrawal and projects compound interest.
/// Amounts are whole Dong and may be written with thousands separators
/// ("30,000,000").
#[derive(Debug, Parser)]
#[command(name = "payroll", version, about)]
pub struct Cli {
    /// TOML settings file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding policy.csv, tax_brackets.csv and regional_wages.csv.
    /// Overrides `[policy] dir`.
    #[arg(long, global = true, value_name = "DIR")]
    pub policy_dir: Option<PathBuf>,

    /// Log level or filter directive. Overrides `[logging] level`.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Print results as JSON instead of a table.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Take-home pay for a gross monthly salary.
    GrossToNet(SalaryArgs),
    /// Gross monthly salary needed for a take-home amount.
    NetToGross(NetToGrossArgs),
    /// Monthly personal income tax with a per-bracket breakdown.
    Tax(TaxArgs),
    /// One-time social insurance withdrawal.
    Bhxh(BhxhArgs),
    /// Compound growth with monthly contributions.
    Interest(InterestArgs),
    /// Print the active policy tables.
    Policy,
}

#[derive(Debug, Args)]
pub struct SalaryArgs {
    /// Monthly salary in Dong.
    pub salary: String,

    /// Number of registered dependents.
    #[arg(short, long, default_value = "0")]
    pub dependents: String,

    /// Region 1–4 (or I–IV) for the insurance cap.
    #[arg(short, long, default_value = "1")]
    pub region: String,

    /// Declared insurance base instead of the salary.
    #[arg(long, value_name = "AMOUNT")]
    pub custom_base: Option<String>,
}

#[derive(Debug, Args)]
pub struct NetToGrossArgs {
    #[command(flatten)]
    pub salary: SalaryArgs,

    /// Run the fixed ten-step search instead of iterating to convergence.
    #[arg(long)]
    pub legacy: bool,
}

#[derive(Debug, Args)]
pub struct TaxArgs {
    /// Monthly gross salary in Dong.
    pub gross: String,

    #[arg(short, long, default_value = "0")]
    pub dependents: String,

    /// Tax-exempt amounts such as employee insurance.
    #[arg(short, long, default_value = "0", value_name = "AMOUNT")]
    pub other_deductions: String,
}

#[derive(Debug, Args)]
pub struct BhxhArgs {
    /// A contribution period; repeat for each job.
    #[arg(
        long = "period",
        value_name = "START:END:MONTHS:SALARY",
        required_unless_present = "file"
    )]
    pub periods: Vec<String>,

    /// CSV file with id,start_year,end_year,months,average_salary rows.
    #[arg(long, conflicts_with = "periods")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InterestArgs {
    /// Starting balance in Dong.
    pub principal: String,

    /// Annual rate in percent, e.g. 6.5.
    #[arg(short, long)]
    pub rate: String,

    #[arg(short, long)]
    pub years: String,

    /// Amount added every month.
    #[arg(short, long, default_value = "0", value_name = "AMOUNT")]
    pub monthly: String,

    /// yearly, semi-annually, quarterly, monthly or daily.
    #[arg(short, long, default_value = "yearly")]
    pub frequency: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["payroll", "gross-to-net", "30,000,000", "--json", "-d", "1"])
            .unwrap();

        assert!(cli.json);
        let Command::GrossToNet(args) = cli.command else {
            panic!("expected gross-to-net");
        };
        assert_eq!(args.salary, "30,000,000");
        assert_eq!(args.dependents, "1");
        assert_eq!(args.region, "1");
    }

    #[test]
    fn bhxh_needs_periods_or_file() {
        assert!(Cli::try_parse_from(["payroll", "bhxh"]).is_err());
        assert!(
            Cli::try_parse_from(["payroll", "bhxh", "--period", "2015:2019:60:8000000"]).is_ok()
        );
    }
}
