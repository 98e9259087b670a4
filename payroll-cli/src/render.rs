//! Plain-text tables for terminal output.

use std::fmt::Write;

use payroll_core::calculations::common::group_thousands;
use payroll_core::{
    BhxhResult, CompoundInterestResult, Dong, PayrollPolicy, SalaryCalculationResult,
    TaxCalculationResult,
};
use rust_decimal::Decimal;

use crate::commands::Report;

const LABEL_WIDTH: usize = 28;
const AMOUNT_WIDTH: usize = 16;

pub fn render(report: &Report) -> String {
    match report {
        Report::Salary(result) => salary(result),
        Report::Tax(result) => tax(result),
        Report::Bhxh(result) => bhxh(result),
        Report::Interest(result) => interest(result),
        Report::Policy(policy) => policy_tables(policy),
    }
}

fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

fn line(out: &mut String, label: &str, amount: Dong) {
    let _ = writeln!(
        out,
        "{label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        group_thousands(amount)
    );
}

fn rule(out: &mut String) {
    let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + AMOUNT_WIDTH));
}

fn salary(result: &SalaryCalculationResult) -> String {
    let mut out = String::new();
    line(&mut out, "Gross salary", result.gross_salary);
    rule(&mut out);
    line(&mut out, "Insurance base", result.insurance_base);
    line(&mut out, "  Social insurance", result.social_insurance);
    line(&mut out, "  Health insurance", result.health_insurance);
    line(&mut out, "  Unemployment insurance", result.unemployment_insurance);
    line(&mut out, "Total insurance", result.total_insurance);
    rule(&mut out);
    line(&mut out, "Taxable income", result.taxable_income);
    line(&mut out, "  Personal deduction", result.personal_deduction);
    line(&mut out, "  Dependent deduction", result.dependent_deduction);
    line(&mut out, "Tax base", result.tax_base);
    line(&mut out, "Personal income tax", result.personal_income_tax);
    rule(&mut out);
    line(&mut out, "Net salary", result.net_salary);
    out.push('\n');
    line(&mut out, "Employer contributions", result.employer.total);
    line(&mut out, "Total employer cost", result.employer.total_cost);
    out
}

fn tax(result: &TaxCalculationResult) -> String {
    let mut out = String::new();
    line(&mut out, "Monthly gross salary", result.monthly_gross_salary);
    line(&mut out, "Other deductions", result.other_deductions);
    line(&mut out, "Taxable income", result.taxable_income);
    line(&mut out, "Family deductions", result.total_deduction);
    line(&mut out, "Tax base", result.tax_base);
    rule(&mut out);

    for bracket in &result.brackets {
        let label = format!("  Level {} ({})", bracket.level, percent(bracket.rate));
        let _ = writeln!(
            out,
            "{label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}  on {}",
            group_thousands(bracket.tax),
            group_thousands(bracket.taxable_amount)
        );
    }
    line(&mut out, "Personal income tax", result.personal_income_tax);
    rule(&mut out);
    line(&mut out, "Net income", result.net_income);
    let _ = writeln!(
        out,
        "\nEffective rate {}, marginal rate {}",
        percent(result.effective_rate),
        percent(result.marginal_rate)
    );
    out
}

fn bhxh(result: &BhxhResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        "Contribution months", result.total_months
    );
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        "  before cutoff", result.months_before_cutoff
    );
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        "  from cutoff", result.months_from_cutoff
    );
    line(&mut out, "Average salary", result.average_salary);
    rule(&mut out);
    line(&mut out, "Lump-sum amount", result.total_amount);
    out
}

fn interest(result: &CompoundInterestResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>18}  {:>16}  {:>16}  {:>18}",
        "Year", "Start", "Contribution", "Interest", "End"
    );
    for row in &result.yearly_breakdown {
        let _ = writeln!(
            out,
            "{:>4}  {:>18}  {:>16}  {:>16}  {:>18}",
            row.year,
            group_thousands(row.start_amount),
            group_thousands(row.contribution),
            group_thousands(row.interest),
            group_thousands(row.end_amount)
        );
    }
    out.push('\n');
    line(&mut out, "Principal", result.principal);
    line(&mut out, "Total contributions", result.total_contributions);
    line(&mut out, "Total interest", result.total_interest);
    line(&mut out, "Final amount", result.final_amount);
    out
}

fn policy_tables(policy: &PayrollPolicy) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (effective {})\n", policy.name, policy.effective_from);

    let _ = writeln!(out, "Tax brackets");
    for (index, bracket) in policy.tax_brackets.iter().enumerate() {
        let upper = bracket
            .upper_bound
            .map(group_thousands)
            .unwrap_or_else(|| "and above".to_string());
        let _ = writeln!(
            out,
            "  {:>2}  {:>14} - {:<14} {:>4}",
            index + 1,
            group_thousands(bracket.lower_bound),
            upper,
            percent(bracket.rate)
        );
    }

    let insurance = &policy.insurance;
    let _ = writeln!(
        out,
        "\nEmployee insurance: social {}, health {}, unemployment {}",
        percent(insurance.social_rate),
        percent(insurance.health_rate),
        percent(insurance.unemployment_rate)
    );
    let _ = writeln!(
        out,
        "Employer insurance: social {}, health {}, unemployment {}",
        percent(insurance.employer_social_rate),
        percent(insurance.employer_health_rate),
        percent(insurance.employer_unemployment_rate)
    );
    let _ = writeln!(out, "\nRegional minimum wage / insurance cap");
    for (region, wage) in insurance.regional_minimum_wages.iter() {
        let _ = writeln!(
            out,
            "  {region:<10}{:>14}{:>16}",
            group_thousands(wage),
            group_thousands(insurance.insurance_base_cap(region))
        );
    }

    let _ = writeln!(
        out,
        "\nDeductions: personal {}, per dependent {}",
        group_thousands(policy.deductions.personal_deduction),
        group_thousands(policy.deductions.dependent_deduction)
    );
    let _ = writeln!(
        out,
        "Lump sum: {} months/year before {}, {} months/year from it",
        policy.lump_sum.months_factor_before.normalize(),
        policy.lump_sum.cutoff_year,
        policy.lump_sum.months_factor_from.normalize()
    );
    out
}

#[cfg(test)]
mod tests {
    use payroll_core::calculations::gross_to_net;
    use payroll_core::{Region, SalaryInput};
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn percent_drops_trailing_zeros() {
        assert_eq!(percent(dec!(0.050)), "5%");
        assert_eq!(percent(dec!(0.015)), "1.5%");
    }

    #[test]
    fn salary_table_shows_grouped_amounts() {
        let result = gross_to_net(&SalaryInput::gross(30_000_000, 1, Region::I), &PayrollPolicy::vn_2025());

        let text = render(&Report::Salary(result));

        assert!(text.contains("30,000,000"));
        assert!(text.lines().any(|l| l.starts_with("Net salary") && l.ends_with("25,882,500")));
    }

    #[test]
    fn policy_table_lists_every_region() {
        let text = render(&Report::Policy(PayrollPolicy::vn_2025()));

        assert!(text.contains("Region 1"));
        assert!(text.contains("Region 4"));
        assert!(text.contains("99,200,000"));
    }
}
