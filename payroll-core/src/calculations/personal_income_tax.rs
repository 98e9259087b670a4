//! Monthly personal income tax with a per-bracket breakdown.
//!
//! Unlike the salary converter, insurance is not derived here: the caller
//! supplies everything exempt from tax as `other_deductions`.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::calculations::common::{dong, non_negative};
use crate::calculations::progressive_tax::{
    compute_progressive_tax, marginal_rate, progressive_tax_breakdown,
};
use crate::{PayrollPolicy, PersonalIncomeTaxInput, TaxCalculationResult};

/// Computes tax owed on one month's income.
///
/// # Example
///
/// ```
/// use payroll_core::{PayrollPolicy, PersonalIncomeTaxInput};
/// use payroll_core::calculations::compute_personal_income_tax;
///
/// let input = PersonalIncomeTaxInput {
///     monthly_gross_salary: 30_000_000,
///     dependents: 1,
///     other_deductions: 3_150_000,
/// };
/// let result = compute_personal_income_tax(&input, &PayrollPolicy::vn_2025());
///
/// assert_eq!(result.tax_base, 11_450_000);
/// assert_eq!(result.personal_income_tax, 967_500);
/// assert_eq!(result.brackets.len(), 3);
/// ```
pub fn compute_personal_income_tax(
    input: &PersonalIncomeTaxInput,
    policy: &PayrollPolicy,
) -> TaxCalculationResult {
    let gross = input.monthly_gross_salary;
    let taxable_income = non_negative(gross - input.other_deductions);

    let personal_deduction = policy.deductions.personal_deduction;
    let dependent_deduction = policy.deductions.dependents_total(input.dependents);
    let total_deduction = policy.deductions.total(input.dependents);
    let tax_base = non_negative(taxable_income.saturating_sub(total_deduction));

    let personal_income_tax = compute_progressive_tax(tax_base, &policy.tax_brackets);
    let effective_rate = if gross > 0 {
        (dong(personal_income_tax) / dong(gross))
            .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    debug!(
        gross,
        tax_base,
        tax = personal_income_tax,
        "personal income tax"
    );

    TaxCalculationResult {
        monthly_gross_salary: gross,
        other_deductions: input.other_deductions,
        taxable_income,
        personal_deduction,
        dependent_deduction,
        total_deduction,
        tax_base,
        personal_income_tax,
        net_income: gross - input.other_deductions - personal_income_tax,
        effective_rate,
        marginal_rate: marginal_rate(tax_base, &policy.tax_brackets),
        brackets: progressive_tax_breakdown(tax_base, &policy.tax_brackets),
    }
}
