//! Progressive personal income tax over a bracket table.
//!
//! The tax base is walked through the brackets in ascending order. Each
//! bracket taxes `min(remaining, upper - previous_upper)` at its own rate and
//! the unbounded top bracket takes whatever is left. The sum is rounded down
//! to whole Dong once, after all brackets have been applied.
//!
//! # Example
//!
//! ```
//! use payroll_core::PayrollPolicy;
//! use payroll_core::calculations::compute_progressive_tax;
//!
//! let policy = PayrollPolicy::vn_2025();
//!
//! // 5M × 5% + 5M × 10% + 1.45M × 15%
//! assert_eq!(compute_progressive_tax(11_450_000, &policy.tax_brackets), 967_500);
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{dong, round_down};
use crate::{BracketTax, Dong, TaxBracket};

/// The slice of a tax base that lands in one bracket, with its exact tax.
struct BracketSlice<'a> {
    level: usize,
    bracket: &'a TaxBracket,
    amount: Dong,
    tax: Decimal,
}

fn allocate(taxable_income: Dong, brackets: &[TaxBracket]) -> Vec<BracketSlice<'_>> {
    let mut slices = Vec::new();
    let mut remaining = taxable_income;
    let mut previous_upper = 0;

    for (index, bracket) in brackets.iter().enumerate() {
        if remaining <= 0 {
            break;
        }
        let amount = match bracket.upper_bound {
            Some(upper) => remaining.min(upper - previous_upper),
            None => remaining,
        };
        slices.push(BracketSlice {
            level: index + 1,
            bracket,
            amount,
            tax: dong(amount) * bracket.rate,
        });
        remaining -= amount;
        if let Some(upper) = bracket.upper_bound {
            previous_upper = upper;
        }
    }

    slices
}

/// Computes the tax owed on `taxable_income` under `brackets`.
///
/// `brackets` must be a validated table (contiguous, ascending, unbounded
/// top bracket). Zero or negative income yields zero tax.
pub fn compute_progressive_tax(taxable_income: Dong, brackets: &[TaxBracket]) -> Dong {
    if taxable_income <= 0 {
        return 0;
    }
    let exact: Decimal = allocate(taxable_income, brackets)
        .iter()
        .map(|slice| slice.tax)
        .sum();
    round_down(exact)
}

/// Reports how `taxable_income` is spread over the brackets it reaches.
///
/// Brackets above the income are omitted. Each row's `tax` is rounded down
/// on its own, so the rows can sum to slightly less than
/// [`compute_progressive_tax`].
pub fn progressive_tax_breakdown(taxable_income: Dong, brackets: &[TaxBracket]) -> Vec<BracketTax> {
    allocate(taxable_income, brackets)
        .into_iter()
        .map(|slice| BracketTax {
            level: slice.level,
            lower_bound: slice.bracket.lower_bound,
            upper_bound: slice.bracket.upper_bound,
            rate: slice.bracket.rate,
            taxable_amount: slice.amount,
            tax: round_down(slice.tax),
        })
        .collect()
}

/// Rate of the highest bracket reached by `taxable_income`, or zero when
/// there is nothing to tax.
pub fn marginal_rate(taxable_income: Dong, brackets: &[TaxBracket]) -> Decimal {
    allocate(taxable_income, brackets)
        .last()
        .map(|slice| slice.bracket.rate)
        .unwrap_or(Decimal::ZERO)
}
