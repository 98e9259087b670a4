//! Year-by-year compound growth with periodic contributions.
//!
//! Each year runs `periods_per_year` compounding steps. A step first adds
//! the contribution due for that step (`monthly × 12 / periods_per_year`)
//! and then grows the balance by `annual_rate / periods_per_year`.
//!
//! The running balance is kept in [`Decimal`]; each yearly row is rounded to
//! whole Dong and its interest is derived from the rounded figures, so
//! `end = start + contribution + interest` holds exactly and every row starts
//! where the previous one ended.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{dong, round_half_up};
use crate::{CompoundInterestInput, CompoundInterestResult, Dong, YearlyGrowth};

const MONTHS_PER_YEAR: i64 = 12;

// Bounds the scale of the running balance across long daily schedules.
const BALANCE_SCALE: u32 = 12;

/// Projects `input` forward and returns the yearly schedule.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::{CompoundFrequency, CompoundInterestInput};
/// use payroll_core::calculations::project_compound_interest;
///
/// let result = project_compound_interest(&CompoundInterestInput {
///     principal: 100_000_000,
///     annual_rate_percent: dec!(10),
///     years: 2,
///     monthly_contribution: 0,
///     compound_frequency: CompoundFrequency::Yearly,
/// });
///
/// assert_eq!(result.final_amount, 121_000_000);
/// assert_eq!(result.total_interest, 21_000_000);
/// ```
pub fn project_compound_interest(input: &CompoundInterestInput) -> CompoundInterestResult {
    let periods = input.compound_frequency.periods_per_year();
    let rate_per_period =
        input.annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(periods);
    let growth = Decimal::ONE + rate_per_period;
    let yearly_contribution = input.monthly_contribution.saturating_mul(MONTHS_PER_YEAR);
    let contribution_per_period = dong(yearly_contribution) / Decimal::from(periods);

    let mut balance = dong(input.principal);
    let mut start_amount = input.principal;
    let mut yearly_breakdown = Vec::with_capacity(input.years as usize);

    for year in 1..=input.years {
        for _ in 0..periods {
            balance = ((balance + contribution_per_period) * growth).round_dp(BALANCE_SCALE);
        }
        let end_amount = round_half_up(balance);
        yearly_breakdown.push(YearlyGrowth {
            year,
            start_amount,
            contribution: yearly_contribution,
            interest: end_amount - start_amount - yearly_contribution,
            end_amount,
        });
        start_amount = end_amount;
    }

    let final_amount = start_amount;
    let total_contributions = input
        .principal
        .saturating_add(yearly_contribution.saturating_mul(Dong::from(input.years)));

    debug!(
        years = input.years,
        frequency = %input.compound_frequency,
        final_amount,
        "compound interest projection"
    );

    CompoundInterestResult {
        principal: input.principal,
        total_contributions,
        total_interest: final_amount - total_contributions,
        final_amount,
        yearly_breakdown,
    }
}
