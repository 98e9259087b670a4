//! One-time social insurance (BHXH) withdrawal estimate.
//!
//! The payout is a number of months of the contributor's average salary:
//! the average is weighted by contribution months across every period, and
//! each year of contributions earns [`LumpSumPolicy::months_factor_before`]
//! months if it fell before [`LumpSumPolicy::cutoff_year`] and
//! [`LumpSumPolicy::months_factor_from`] months otherwise. A period that
//! straddles the cutoff has its months split in proportion to the calendar
//! years on each side.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{dong, round_half_up};
use crate::{BhxhPeriod, BhxhResult, LumpSumPolicy};

const MONTHS_PER_YEAR: i64 = 12;

/// Estimates the lump-sum payout for `periods`.
///
/// Returns an all-zero result when there are no contribution months.
///
/// # Example
///
/// ```
/// use payroll_core::{BhxhPeriod, PayrollPolicy};
/// use payroll_core::calculations::compute_bhxh;
///
/// let periods = [
///     BhxhPeriod { id: "a".into(), start_year: 2020, end_year: 2020, months: 12, average_salary: 5_000_000 },
///     BhxhPeriod { id: "b".into(), start_year: 2021, end_year: 2021, months: 12, average_salary: 7_000_000 },
/// ];
/// let result = compute_bhxh(&periods, &PayrollPolicy::vn_2025().lump_sum);
///
/// assert_eq!(result.average_salary, 6_000_000);
/// assert_eq!(result.total_months, 24);
/// assert_eq!(result.total_amount, 24_000_000);
/// ```
pub fn compute_bhxh(periods: &[BhxhPeriod], policy: &LumpSumPolicy) -> BhxhResult {
    let total_months: u32 = periods.iter().map(|p| p.months).sum();
    if total_months == 0 {
        return BhxhResult::default();
    }

    let weighted_salary: Decimal = periods
        .iter()
        .map(|p| dong(p.average_salary) * Decimal::from(p.months))
        .sum();
    let average_salary = weighted_salary / Decimal::from(total_months);

    let (months_before_cutoff, months_from_cutoff) = periods
        .iter()
        .map(|p| split_at_cutoff(p, policy.cutoff_year))
        .fold((0, 0), |(before, from), (b, f)| (before + b, from + f));

    let months_of_salary = (Decimal::from(months_before_cutoff) * policy.months_factor_before
        + Decimal::from(months_from_cutoff) * policy.months_factor_from)
        / Decimal::from(MONTHS_PER_YEAR);

    let result = BhxhResult {
        total_amount: round_half_up(average_salary * months_of_salary),
        average_salary: round_half_up(average_salary),
        total_months,
        months_before_cutoff,
        months_from_cutoff,
    };
    debug!(
        periods = periods.len(),
        total_months,
        total_amount = result.total_amount,
        "bhxh lump sum"
    );
    result
}

/// Splits a period's months into `(before cutoff, from cutoff)`.
fn split_at_cutoff(period: &BhxhPeriod, cutoff_year: i32) -> (u32, u32) {
    if period.end_year < cutoff_year {
        return (period.months, 0);
    }
    if period.start_year >= cutoff_year {
        return (0, period.months);
    }

    let span_years = i64::from(period.end_year - period.start_year + 1);
    let years_before = i64::from(cutoff_year - period.start_year);
    let before = round_half_up(
        Decimal::from(period.months) * Decimal::from(years_before) / Decimal::from(span_years),
    );
    let before = u32::try_from(before).unwrap_or(period.months).min(period.months);
    (before, period.months - before)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::PayrollPolicy;

    fn period(start_year: i32, end_year: i32, months: u32, average_salary: i64) -> BhxhPeriod {
        BhxhPeriod {
            id: format!("{start_year}-{end_year}"),
            start_year,
            end_year,
            months,
            average_salary,
        }
    }

    fn policy() -> LumpSumPolicy {
        PayrollPolicy::vn_2025().lump_sum
    }

    // =========================================================================
    // compute_bhxh tests
    // =========================================================================

    #[test]
    fn weighted_average_of_equal_periods() {
        let result = compute_bhxh(
            &[period(2020, 2020, 12, 5_000_000), period(2021, 2021, 12, 7_000_000)],
            &policy(),
        );

        assert_eq!(
            result,
            BhxhResult {
                total_amount: 24_000_000,
                average_salary: 6_000_000,
                total_months: 24,
                months_before_cutoff: 0,
                months_from_cutoff: 24,
            }
        );
    }

    #[test]
    fn average_is_weighted_by_months() {
        let result = compute_bhxh(
            &[period(2018, 2020, 36, 10_000_000), period(2021, 2021, 12, 2_000_000)],
            &policy(),
        );

        assert_eq!(result.average_salary, 8_000_000);
    }

    #[test]
    fn years_before_cutoff_pay_one_and_a_half_months() {
        let result = compute_bhxh(&[period(2010, 2011, 24, 6_000_000)], &policy());

        assert_eq!(result.months_before_cutoff, 24);
        // 2 years × 1.5 months × 6M
        assert_eq!(result.total_amount, 18_000_000);
    }

    #[test]
    fn straddling_period_is_split_by_calendar_years() {
        // 2012–2015: two years before 2014, two from it.
        let result = compute_bhxh(&[period(2012, 2015, 48, 10_000_000)], &policy());

        assert_eq!(result.months_before_cutoff, 24);
        assert_eq!(result.months_from_cutoff, 24);
        // 2 × 1.5 × 10M + 2 × 2 × 10M
        assert_eq!(result.total_amount, 70_000_000);
    }

    #[test]
    fn partial_year_pays_pro_rata() {
        let result = compute_bhxh(&[period(2022, 2022, 6, 8_000_000)], &policy());

        // half a year × 2 months × 8M
        assert_eq!(result.total_amount, 8_000_000);
    }

    #[test]
    fn custom_multipliers_are_applied() {
        let custom = LumpSumPolicy {
            cutoff_year: 2014,
            months_factor_before: dec!(1),
            months_factor_from: dec!(1),
        };
        let result = compute_bhxh(&[period(2012, 2015, 48, 10_000_000)], &custom);

        assert_eq!(result.total_amount, 40_000_000);
    }

    #[test]
    fn no_periods_yields_zero_result() {
        assert_eq!(compute_bhxh(&[], &policy()), BhxhResult::default());
    }

    #[test]
    fn zero_month_periods_do_not_divide_by_zero() {
        let result = compute_bhxh(&[period(2020, 2020, 0, 5_000_000)], &policy());

        assert_eq!(result, BhxhResult::default());
    }

    // =========================================================================
    // split_at_cutoff tests
    // =========================================================================

    #[test]
    fn split_rounds_to_whole_months() {
        // 2013–2015 with 30 months: one of three years before → 10 months.
        assert_eq!(split_at_cutoff(&period(2013, 2015, 30, 1), 2014), (10, 20));
        // 2013–2014 with 13 months: half → 6.5 rounds to 7.
        assert_eq!(split_at_cutoff(&period(2013, 2014, 13, 1), 2014), (7, 6));
    }

    #[test]
    fn split_of_period_starting_at_cutoff_is_all_after() {
        assert_eq!(split_at_cutoff(&period(2014, 2016, 36, 1), 2014), (0, 36));
    }
}
