//! Input validation.
//!
//! Validation never stops at the first problem: every message is collected
//! so a caller can show them all at once. Calculators are only meant to be
//! invoked on input whose [`Validate::validate`] returned
//! [`ValidationResult::Success`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::group_thousands;
use crate::{
    BhxhInput, BhxhPeriod, CompoundInterestInput, Dong, InsuranceBase, PersonalIncomeTaxInput,
    SalaryInput,
};

/// Largest monthly salary, insurance base or deduction accepted.
pub const MAX_MONTHLY_SALARY: Dong = 1_000_000_000;
pub const MAX_DEPENDENTS: u32 = 20;
/// Upper bound on contribution months, per period and in total.
pub const MAX_CONTRIBUTION_MONTHS: u32 = 600;
/// Compulsory social insurance started in 1995.
pub const MIN_CONTRIBUTION_YEAR: i32 = 1995;
pub const MAX_CONTRIBUTION_YEAR: i32 = 2100;
pub const MAX_PRINCIPAL: Dong = 100_000_000_000;
pub const MAX_ANNUAL_RATE_PERCENT: i64 = 30;
pub const MAX_PROJECTION_YEARS: u32 = 50;
pub const MAX_MONTHLY_CONTRIBUTION: Dong = 1_000_000_000;

/// Outcome of validating one input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "messages", rename_all = "camelCase")]
pub enum ValidationResult {
    Success,
    Error(Vec<String>),
}

impl ValidationResult {
    pub fn from_messages(messages: Vec<String>) -> Self {
        if messages.is_empty() {
            Self::Success
        } else {
            Self::Error(messages)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn messages(&self) -> &[String] {
        match self {
            Self::Success => &[],
            Self::Error(messages) => messages,
        }
    }

    pub fn into_messages(self) -> Vec<String> {
        match self {
            Self::Success => Vec::new(),
            Self::Error(messages) => messages,
        }
    }

    /// Appends `other`'s messages after this result's.
    pub fn merge(self, other: ValidationResult) -> Self {
        let mut messages = self.into_messages();
        messages.extend(other.into_messages());
        Self::from_messages(messages)
    }

    pub fn into_result(self) -> Result<(), Vec<String>> {
        match self {
            Self::Success => Ok(()),
            Self::Error(messages) => Err(messages),
        }
    }
}

/// Implemented by every calculator input record.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

/// Accumulates messages while checking fields.
#[derive(Debug, Default)]
pub(crate) struct Messages(Vec<String>);

impl Messages {
    pub(crate) fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub(crate) fn extend(&mut self, result: ValidationResult) {
        self.0.extend(result.into_messages());
    }

    /// `0 < value <= max`.
    pub(crate) fn positive_amount(&mut self, label: &str, value: Dong, max: Dong) {
        if value <= 0 {
            self.push(format!("{label} must be greater than 0"));
        } else if value > max {
            self.push(format!("{label} exceeds maximum of {}", group_thousands(max)));
        }
    }

    /// `0 <= value <= max`.
    pub(crate) fn amount(&mut self, label: &str, value: Dong, max: Dong) {
        if value < 0 {
            self.push(format!("{label} must not be negative"));
        } else if value > max {
            self.push(format!("{label} exceeds maximum of {}", group_thousands(max)));
        }
    }

    pub(crate) fn dependents(&mut self, dependents: u32) {
        if dependents > MAX_DEPENDENTS {
            self.push(format!("Dependents must not exceed {MAX_DEPENDENTS}"));
        }
    }

    pub(crate) fn finish(self) -> ValidationResult {
        ValidationResult::from_messages(self.0)
    }
}

impl Validate for SalaryInput {
    fn validate(&self) -> ValidationResult {
        let mut messages = Messages::default();
        messages.positive_amount(self.kind.label(), self.salary, MAX_MONTHLY_SALARY);
        messages.dependents(self.dependents);
        if let InsuranceBase::Custom(base) = self.insurance_base {
            messages.positive_amount("Custom insurance base", base, MAX_MONTHLY_SALARY);
        }
        messages.finish()
    }
}

impl Validate for PersonalIncomeTaxInput {
    fn validate(&self) -> ValidationResult {
        let mut messages = Messages::default();
        messages.positive_amount(
            "Monthly gross salary",
            self.monthly_gross_salary,
            MAX_MONTHLY_SALARY,
        );
        messages.dependents(self.dependents);
        messages.amount("Other deductions", self.other_deductions, MAX_MONTHLY_SALARY);
        if self.monthly_gross_salary > 0 && self.other_deductions > self.monthly_gross_salary {
            messages.push("Other deductions must not exceed monthly gross salary");
        }
        messages.finish()
    }
}

impl Validate for BhxhInput {
    fn validate(&self) -> ValidationResult {
        let mut messages = Messages::default();
        if self.periods.is_empty() {
            messages.push("At least one contribution period is required");
        }
        for (index, period) in self.periods.iter().enumerate() {
            validate_period(index + 1, period, &mut messages);
        }
        validate_period_set(&self.periods, &mut messages);
        messages.finish()
    }
}

/// Checks one period on its own. `number` is 1-based.
pub(crate) fn validate_period(number: usize, period: &BhxhPeriod, messages: &mut Messages) {
    let label = format!("Period {number}");

    if period.months == 0 || period.months > MAX_CONTRIBUTION_MONTHS {
        messages.push(format!(
            "{label}: months must be between 1 and {MAX_CONTRIBUTION_MONTHS}"
        ));
    }

    let year_range = MIN_CONTRIBUTION_YEAR..=MAX_CONTRIBUTION_YEAR;
    let years_known =
        year_range.contains(&period.start_year) && year_range.contains(&period.end_year);
    if !years_known {
        messages.push(format!(
            "{label}: years must be between {MIN_CONTRIBUTION_YEAR} and {MAX_CONTRIBUTION_YEAR}"
        ));
    } else if period.start_year > period.end_year {
        messages.push(format!("{label}: start year must not be after end year"));
    } else {
        let span_years = u32::try_from(period.end_year - period.start_year + 1).unwrap_or(0);
        if period.months > span_years * 12 {
            messages.push(format!(
                "{label}: {} months do not fit in {}–{}",
                period.months, period.start_year, period.end_year
            ));
        }
    }

    messages.positive_amount(
        &format!("{label}: average salary"),
        period.average_salary,
        MAX_MONTHLY_SALARY,
    );
}

/// Checks constraints spanning several periods.
///
/// Two periods may share a boundary year (a job change mid-year) but must
/// not overlap beyond it, and periods sharing years must fit their combined
/// months into the calendar years they cover together.
pub(crate) fn validate_period_set(periods: &[BhxhPeriod], messages: &mut Messages) {
    let total_months: u64 = periods.iter().map(|p| u64::from(p.months)).sum();
    if total_months > u64::from(MAX_CONTRIBUTION_MONTHS) {
        messages.push(format!(
            "Total contribution months must not exceed {MAX_CONTRIBUTION_MONTHS}"
        ));
    }

    let mut overlapping = false;
    for (i, a) in periods.iter().enumerate() {
        for (j, b) in periods.iter().enumerate().skip(i + 1) {
            if overlaps(a, b) {
                overlapping = true;
                messages.push(format!("Periods {} and {} overlap", i + 1, j + 1));
            }
        }
    }
    if !overlapping {
        validate_shared_years(periods, messages);
    }
}

/// Every window of years must hold the months of the periods inside it.
///
/// A single period is already checked against its own span, so only
/// windows containing two or more periods are reported, smallest first.
fn validate_shared_years(periods: &[BhxhPeriod], messages: &mut Messages) {
    let mut windows: Vec<(i32, i32)> = periods
        .iter()
        .flat_map(|a| periods.iter().map(move |b| (a.start_year, b.end_year)))
        .filter(|(first, last)| first <= last)
        .collect();
    windows.sort_by_key(|&(first, last)| (last - first, first));
    windows.dedup();

    let mut reported: Vec<Vec<usize>> = Vec::new();
    for (first, last) in windows {
        let members: Vec<usize> = periods
            .iter()
            .enumerate()
            .filter(|(_, p)| p.start_year <= p.end_year)
            .filter(|(_, p)| p.start_year >= first && p.end_year <= last)
            .map(|(index, _)| index + 1)
            .collect();
        if members.len() < 2 || reported.iter().any(|r| r.iter().all(|n| members.contains(n))) {
            continue;
        }

        let months: u64 = members
            .iter()
            .map(|&number| u64::from(periods[number - 1].months))
            .sum();
        let capacity = 12 * u64::try_from(last - first + 1).unwrap_or(0);
        if months > capacity {
            messages.push(format!(
                "{} claim {months} months, more than fit in {first}–{last}",
                period_list(&members)
            ));
            reported.push(members);
        }
    }
}

/// "Periods 1 and 2", "Periods 1, 2 and 3".
fn period_list(numbers: &[usize]) -> String {
    let names: Vec<String> = numbers.iter().map(usize::to_string).collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            format!("Periods {} and {last}", rest.join(", "))
        }
        _ => format!("Period {}", names.join("")),
    }
}

fn overlaps(a: &BhxhPeriod, b: &BhxhPeriod) -> bool {
    let first = a.start_year.max(b.start_year);
    let last = a.end_year.min(b.end_year);
    if first > last {
        return false;
    }
    let handover = a.end_year == b.start_year || b.end_year == a.start_year;
    first < last || !handover
}

impl Validate for CompoundInterestInput {
    fn validate(&self) -> ValidationResult {
        let mut messages = Messages::default();
        messages.amount("Principal", self.principal, MAX_PRINCIPAL);

        if self.annual_rate_percent < Decimal::ZERO {
            messages.push("Annual rate must not be negative");
        } else if self.annual_rate_percent > Decimal::from(MAX_ANNUAL_RATE_PERCENT) {
            messages.push(format!(
                "Annual rate exceeds maximum of {MAX_ANNUAL_RATE_PERCENT}%"
            ));
        }

        if self.years > MAX_PROJECTION_YEARS {
            messages.push(format!("Years must not exceed {MAX_PROJECTION_YEARS}"));
        }
        messages.amount(
            "Monthly contribution",
            self.monthly_contribution,
            MAX_MONTHLY_CONTRIBUTION,
        );
        messages.finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{CompoundFrequency, Region};

    fn messages(result: ValidationResult) -> Vec<String> {
        result.into_messages()
    }

    // =========================================================================
    // ValidationResult tests
    // =========================================================================

    #[test]
    fn from_empty_messages_is_success() {
        assert_eq!(ValidationResult::from_messages(vec![]), ValidationResult::Success);
    }

    #[test]
    fn merge_keeps_order() {
        let merged = ValidationResult::Error(vec!["a".into()])
            .merge(ValidationResult::Success)
            .merge(ValidationResult::Error(vec!["b".into()]));

        assert_eq!(merged.messages(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_string(&ValidationResult::Error(vec!["x".into()])).unwrap();

        assert_eq!(json, r#"{"status":"error","messages":["x"]}"#);
    }

    // =========================================================================
    // SalaryInput
    // =========================================================================

    #[test]
    fn salary_at_maximum_passes() {
        let input = SalaryInput::gross(1_000_000_000, 0, Region::I);

        assert!(input.validate().is_success());
    }

    #[test]
    fn salary_above_maximum_fails() {
        let input = SalaryInput::gross(1_000_000_001, 0, Region::I);

        assert_eq!(
            messages(input.validate()),
            vec!["Gross salary exceeds maximum of 1,000,000,000"]
        );
    }

    #[test]
    fn all_salary_problems_are_reported() {
        let input = SalaryInput::net(0, 21, Region::II).with_custom_base(-5);

        assert_eq!(
            messages(input.validate()),
            vec![
                "Net salary must be greater than 0",
                "Dependents must not exceed 20",
                "Custom insurance base must be greater than 0",
            ]
        );
    }

    // =========================================================================
    // PersonalIncomeTaxInput
    // =========================================================================

    fn tax_input(gross: Dong, dependents: u32, other: Dong) -> PersonalIncomeTaxInput {
        PersonalIncomeTaxInput {
            monthly_gross_salary: gross,
            dependents,
            other_deductions: other,
        }
    }

    #[test]
    fn tax_input_boundary_at_one_billion() {
        assert!(tax_input(1_000_000_000, 0, 0).validate().is_success());
        assert_eq!(
            messages(tax_input(1_000_000_001, 0, 0).validate()),
            vec!["Monthly gross salary exceeds maximum of 1,000,000,000"]
        );
    }

    #[test]
    fn tax_input_rejects_deductions_above_gross() {
        assert_eq!(
            messages(tax_input(10_000_000, 0, 10_000_001).validate()),
            vec!["Other deductions must not exceed monthly gross salary"]
        );
    }

    #[test]
    fn tax_input_rejects_negative_deductions() {
        assert_eq!(
            messages(tax_input(10_000_000, 0, -1).validate()),
            vec!["Other deductions must not be negative"]
        );
    }

    // =========================================================================
    // BhxhInput
    // =========================================================================

    fn period(start_year: i32, end_year: i32, months: u32, salary: Dong) -> BhxhPeriod {
        BhxhPeriod {
            id: String::new(),
            start_year,
            end_year,
            months,
            average_salary: salary,
        }
    }

    #[test]
    fn bhxh_requires_a_period() {
        assert_eq!(
            messages(BhxhInput::default().validate()),
            vec!["At least one contribution period is required"]
        );
    }

    #[test]
    fn bhxh_valid_periods_pass() {
        let input = BhxhInput {
            periods: vec![period(2015, 2019, 54, 8_000_000), period(2019, 2024, 66, 12_000_000)],
        };

        assert!(input.validate().is_success());
    }

    #[test]
    fn bhxh_rejects_zero_months_and_bad_years() {
        let input = BhxhInput {
            periods: vec![period(2021, 2020, 0, 5_000_000), period(1980, 1990, 12, 0)],
        };

        assert_eq!(
            messages(input.validate()),
            vec![
                "Period 1: months must be between 1 and 600",
                "Period 1: start year must not be after end year",
                "Period 2: years must be between 1995 and 2100",
                "Period 2: average salary must be greater than 0",
            ]
        );
    }

    #[test]
    fn bhxh_rejects_more_months_than_the_years_hold() {
        let input = BhxhInput {
            periods: vec![period(2020, 2020, 13, 5_000_000)],
        };

        assert_eq!(
            messages(input.validate()),
            vec!["Period 1: 13 months do not fit in 2020–2020"]
        );
    }

    #[test]
    fn bhxh_rejects_overlapping_periods() {
        let input = BhxhInput {
            periods: vec![period(2010, 2015, 60, 5_000_000), period(2013, 2018, 60, 6_000_000)],
        };

        assert_eq!(messages(input.validate()), vec!["Periods 1 and 2 overlap"]);
    }

    #[test]
    fn bhxh_rejects_period_inside_another() {
        let input = BhxhInput {
            periods: vec![period(2015, 2017, 24, 5_000_000), period(2016, 2016, 6, 6_000_000)],
        };

        assert_eq!(messages(input.validate()), vec!["Periods 1 and 2 overlap"]);
    }

    #[test]
    fn bhxh_allows_two_jobs_in_one_year() {
        let input = BhxhInput {
            periods: vec![period(2020, 2020, 6, 5_000_000), period(2020, 2020, 6, 6_000_000)],
        };

        assert!(input.validate().is_success());
    }

    #[test]
    fn bhxh_rejects_full_years_claimed_twice() {
        let input = BhxhInput {
            periods: vec![period(2020, 2020, 12, 5_000_000), period(2020, 2020, 12, 6_000_000)],
        };

        assert_eq!(
            messages(input.validate()),
            vec!["Periods 1 and 2 claim 24 months, more than fit in 2020–2020"]
        );
    }

    #[test]
    fn bhxh_rejects_handover_periods_that_do_not_fit_together() {
        let input = BhxhInput {
            periods: vec![period(2015, 2020, 72, 5_000_000), period(2020, 2025, 72, 6_000_000)],
        };

        assert_eq!(
            messages(input.validate()),
            vec!["Periods 1 and 2 claim 144 months, more than fit in 2015–2025"]
        );
    }

    #[test]
    fn bhxh_reports_a_crowded_year_once() {
        let input = BhxhInput {
            periods: vec![
                period(2019, 2020, 18, 5_000_000),
                period(2020, 2020, 6, 6_000_000),
                period(2020, 2021, 18, 7_000_000),
            ],
        };

        assert_eq!(
            messages(input.validate()),
            vec!["Periods 1, 2 and 3 claim 42 months, more than fit in 2019–2021"]
        );
    }

    #[test]
    fn period_list_reads_naturally() {
        assert_eq!(period_list(&[3]), "Period 3");
        assert_eq!(period_list(&[1, 2]), "Periods 1 and 2");
        assert_eq!(period_list(&[1, 2, 4]), "Periods 1, 2 and 4");
    }

    #[test]
    fn bhxh_rejects_total_months_above_limit() {
        let input = BhxhInput {
            periods: vec![
                period(1995, 2020, 300, 5_000_000),
                period(2020, 2050, 301, 5_000_000),
            ],
        };

        assert_eq!(
            messages(input.validate()),
            vec!["Total contribution months must not exceed 600"]
        );
    }

    // =========================================================================
    // CompoundInterestInput
    // =========================================================================

    fn interest_input(principal: Dong, rate: Decimal, years: u32, monthly: Dong) -> CompoundInterestInput {
        CompoundInterestInput {
            principal,
            annual_rate_percent: rate,
            years,
            monthly_contribution: monthly,
            compound_frequency: CompoundFrequency::Monthly,
        }
    }

    #[test]
    fn interest_zero_everything_is_valid() {
        assert!(interest_input(0, dec!(0), 0, 0).validate().is_success());
    }

    #[test]
    fn interest_limits_are_enforced() {
        assert_eq!(
            messages(interest_input(-1, dec!(30.5), 51, 1_000_000_001).validate()),
            vec![
                "Principal must not be negative",
                "Annual rate exceeds maximum of 30%",
                "Years must not exceed 50",
                "Monthly contribution exceeds maximum of 1,000,000,000",
            ]
        );
    }

    #[test]
    fn interest_negative_rate_is_rejected() {
        assert_eq!(
            messages(interest_input(1, dec!(-0.1), 1, 0).validate()),
            vec!["Annual rate must not be negative"]
        );
    }
}
