//! Raw text forms for the calculators.
//!
//! Each form holds the fields exactly as typed. `parse` turns a form into a
//! calculator input, reporting blank or non-numeric fields together with the
//! range problems [`Validate`] finds in the fields that did parse.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::validation::{Messages, validate_period, validate_period_set};
use crate::{
    BhxhInput, BhxhPeriod, CompoundFrequency, CompoundInterestInput, Dong, InsuranceBase,
    PersonalIncomeTaxInput, Region, SalaryInput, SalaryKind, Validate, ValidationResult,
};

/// Error returned when a string is not a whole number of Dong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount '{input}'")]
pub struct ParseAmountError {
    input: String,
}

fn is_separator(c: char) -> bool {
    matches!(c, ',' | '.' | '_') || c.is_whitespace()
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Removes thousands separators (`,` `.` `_` or spaces).
///
/// A separator is only accepted between groups of exactly three digits, and
/// one amount uses a single kind of separator. `"5.5"` and `"1000000.50"`
/// are rejected rather than read as 55 and 100,000,050.
fn strip_separators(s: &str) -> Option<String> {
    let s = s.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let Some(separator) = digits.chars().find(|c| !c.is_ascii_digit()) else {
        return Some(s.to_string());
    };
    if !is_separator(separator) {
        return None;
    }

    let mut groups = digits.split(separator);
    let head = groups.next().filter(|g| all_digits(g) && g.len() <= 3)?;
    let mut normalized = format!("{sign}{head}");
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return None;
        }
        normalized.push_str(group);
    }
    Some(normalized)
}

/// Parses a whole Dong amount such as `"30,000,000"` or `"30.000.000"`.
pub fn parse_amount(s: &str) -> Result<Dong, ParseAmountError> {
    strip_separators(s)
        .and_then(|normalized| normalized.parse().ok())
        .ok_or_else(|| ParseAmountError {
            input: s.to_string(),
        })
}

/// Parses a percentage such as `"6.5"`, `"6,5"` or `"6.5%"`.
pub fn parse_percent(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = s.trim().trim_end_matches('%').trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| ParseAmountError {
        input: s.to_string(),
    })
}

/// Collects messages for fields that fail to parse.
#[derive(Default)]
struct FieldParser {
    messages: Messages,
}

impl FieldParser {
    fn amount(&mut self, field: &str, value: &str) -> Option<Dong> {
        if value.trim().is_empty() {
            self.messages.push(format!("{field} is required"));
            return None;
        }
        match parse_amount(value) {
            Ok(amount) => Some(amount),
            Err(e) => {
                warn!(field, error = %e, "rejected form value");
                self.messages.push(format!("{field} must be a whole number"));
                None
            }
        }
    }

    /// Blank means `default`.
    fn amount_or(&mut self, field: &str, value: &str, default: Dong) -> Option<Dong> {
        if value.trim().is_empty() {
            Some(default)
        } else {
            self.amount(field, value)
        }
    }

    fn count(&mut self, field: &str, value: &str) -> Option<u32> {
        if value.trim().is_empty() {
            self.messages.push(format!("{field} is required"));
            return None;
        }
        match value.trim().parse() {
            Ok(count) => Some(count),
            Err(_) => {
                warn!(field, value, "rejected form value");
                self.messages
                    .push(format!("{field} must be a whole number"));
                None
            }
        }
    }

    fn count_or(&mut self, field: &str, value: &str, default: u32) -> Option<u32> {
        if value.trim().is_empty() {
            Some(default)
        } else {
            self.count(field, value)
        }
    }

    fn year(&mut self, field: &str, value: &str) -> Option<i32> {
        if value.trim().is_empty() {
            self.messages.push(format!("{field} is required"));
            return None;
        }
        match value.trim().parse() {
            Ok(year) => Some(year),
            Err(_) => {
                warn!(field, value, "rejected form value");
                self.messages.push(format!("{field} must be a year"));
                None
            }
        }
    }

    fn percent(&mut self, field: &str, value: &str) -> Option<Decimal> {
        if value.trim().is_empty() {
            self.messages.push(format!("{field} is required"));
            return None;
        }
        match parse_percent(value) {
            Ok(rate) => Some(rate),
            Err(e) => {
                warn!(field, error = %e, "rejected form value");
                self.messages.push(format!("{field} must be a number"));
                None
            }
        }
    }

    fn parsed<T: FromStr>(&mut self, field: &str, value: &str) -> Option<T>
    where
        T::Err: std::fmt::Display,
    {
        if value.trim().is_empty() {
            self.messages.push(format!("{field} is required"));
            return None;
        }
        match value.parse() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(field, value, "rejected form value");
                self.messages.push(format!("{field}: {e}"));
                None
            }
        }
    }

    /// Finishes with the range checks for the fields that parsed.
    fn finish(mut self, range_checks: ValidationResult) -> ValidationResult {
        self.messages.extend(range_checks);
        self.messages.finish()
    }
}

/// Turns a merged result into the calculator input.
fn into_input<T>(input: T, result: ValidationResult) -> Result<T, ValidationResult> {
    if result.is_success() {
        Ok(input)
    } else {
        Err(result)
    }
}

/// Gross→net or net→gross form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalaryForm {
    pub kind: SalaryKind,
    pub salary: String,
    /// Blank means none.
    pub dependents: String,
    pub region: String,
    /// Blank means the official base.
    pub custom_base: String,
}

impl SalaryForm {
    pub fn parse(&self) -> Result<SalaryInput, ValidationResult> {
        let mut fields = FieldParser::default();
        let salary = fields.amount(self.kind.label(), &self.salary);
        let dependents = fields.count_or("Dependents", &self.dependents, 0);
        let region = fields.parsed::<Region>("Region", &self.region);
        let custom_base = if self.custom_base.trim().is_empty() {
            Some(InsuranceBase::Official)
        } else {
            fields
                .amount("Custom insurance base", &self.custom_base)
                .map(InsuranceBase::Custom)
        };

        // Fields that failed to parse are replaced by values that pass range checks.
        let input = SalaryInput {
            kind: self.kind,
            salary: salary.unwrap_or(1),
            dependents: dependents.unwrap_or(0),
            region: region.unwrap_or(Region::I),
            insurance_base: custom_base.unwrap_or_default(),
        };
        let result = fields.finish(input.validate());
        into_input(input, result)
    }
}

/// Personal income tax form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalIncomeTaxForm {
    pub monthly_gross_salary: String,
    pub dependents: String,
    /// Blank means none.
    pub other_deductions: String,
}

impl PersonalIncomeTaxForm {
    pub fn parse(&self) -> Result<PersonalIncomeTaxInput, ValidationResult> {
        let mut fields = FieldParser::default();
        let gross = fields.amount("Monthly gross salary", &self.monthly_gross_salary);
        let dependents = fields.count_or("Dependents", &self.dependents, 0);
        let other = fields.amount_or("Other deductions", &self.other_deductions, 0);

        let input = PersonalIncomeTaxInput {
            monthly_gross_salary: gross.unwrap_or(1),
            dependents: dependents.unwrap_or(0),
            other_deductions: if gross.is_some() { other.unwrap_or(0) } else { 0 },
        };
        let result = fields.finish(input.validate());
        into_input(input, result)
    }
}

/// One row of the lump-sum form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BhxhPeriodForm {
    pub id: String,
    pub start_year: String,
    pub end_year: String,
    pub months: String,
    pub average_salary: String,
}

/// Lump-sum form: any number of contribution periods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BhxhForm {
    pub periods: Vec<BhxhPeriodForm>,
}

impl BhxhForm {
    /// Parses every row.
    ///
    /// Range checks run on each row that parsed completely. Checks across
    /// rows (overlap, total months) only run once every row parsed.
    pub fn parse(&self) -> Result<BhxhInput, ValidationResult> {
        let mut messages = Messages::default();
        if self.periods.is_empty() {
            messages.push("At least one contribution period is required");
        }

        let mut periods = Vec::with_capacity(self.periods.len());
        for (index, row) in self.periods.iter().enumerate() {
            let number = index + 1;
            let mut fields = FieldParser::default();
            let start_year = fields.year(&format!("Period {number}: start year"), &row.start_year);
            let end_year = fields.year(&format!("Period {number}: end year"), &row.end_year);
            let months = fields.count(&format!("Period {number}: months"), &row.months);
            let average_salary =
                fields.amount(&format!("Period {number}: average salary"), &row.average_salary);
            messages.extend(fields.messages.finish());

            if let (Some(start_year), Some(end_year), Some(months), Some(average_salary)) =
                (start_year, end_year, months, average_salary)
            {
                let period = BhxhPeriod {
                    id: row.id.trim().to_string(),
                    start_year,
                    end_year,
                    months,
                    average_salary,
                };
                validate_period(number, &period, &mut messages);
                periods.push(period);
            }
        }

        if periods.len() == self.periods.len() {
            validate_period_set(&periods, &mut messages);
        }
        into_input(BhxhInput { periods }, messages.finish())
    }
}

/// Compound interest form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundInterestForm {
    pub principal: String,
    pub annual_rate_percent: String,
    pub years: String,
    /// Blank means none.
    pub monthly_contribution: String,
    /// Blank means yearly.
    pub compound_frequency: String,
}

impl CompoundInterestForm {
    pub fn parse(&self) -> Result<CompoundInterestInput, ValidationResult> {
        let mut fields = FieldParser::default();
        let principal = fields.amount("Principal", &self.principal);
        let rate = fields.percent("Annual rate", &self.annual_rate_percent);
        let years = fields.count("Years", &self.years);
        let monthly = fields.amount_or("Monthly contribution", &self.monthly_contribution, 0);
        let frequency = if self.compound_frequency.trim().is_empty() {
            Some(CompoundFrequency::Yearly)
        } else {
            fields.parsed::<CompoundFrequency>("Compound frequency", &self.compound_frequency)
        };

        let input = CompoundInterestInput {
            principal: principal.unwrap_or(0),
            annual_rate_percent: rate.unwrap_or(Decimal::ZERO),
            years: years.unwrap_or(0),
            monthly_contribution: monthly.unwrap_or(0),
            compound_frequency: frequency.unwrap_or(CompoundFrequency::Yearly),
        };
        let result = fields.finish(input.validate());
        into_input(input, result)
    }
}
