//! Turns parsed arguments into calculator runs.

use payroll_core::calculations::{
    NetToGrossStrategy, SalaryConverter, compute_bhxh, compute_personal_income_tax,
    project_compound_interest,
};
use payroll_core::forms::{
    BhxhForm, BhxhPeriodForm, CompoundInterestForm, PersonalIncomeTaxForm, SalaryForm,
};
use payroll_core::{
    BhxhInput, BhxhResult, CompoundInterestResult, PayrollPolicy, SalaryCalculationResult,
    SalaryKind, TaxCalculationResult, Validate, ValidationResult,
};
use payroll_data::{PeriodLoaderError, load_periods};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::cli::{BhxhArgs, Command, InterestArgs, SalaryArgs, TaxArgs};

#[derive(Debug, Error)]
pub enum CommandError {
    /// Every problem found in the input.
    #[error("invalid input")]
    Invalid(Vec<String>),

    #[error(transparent)]
    Periods(#[from] PeriodLoaderError),
}

impl From<ValidationResult> for CommandError {
    fn from(result: ValidationResult) -> Self {
        Self::Invalid(result.into_messages())
    }
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Salary(SalaryCalculationResult),
    Tax(TaxCalculationResult),
    Bhxh(BhxhResult),
    Interest(CompoundInterestResult),
    Policy(PayrollPolicy),
}

pub fn execute(command: &Command, policy: &PayrollPolicy) -> Result<Report, CommandError> {
    match command {
        Command::GrossToNet(args) => {
            let input = salary_form(SalaryKind::Gross, args).parse()?;
            Ok(Report::Salary(SalaryConverter::new(policy).gross_to_net(&input)))
        }
        Command::NetToGross(args) => {
            let input = salary_form(SalaryKind::Net, &args.salary).parse()?;
            let strategy = if args.legacy {
                NetToGrossStrategy::legacy()
            } else {
                NetToGrossStrategy::Converge
            };
            let converter = SalaryConverter::new(policy).with_strategy(strategy);
            Ok(Report::Salary(converter.net_to_gross(&input)))
        }
        Command::Tax(args) => {
            let input = tax_form(args).parse()?;
            Ok(Report::Tax(compute_personal_income_tax(&input, policy)))
        }
        Command::Bhxh(args) => {
            let input = bhxh_input(args)?;
            Ok(Report::Bhxh(compute_bhxh(&input.periods, &policy.lump_sum)))
        }
        Command::Interest(args) => {
            let input = interest_form(args).parse()?;
            Ok(Report::Interest(project_compound_interest(&input)))
        }
        Command::Policy => Ok(Report::Policy(policy.clone())),
    }
}

fn salary_form(kind: SalaryKind, args: &SalaryArgs) -> SalaryForm {
    SalaryForm {
        kind,
        salary: args.salary.clone(),
        dependents: args.dependents.clone(),
        region: args.region.clone(),
        custom_base: args.custom_base.clone().unwrap_or_default(),
    }
}

fn tax_form(args: &TaxArgs) -> PersonalIncomeTaxForm {
    PersonalIncomeTaxForm {
        monthly_gross_salary: args.gross.clone(),
        dependents: args.dependents.clone(),
        other_deductions: args.other_deductions.clone(),
    }
}

fn interest_form(args: &InterestArgs) -> CompoundInterestForm {
    CompoundInterestForm {
        principal: args.principal.clone(),
        annual_rate_percent: args.rate.clone(),
        years: args.years.clone(),
        monthly_contribution: args.monthly.clone(),
        compound_frequency: args.frequency.clone(),
    }
}

fn bhxh_input(args: &BhxhArgs) -> Result<BhxhInput, CommandError> {
    if let Some(path) = &args.file {
        let periods = load_periods(path)?;
        debug!(path = %path.display(), periods = periods.len(), "read periods file");
        let input = BhxhInput { periods };
        input.validate().into_result().map_err(CommandError::Invalid)?;
        return Ok(input);
    }

    let mut malformed = Vec::new();
    let mut rows = Vec::with_capacity(args.periods.len());
    for (index, value) in args.periods.iter().enumerate() {
        match period_row(value) {
            Some(row) => rows.push(row),
            None => malformed.push(format!(
                "Period {}: expected START:END:MONTHS:SALARY, got '{value}'",
                index + 1
            )),
        }
    }
    if !malformed.is_empty() {
        return Err(CommandError::Invalid(malformed));
    }

    Ok(BhxhForm { periods: rows }.parse()?)
}

/// Splits `START:END:MONTHS:SALARY`.
fn period_row(value: &str) -> Option<BhxhPeriodForm> {
    let parts: Vec<&str> = value.split(':').collect();
    let [start_year, end_year, months, average_salary] = parts.as_slice() else {
        return None;
    };
    Some(BhxhPeriodForm {
        id: String::new(),
        start_year: start_year.to_string(),
        end_year: end_year.to_string(),
        months: months.to_string(),
        average_salary: average_salary.to_string(),
    })
}
