//! Request bodies and their conversion into calculator inputs.
//!
//! Field problems that serde cannot express (an unknown region code, a
//! custom insurance mode without a base) are reported alongside the range
//! checks, so a client sees every problem in one 400 response.

use payroll_core::{
    BhxhInput, CompoundFrequency, CompoundInterestInput, Dong, InsuranceBase,
    PersonalIncomeTaxInput, Region, SalaryInput, SalaryKind, Validate, ValidationResult,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsuranceMode {
    #[default]
    Official,
    Custom,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrossToNetRequest {
    pub gross_salary: Dong,
    #[serde(default)]
    pub dependents: u32,
    pub region: u8,
    #[serde(default)]
    pub insurance_mode: InsuranceMode,
    pub custom_base: Option<Dong>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetToGrossRequest {
    pub net_salary: Dong,
    #[serde(default)]
    pub dependents: u32,
    pub region: u8,
    #[serde(default)]
    pub insurance_mode: InsuranceMode,
    pub custom_base: Option<Dong>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalIncomeTaxRequest {
    pub monthly_gross_salary: Dong,
    #[serde(default)]
    pub dependents: u32,
    #[serde(default)]
    pub other_deductions: Dong,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestRequest {
    pub principal: Dong,
    pub annual_rate_percent: Decimal,
    pub years: u32,
    #[serde(default)]
    pub monthly_contribution: Dong,
    /// `YEARLY`, `SEMI_ANNUALLY`, `QUARTERLY`, `MONTHLY` or `DAILY`.
    pub compound_frequency: Option<String>,
}

/// Accepts `input` when neither `messages` nor its own validation found a
/// problem.
fn checked<T: Validate>(input: T, messages: Vec<String>) -> Result<T> {
    ValidationResult::from_messages(messages)
        .merge(input.validate())
        .into_result()
        .map(|()| input)
        .map_err(ApiError::Validation)
}

fn salary_input(
    kind: SalaryKind,
    salary: Dong,
    dependents: u32,
    region: u8,
    mode: InsuranceMode,
    custom_base: Option<Dong>,
) -> Result<SalaryInput> {
    let mut messages = Vec::new();

    let region = Region::from_code(region).unwrap_or_else(|| {
        messages.push("Region must be 1, 2, 3 or 4".to_string());
        Region::I
    });
    let insurance_base = match (mode, custom_base) {
        (InsuranceMode::Official, _) => InsuranceBase::Official,
        (InsuranceMode::Custom, Some(base)) => InsuranceBase::Custom(base),
        (InsuranceMode::Custom, None) => {
            messages.push("Custom insurance base is required when insuranceMode is custom".to_string());
            InsuranceBase::Official
        }
    };

    checked(
        SalaryInput {
            kind,
            salary,
            dependents,
            region,
            insurance_base,
        },
        messages,
    )
}

impl TryFrom<GrossToNetRequest> for SalaryInput {
    type Error = ApiError;

    fn try_from(req: GrossToNetRequest) -> Result<Self> {
        salary_input(
            SalaryKind::Gross,
            req.gross_salary,
            req.dependents,
            req.region,
            req.insurance_mode,
            req.custom_base,
        )
    }
}

impl TryFrom<NetToGrossRequest> for SalaryInput {
    type Error = ApiError;

    fn try_from(req: NetToGrossRequest) -> Result<Self> {
        salary_input(
            SalaryKind::Net,
            req.net_salary,
            req.dependents,
            req.region,
            req.insurance_mode,
            req.custom_base,
        )
    }
}

impl TryFrom<PersonalIncomeTaxRequest> for PersonalIncomeTaxInput {
    type Error = ApiError;

    fn try_from(req: PersonalIncomeTaxRequest) -> Result<Self> {
        checked(
            PersonalIncomeTaxInput {
                monthly_gross_salary: req.monthly_gross_salary,
                dependents: req.dependents,
                other_deductions: req.other_deductions,
            },
            Vec::new(),
        )
    }
}

impl TryFrom<CompoundInterestRequest> for CompoundInterestInput {
    type Error = ApiError;

    fn try_from(req: CompoundInterestRequest) -> Result<Self> {
        let mut messages = Vec::new();
        let compound_frequency = match req.compound_frequency.as_deref() {
            None => CompoundFrequency::Yearly,
            Some(value) => value.parse().unwrap_or_else(|e| {
                messages.push(format!("Compound frequency: {e}"));
                CompoundFrequency::Yearly
            }),
        };

        checked(
            CompoundInterestInput {
                principal: req.principal,
                annual_rate_percent: req.annual_rate_percent,
                years: req.years,
                monthly_contribution: req.monthly_contribution,
                compound_frequency,
            },
            messages,
        )
    }
}

pub fn bhxh_input(input: BhxhInput) -> Result<BhxhInput> {
    checked(input, Vec::new())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn gross_request(region: u8, mode: InsuranceMode, custom_base: Option<Dong>) -> GrossToNetRequest {
        GrossToNetRequest {
            gross_salary: 30_000_000,
            dependents: 1,
            region,
            insurance_mode: mode,
            custom_base,
        }
    }

    fn messages<T: std::fmt::Debug>(result: Result<T>) -> Vec<String> {
        match result {
            Err(ApiError::Validation(messages)) => messages,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn official_mode_ignores_custom_base() {
        let input = SalaryInput::try_from(gross_request(2, InsuranceMode::Official, Some(1))).unwrap();

        assert_eq!(input, SalaryInput::gross(30_000_000, 1, Region::II));
    }

    #[test]
    fn custom_mode_uses_base() {
        let input =
            SalaryInput::try_from(gross_request(1, InsuranceMode::Custom, Some(5_000_000))).unwrap();

        assert_eq!(input.insurance_base, InsuranceBase::Custom(5_000_000));
    }

    #[test]
    fn bad_region_and_missing_base_are_both_reported() {
        assert_eq!(
            messages(SalaryInput::try_from(gross_request(7, InsuranceMode::Custom, None))),
            vec![
                "Region must be 1, 2, 3 or 4",
                "Custom insurance base is required when insuranceMode is custom",
            ]
        );
    }

    #[test]
    fn insurance_mode_parses_lowercase() {
        let req: GrossToNetRequest = serde_json::from_str(
            r#"{"grossSalary": 1, "region": 1, "insuranceMode": "custom", "customBase": 2}"#,
        )
        .unwrap();

        assert_eq!(req.insurance_mode, InsuranceMode::Custom);
        assert_eq!(req.dependents, 0);
    }

    #[test]
    fn frequency_defaults_to_yearly_and_rejects_unknown() {
        let req = |frequency: Option<&str>| CompoundInterestRequest {
            principal: 1_000_000,
            annual_rate_percent: Decimal::from(5),
            years: 1,
            monthly_contribution: 0,
            compound_frequency: frequency.map(str::to_string),
        };

        assert_eq!(
            CompoundInterestInput::try_from(req(None)).unwrap().compound_frequency,
            CompoundFrequency::Yearly
        );
        assert_eq!(
            CompoundInterestInput::try_from(req(Some("SEMI_ANNUALLY"))).unwrap().compound_frequency,
            CompoundFrequency::SemiAnnually
        );
        assert_eq!(messages(CompoundInterestInput::try_from(req(Some("hourly")))).len(), 1);
    }
}
