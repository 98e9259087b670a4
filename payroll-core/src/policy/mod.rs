//! Dated policy tables: tax brackets, insurance rates, regional minimum
//! wages, family deductions and lump-sum multipliers.
//!
//! Calculators assume the policy they are given has passed
//! [`PayrollPolicy::validate`]. The built-in [`PayrollPolicy::vn_2025`] table
//! is covered by the tests in this module; tables loaded from disk are
//! validated by their loader.

mod error;
mod vn_2025;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use error::PolicyError;

use crate::{DeductionPolicy, InsurancePolicy, LumpSumPolicy, Region, RegionalWages, TaxBracket};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollPolicy {
    pub name: String,
    pub effective_from: NaiveDate,
    pub tax_brackets: Vec<TaxBracket>,
    pub insurance: InsurancePolicy,
    pub deductions: DeductionPolicy,
    pub lump_sum: LumpSumPolicy,
}

impl PayrollPolicy {
    /// The canonical 2025 table.
    pub fn vn_2025() -> Self {
        vn_2025::policy()
    }

    /// Checks every table for structural defects.
    ///
    /// # Errors
    ///
    /// Returns the first [`PolicyError`] found.
    pub fn validate(&self) -> Result<(), PolicyError> {
        validate_brackets(&self.tax_brackets)?;
        validate_insurance(&self.insurance)?;
        validate_deductions(&self.deductions)?;
        validate_lump_sum(&self.lump_sum)
    }
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self::vn_2025()
    }
}

impl RegionalWages {
    /// Builds the table from `(region, wage)` pairs, requiring exactly one
    /// entry per region.
    ///
    /// # Errors
    ///
    /// [`PolicyError::DuplicateRegionalWage`] or
    /// [`PolicyError::MissingRegionalWage`].
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Region, i64)>,
    ) -> Result<Self, PolicyError> {
        let mut wages: [Option<i64>; 4] = [None; 4];
        for (region, amount) in entries {
            let slot = &mut wages[usize::from(region.code()) - 1];
            if slot.is_some() {
                return Err(PolicyError::DuplicateRegionalWage(region));
            }
            *slot = Some(amount);
        }

        let wage = |region: Region| {
            wages[usize::from(region.code()) - 1].ok_or(PolicyError::MissingRegionalWage(region))
        };

        Ok(Self {
            region_1: wage(Region::I)?,
            region_2: wage(Region::II)?,
            region_3: wage(Region::III)?,
            region_4: wage(Region::IV)?,
        })
    }
}

fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), PolicyError> {
    let Some(first) = brackets.first() else {
        return Err(PolicyError::NoTaxBrackets);
    };
    if first.lower_bound != 0 {
        return Err(PolicyError::FirstBracketNotAtZero(first.lower_bound));
    }

    let last_index = brackets.len() - 1;
    let mut expected_lower = 0;
    for (index, bracket) in brackets.iter().enumerate() {
        let level = index + 1;
        if bracket.lower_bound != expected_lower {
            return Err(PolicyError::NonContiguousBracket {
                level,
                expected: expected_lower,
                found: bracket.lower_bound,
            });
        }
        if !is_fraction(bracket.rate) {
            return Err(PolicyError::InvalidBracketRate {
                level,
                rate: bracket.rate,
            });
        }
        match bracket.upper_bound {
            Some(upper) if upper <= bracket.lower_bound => {
                return Err(PolicyError::EmptyBracket {
                    level,
                    lower: bracket.lower_bound,
                    upper,
                });
            }
            Some(upper) if index == last_index => {
                return Err(PolicyError::BoundedTopBracket(upper));
            }
            Some(upper) => expected_lower = upper,
            None if index != last_index => {
                return Err(PolicyError::UnboundedBracketNotLast { level });
            }
            None => {}
        }
    }
    Ok(())
}

fn validate_insurance(policy: &InsurancePolicy) -> Result<(), PolicyError> {
    let rates = [
        ("social insurance rate", policy.social_rate),
        ("health insurance rate", policy.health_rate),
        ("unemployment insurance rate", policy.unemployment_rate),
        ("employer social insurance rate", policy.employer_social_rate),
        ("employer health insurance rate", policy.employer_health_rate),
        (
            "employer unemployment insurance rate",
            policy.employer_unemployment_rate,
        ),
    ];
    for (field, rate) in rates {
        if !is_fraction(rate) {
            return Err(PolicyError::InvalidRate { field, rate });
        }
    }

    for (region, amount) in policy.regional_minimum_wages.iter() {
        if amount <= 0 {
            return Err(PolicyError::NonPositiveMinimumWage { region, amount });
        }
    }

    if policy.base_cap_multiplier <= 0 {
        return Err(PolicyError::NonPositiveCapMultiplier(
            policy.base_cap_multiplier,
        ));
    }
    Ok(())
}

fn validate_deductions(policy: &DeductionPolicy) -> Result<(), PolicyError> {
    if policy.personal_deduction < 0 {
        return Err(PolicyError::NegativeDeduction {
            field: "personal deduction",
            amount: policy.personal_deduction,
        });
    }
    if policy.dependent_deduction < 0 {
        return Err(PolicyError::NegativeDeduction {
            field: "dependent deduction",
            amount: policy.dependent_deduction,
        });
    }
    Ok(())
}

fn validate_lump_sum(policy: &LumpSumPolicy) -> Result<(), PolicyError> {
    for factor in [policy.months_factor_before, policy.months_factor_from] {
        if factor < Decimal::ZERO {
            return Err(PolicyError::NegativeLumpSumFactor(factor));
        }
    }
    Ok(())
}

fn is_fraction(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}
