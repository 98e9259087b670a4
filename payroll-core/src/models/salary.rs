use serde::{Deserialize, Serialize};

use crate::{Dong, Region};

/// Which side of the conversion the input amount is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SalaryKind {
    #[default]
    Gross,
    Net,
}

impl SalaryKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gross => "Gross salary",
            Self::Net => "Net salary",
        }
    }
}

/// How the insurance base is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "amount", rename_all = "camelCase")]
pub enum InsuranceBase {
    /// The salary itself, capped at the regional limit.
    #[default]
    Official,
    /// A declared base, used verbatim.
    Custom(Dong),
}

/// Input for both directions of the gross/net conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryInput {
    pub kind: SalaryKind,
    /// Gross salary for [`SalaryKind::Gross`], take-home pay for [`SalaryKind::Net`].
    pub salary: Dong,
    pub dependents: u32,
    pub region: Region,
    pub insurance_base: InsuranceBase,
}

impl SalaryInput {
    pub fn gross(salary: Dong, dependents: u32, region: Region) -> Self {
        Self {
            kind: SalaryKind::Gross,
            salary,
            dependents,
            region,
            insurance_base: InsuranceBase::Official,
        }
    }

    pub fn net(salary: Dong, dependents: u32, region: Region) -> Self {
        Self {
            kind: SalaryKind::Net,
            ..Self::gross(salary, dependents, region)
        }
    }

    pub fn with_custom_base(self, base: Dong) -> Self {
        Self {
            insurance_base: InsuranceBase::Custom(base),
            ..self
        }
    }
}

/// Employee insurance contributions for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceContribution {
    pub insurance_base: Dong,
    pub social: Dong,
    pub health: Dong,
    pub unemployment: Dong,
    pub total: Dong,
}

/// Contributions paid by the employer on top of the gross salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerContributions {
    pub social: Dong,
    pub health: Dong,
    pub unemployment: Dong,
    pub total: Dong,
    /// Gross salary plus the employer's contributions.
    pub total_cost: Dong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryCalculationResult {
    pub gross_salary: Dong,
    pub net_salary: Dong,

    pub insurance_base: Dong,
    pub social_insurance: Dong,
    pub health_insurance: Dong,
    pub unemployment_insurance: Dong,
    pub total_insurance: Dong,

    /// Gross salary minus employee insurance.
    pub taxable_income: Dong,
    pub personal_deduction: Dong,
    pub dependent_deduction: Dong,
    pub total_deduction: Dong,
    /// `max(0, taxable_income - total_deduction)`.
    pub tax_base: Dong,
    pub personal_income_tax: Dong,

    pub employer: EmployerContributions,
}
