use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BracketTax, Dong};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalIncomeTaxInput {
    pub monthly_gross_salary: Dong,
    pub dependents: u32,
    /// Insurance contributions and other tax-exempt amounts.
    pub other_deductions: Dong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationResult {
    pub monthly_gross_salary: Dong,
    pub other_deductions: Dong,
    pub taxable_income: Dong,
    pub personal_deduction: Dong,
    pub dependent_deduction: Dong,
    pub total_deduction: Dong,
    pub tax_base: Dong,
    pub personal_income_tax: Dong,
    pub net_income: Dong,
    /// Tax as a fraction of gross salary, to four decimal places.
    pub effective_rate: Decimal,
    /// Rate of the highest bracket the tax base reaches.
    pub marginal_rate: Decimal,
    pub brackets: Vec<BracketTax>,
}
