use serde::{Deserialize, Serialize};

use crate::Dong;

/// A run of social-insurance contributions at one average salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BhxhPeriod {
    #[serde(default)]
    pub id: String,
    pub start_year: i32,
    pub end_year: i32,
    pub months: u32,
    pub average_salary: Dong,
}

/// Every contribution period of one person.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BhxhInput {
    pub periods: Vec<BhxhPeriod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BhxhResult {
    pub total_amount: Dong,
    /// Months-weighted average salary across all periods.
    pub average_salary: Dong,
    pub total_months: u32,
    pub months_before_cutoff: u32,
    pub months_from_cutoff: u32,
}
