use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Multipliers for the one-time social insurance (BHXH) withdrawal.
///
/// Each year of contributions made before `cutoff_year` pays out
/// `months_factor_before` months of average salary; each year from
/// `cutoff_year` onward pays out `months_factor_from` months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpSumPolicy {
    pub cutoff_year: i32,
    pub months_factor_before: Decimal,
    pub months_factor_from: Decimal,
}
