use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Dong;

/// One band of the monthly progressive income-tax schedule.
///
/// `upper_bound` is `None` for the top, unbounded band. An income exactly at
/// `upper_bound` belongs to this band, not the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBracket {
    pub lower_bound: Dong,
    pub upper_bound: Option<Dong>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(lower_bound: Dong, upper_bound: Option<Dong>, rate: Decimal) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate,
        }
    }
}

/// Tax attributed to a single bracket for a given tax base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketTax {
    /// 1-based bracket level.
    pub level: usize,
    pub lower_bound: Dong,
    pub upper_bound: Option<Dong>,
    pub rate: Decimal,
    /// Portion of the tax base falling inside this bracket.
    pub taxable_amount: Dong,
    /// `taxable_amount × rate`, rounded down.
    pub tax: Dong,
}
