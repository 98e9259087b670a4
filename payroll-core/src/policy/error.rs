use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Dong, Region};

/// A malformed policy table. These indicate a deployment or data defect,
/// never a problem with user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("no tax brackets provided")]
    NoTaxBrackets,

    #[error("first tax bracket must start at 0, starts at {0}")]
    FirstBracketNotAtZero(Dong),

    #[error("tax bracket {level} starts at {found}, expected {expected}")]
    NonContiguousBracket {
        level: usize,
        expected: Dong,
        found: Dong,
    },

    #[error("tax bracket {level} has upper bound {upper} not above its lower bound {lower}")]
    EmptyBracket { level: usize, lower: Dong, upper: Dong },

    #[error("tax bracket {level} is unbounded but is not the last bracket")]
    UnboundedBracketNotLast { level: usize },

    #[error("top tax bracket must be unbounded, ends at {0}")]
    BoundedTopBracket(Dong),

    #[error("tax bracket {level} rate must be between 0 and 1, got {rate}")]
    InvalidBracketRate { level: usize, rate: Decimal },

    #[error("{field} must be between 0 and 1, got {rate}")]
    InvalidRate { field: &'static str, rate: Decimal },

    #[error("minimum wage for {region} must be positive, got {amount}")]
    NonPositiveMinimumWage { region: Region, amount: Dong },

    #[error("no minimum wage given for {0}")]
    MissingRegionalWage(Region),

    #[error("minimum wage for {0} given more than once")]
    DuplicateRegionalWage(Region),

    #[error("insurance base cap multiplier must be positive, got {0}")]
    NonPositiveCapMultiplier(i64),

    #[error("{field} must not be negative, got {amount}")]
    NegativeDeduction { field: &'static str, amount: Dong },

    #[error("lump-sum months factor must not be negative, got {0}")]
    NegativeLumpSumFactor(Decimal),
}
