use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Dong;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompoundFrequency {
    #[default]
    Yearly,
    SemiAnnually,
    Quarterly,
    Monthly,
    Daily,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown compound frequency '{0}' (expected yearly, semi-annually, quarterly, monthly or daily)")]
pub struct InvalidCompoundFrequency(pub String);

impl CompoundFrequency {
    pub const ALL: [CompoundFrequency; 5] = [
        Self::Yearly,
        Self::SemiAnnually,
        Self::Quarterly,
        Self::Monthly,
        Self::Daily,
    ];

    /// Number of compounding steps per year.
    pub fn periods_per_year(self) -> u32 {
        match self {
            Self::Yearly => 1,
            Self::SemiAnnually => 2,
            Self::Quarterly => 4,
            Self::Monthly => 12,
            Self::Daily => 365,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yearly => "yearly",
            Self::SemiAnnually => "semi-annually",
            Self::Quarterly => "quarterly",
            Self::Monthly => "monthly",
            Self::Daily => "daily",
        }
    }
}

impl FromStr for CompoundFrequency {
    type Err = InvalidCompoundFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "yearly" | "annually" | "1" => Ok(Self::Yearly),
            "semi-annually" | "half-yearly" | "2" => Ok(Self::SemiAnnually),
            "quarterly" | "4" => Ok(Self::Quarterly),
            "monthly" | "12" => Ok(Self::Monthly),
            "daily" | "365" => Ok(Self::Daily),
            _ => Err(InvalidCompoundFrequency(s.to_string())),
        }
    }
}

impl fmt::Display for CompoundFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestInput {
    pub principal: Dong,
    /// Nominal annual rate in percent, e.g. `6.5`.
    pub annual_rate_percent: Decimal,
    pub years: u32,
    pub monthly_contribution: Dong,
    pub compound_frequency: CompoundFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyGrowth {
    pub year: u32,
    pub start_amount: Dong,
    pub contribution: Dong,
    pub interest: Dong,
    pub end_amount: Dong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestResult {
    pub principal: Dong,
    /// Principal plus every periodic contribution.
    pub total_contributions: Dong,
    pub total_interest: Dong,
    pub final_amount: Dong,
    pub yearly_breakdown: Vec<YearlyGrowth>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_names_and_period_counts() {
        assert_eq!(
            "Monthly".parse::<CompoundFrequency>(),
            Ok(CompoundFrequency::Monthly)
        );
        assert_eq!(
            "semi_annually".parse::<CompoundFrequency>(),
            Ok(CompoundFrequency::SemiAnnually)
        );
        assert_eq!(
            "365".parse::<CompoundFrequency>(),
            Ok(CompoundFrequency::Daily)
        );
        assert!("weekly".parse::<CompoundFrequency>().is_err());
    }

    #[test]
    fn serializes_in_upper_snake_case() {
        assert_eq!(
            serde_json::to_string(&CompoundFrequency::SemiAnnually).unwrap(),
            "\"SEMI_ANNUALLY\""
        );
        assert_eq!(
            serde_json::from_str::<CompoundFrequency>("\"YEARLY\"").unwrap(),
            CompoundFrequency::Yearly
        );
    }

    #[test]
    fn periods_per_year_matches_frequency() {
        let periods: Vec<u32> = CompoundFrequency::ALL
            .iter()
            .map(|f| f.periods_per_year())
            .collect();

        assert_eq!(periods, vec![1, 2, 4, 12, 365]);
    }
}
