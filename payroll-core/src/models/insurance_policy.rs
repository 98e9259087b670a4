use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Dong, Region};

/// Statutory monthly minimum wage for each region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalWages {
    pub region_1: Dong,
    pub region_2: Dong,
    pub region_3: Dong,
    pub region_4: Dong,
}

impl RegionalWages {
    pub fn get(&self, region: Region) -> Dong {
        match region {
            Region::I => self.region_1,
            Region::II => self.region_2,
            Region::III => self.region_3,
            Region::IV => self.region_4,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, Dong)> + '_ {
        Region::ALL.into_iter().map(|region| (region, self.get(region)))
    }
}

/// Compulsory insurance rates and the caps on the insurance base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePolicy {
    /// Employee social insurance (BHXH) rate.
    pub social_rate: Decimal,
    /// Employee health insurance (BHYT) rate.
    pub health_rate: Decimal,
    /// Employee unemployment insurance (BHTN) rate.
    pub unemployment_rate: Decimal,

    pub employer_social_rate: Decimal,
    pub employer_health_rate: Decimal,
    pub employer_unemployment_rate: Decimal,

    pub regional_minimum_wages: RegionalWages,

    /// The official insurance base is capped at this multiple of the
    /// regional minimum wage.
    pub base_cap_multiplier: i64,
}

impl InsurancePolicy {
    /// Highest official insurance base for `region`.
    pub fn insurance_base_cap(&self, region: Region) -> Dong {
        self.regional_minimum_wages
            .get(region)
            .saturating_mul(self.base_cap_multiplier)
    }

    /// Combined employee contribution rate.
    pub fn employee_rate(&self) -> Decimal {
        self.social_rate + self.health_rate + self.unemployment_rate
    }

    /// Combined employer contribution rate.
    pub fn employer_rate(&self) -> Decimal {
        self.employer_social_rate + self.employer_health_rate + self.employer_unemployment_rate
    }
}
