use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A Vietnamese minimum-wage zone. Each zone has its own statutory minimum
/// wage, which in turn caps the base for compulsory insurance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Region {
    I,
    II,
    III,
    IV,
}

/// Returned when a region code is not one of 1, 2, 3 or 4.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("region must be 1, 2, 3 or 4, got '{0}'")]
pub struct InvalidRegion(pub String);

impl Region {
    pub const ALL: [Region; 4] = [Region::I, Region::II, Region::III, Region::IV];

    pub fn code(self) -> u8 {
        match self {
            Self::I => 1,
            Self::II => 2,
            Self::III => 3,
            Self::IV => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::I),
            2 => Some(Self::II),
            3 => Some(Self::III),
            4 => Some(Self::IV),
            _ => None,
        }
    }

    /// Accepts `1`–`4` or the roman numerals `I`–`IV` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Self::from_code(code);
        }
        match s.to_ascii_uppercase().as_str() {
            "I" => Some(Self::I),
            "II" => Some(Self::II),
            "III" => Some(Self::III),
            "IV" => Some(Self::IV),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Region {
    type Error = InvalidRegion;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| InvalidRegion(code.to_string()))
    }
}

impl From<Region> for u8 {
    fn from(region: Region) -> Self {
        region.code()
    }
}

impl FromStr for Region {
    type Err = InvalidRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidRegion(s.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("Region {}", self.code()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_numeric_and_roman_codes() {
        assert_eq!(Region::parse("1"), Some(Region::I));
        assert_eq!(Region::parse(" iv "), Some(Region::IV));
        assert_eq!(Region::parse("III"), Some(Region::III));
    }

    #[test]
    fn parse_rejects_unknown_codes() {
        assert_eq!(Region::parse("0"), None);
        assert_eq!(Region::parse("5"), None);
        assert_eq!(Region::parse("V"), None);
        assert!("north".parse::<Region>().is_err());
    }

    #[test]
    fn serializes_as_numeric_code() {
        assert_eq!(serde_json::to_string(&Region::II).unwrap(), "2");
        assert_eq!(serde_json::from_str::<Region>("4").unwrap(), Region::IV);
        assert!(serde_json::from_str::<Region>("7").is_err());
    }
}
