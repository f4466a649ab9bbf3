//! Account regions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Region an account is registered in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Eu,
    Us,
    Ca,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Eu => "eu",
            Region::Us => "us",
            Region::Ca => "ca",
        }
    }

    /// Whether the built-in brand profiles serve this region.
    ///
    /// Only the European backends are known; other regions are routed there.
    pub fn is_supported(&self) -> bool {
        matches!(self, Region::Eu)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eu" => Ok(Region::Eu),
            "us" => Ok(Region::Us),
            "ca" => Ok(Region::Ca),
            _ => Err(CoreError::UnknownRegion(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        assert_eq!("EU".parse::<Region>().unwrap(), Region::Eu);
        assert_eq!("ca".parse::<Region>().unwrap(), Region::Ca);
        assert!("unknown".parse::<Region>().is_err());
    }

    #[test]
    fn test_only_eu_supported() {
        assert!(Region::Eu.is_supported());
        assert!(!Region::Us.is_supported());
        assert!(!Region::Ca.is_supported());
    }
}
