//! Vendor brands and their backend identities
//!
//! Hyundai (Bluelink) and Kia (UVO) run the same protocol on separate
//! backends. Each brand carries its own base URI, CCSP service and
//! application identifiers, and the client secret used for the OAuth
//! token exchange.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Vendor sub-backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Brand {
    Hyundai,
    Kia,
}

impl Brand {
    /// All supported brands
    pub const ALL: [Brand; 2] = [Brand::Hyundai, Brand::Kia];

    /// Lowercase brand name as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Hyundai => "hyundai",
            Brand::Kia => "kia",
        }
    }

    /// Backend identity of this brand
    pub fn profile(&self) -> &'static BrandProfile {
        match self {
            Brand::Hyundai => &HYUNDAI,
            Brand::Kia => &KIA,
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Brand {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hyundai" => Ok(Brand::Hyundai),
            "kia" => Ok(Brand::Kia),
            _ => Err(CoreError::UnknownBrand(s.to_string())),
        }
    }
}

impl TryFrom<String> for Brand {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Static backend identity of a brand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandProfile {
    /// Scheme, host and port of the brand's API
    pub base_uri: &'static str,
    /// `ccsp-service-id`, also the OAuth client id
    pub service_id: &'static str,
    /// `ccsp-application-id`
    pub application_id: &'static str,
    /// OAuth client secret paired with `service_id`
    pub client_secret: &'static str,
}

impl BrandProfile {
    /// Base64 `service_id:client_secret`, the value sent after `Basic `
    /// on the token exchange.
    pub fn token_auth(&self) -> String {
        BASE64.encode(format!("{}:{}", self.service_id, self.client_secret))
    }
}

const HYUNDAI: BrandProfile = BrandProfile {
    base_uri: "https://prd.eu-ccapi.hyundai.com:8080",
    service_id: "6d477c38-3ca4-4cf3-9557-2a1929a94654",
    application_id: "99cfff84-f4e2-4be8-a5ed-e5b755eb6581",
    client_secret: "KUy49XxPzLpLuoK0xhBC77W6VXhmtQR9iQhmIFjjoY4IpxsV",
};

const KIA: BrandProfile = BrandProfile {
    base_uri: "https://prd.eu-ccapi.kia.com:8080",
    service_id: "fdc85c00-0a2f-4c64-bcb4-2cfb1500730a",
    application_id: "693a33fa-c117-43f2-ae3b-61a02d24f417",
    client_secret: "secret",
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_profiles_are_complete() {
        for brand in Brand::ALL {
            let profile = brand.profile();
            assert!(profile.base_uri.starts_with("https://"));
            assert!(profile.base_uri.contains(brand.as_str()));
            assert!(!profile.service_id.is_empty());
            assert!(!profile.application_id.is_empty());
            assert!(!profile.token_auth().is_empty());
        }
    }

    #[test]
    fn test_profiles_are_distinct() {
        let h = Brand::Hyundai.profile();
        let k = Brand::Kia.profile();
        assert_ne!(h.base_uri, k.base_uri);
        assert_ne!(h.service_id, k.service_id);
        assert_ne!(h.application_id, k.application_id);
    }

    #[test]
    fn test_token_auth_encoding() {
        assert_eq!(
            Brand::Kia.profile().token_auth(),
            "ZmRjODVjMDAtMGEyZi00YzY0LWJjYjQtMmNmYjE1MDA3MzBhOnNlY3JldA=="
        );
        assert_eq!(
            Brand::Hyundai.profile().token_auth(),
            "NmQ0NzdjMzgtM2NhNC00Y2YzLTk1NTctMmExOTI5YTk0NjU0OktVeTQ5WHhQekxwTHVvSzB4aEJDNzdXNlZYaG10UVI5aVFobUlGampvWTRJcHhzVg=="
        );
    }

    #[test]
    fn test_parse_brand() {
        assert_eq!("kia".parse::<Brand>().unwrap(), Brand::Kia);
        assert_eq!(" Hyundai ".parse::<Brand>().unwrap(), Brand::Hyundai);
        assert!(matches!(
            "genesis".parse::<Brand>(),
            Err(CoreError::UnknownBrand(name)) if name == "genesis"
        ));
    }

    #[test]
    fn test_brand_serde() {
        let brand: Brand = serde_json::from_str("\"hyundai\"").unwrap();
        assert_eq!(brand, Brand::Hyundai);
        assert_eq!(serde_json::to_string(&Brand::Kia).unwrap(), "\"kia\"");
        let err = serde_json::from_str::<Brand>("\"genesis\"").unwrap_err();
        assert!(err.to_string().contains("unknown brand: genesis"));
    }

    #[test]
    fn test_brand_deserialize_ignores_case() {
        let brand: Brand = serde_json::from_str("\"KIA\"").unwrap();
        assert_eq!(brand, Brand::Kia);
    }
}
