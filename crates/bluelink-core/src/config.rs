//! Account configuration
//!
//! The account file is either JSON (`{"username": ..., "brand": "kia", ...}`)
//! or TOML with the same keys; the format is picked by file extension.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::brand::Brand;
use crate::error::CoreResult;
use crate::region::Region;

/// Account credentials and backend selection for one session
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Account e-mail
    pub username: String,
    pub password: String,
    /// Vehicle PIN, required by remote commands
    #[serde(default)]
    pub pin: String,
    pub brand: Brand,
    #[serde(default)]
    pub region: Region,
}

impl Config {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        brand: Brand,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            pin: String::new(),
            brand,
            region: Region::default(),
        }
    }

    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = pin.into();
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Load from a `.toml` file, or from JSON for any other extension
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        load_file(path)
    }

    pub fn from_json(content: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> CoreResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Read a settings file: TOML for a `.toml` extension, JSON otherwise
pub fn load_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> CoreResult<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Ok(toml::from_str(&content)?),
        _ => Ok(serde_json::from_str(&content)?),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("pin", &"<redacted>")
            .field("brand", &self.brand)
            .field("region", &self.region)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_json() {
        let config = Config::from_json(
            r#"{"username":"a@b.c","password":"pw","pin":"1234","brand":"kia","region":"eu"}"#,
        )
        .unwrap();
        assert_eq!(config.username, "a@b.c");
        assert_eq!(config.pin, "1234");
        assert_eq!(config.brand, Brand::Kia);
        assert_eq!(config.region, Region::Eu);
    }

    #[test]
    fn test_pin_and_region_default() {
        let config =
            Config::from_json(r#"{"username":"a","password":"b","brand":"hyundai"}"#).unwrap();
        assert_eq!(config.pin, "");
        assert_eq!(config.region, Region::Eu);
    }

    #[test]
    fn test_unknown_brand_rejected() {
        let err = Config::from_json(r#"{"username":"a","password":"b","brand":"tesla"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown brand: tesla"));
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "username = \"driver@example.com\"\npassword = \"pw\"\nbrand = \"hyundai\"\nregion = \"ca\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.brand, Brand::Hyundai);
        assert_eq!(config.region, Region::Ca);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new("driver@example.com", "hunter2", Brand::Kia).with_pin("0000");
        let debug = format!("{:?}", config);
        assert!(debug.contains("driver@example.com"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("0000"));
    }
}
