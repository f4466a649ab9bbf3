//! Configuration file handling for the bluelink CLI

use anyhow::{Context, Result};
use bluelink_client::{Brand, Config as AccountConfig, Region};
use bluelink_core::config::load_file;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the CLI tool
///
/// Every field is optional so that flags and environment variables can fill
/// in whatever the file leaves out.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub username: Option<String>,
    pub password: Option<String>,
    pub pin: Option<String>,
    pub brand: Option<Brand>,
    pub region: Option<Region>,
    /// Default output format
    pub output: Option<String>,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// Same rule as the account loader: `.toml` files are TOML, anything
    /// else is the JSON format of the vendor example program.
    pub fn load_from(path: &Path) -> Result<Self> {
        load_file(path).with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("bluelink");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(&self, args: AccountArgs<'_>) -> MergedConfig {
        MergedConfig {
            username: args
                .username
                .map(String::from)
                .or_else(|| self.username.clone()),
            password: args
                .password
                .map(String::from)
                .or_else(|| self.password.clone()),
            pin: self.pin.clone().unwrap_or_default(),
            brand: args.brand.or(self.brand),
            region: self.region.unwrap_or_default(),
            output: args
                .output
                .map(String::from)
                .or_else(|| self.output.clone())
                .unwrap_or_else(|| "table".to_string()),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("brand", &self.brand)
            .field("region", &self.region)
            .field("output", &self.output)
            .finish()
    }
}

/// Account-related values given on the command line or in the environment
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountArgs<'a> {
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    pub brand: Option<Brand>,
    pub output: Option<&'a str>,
}

/// Fully resolved configuration after merging CLI args
#[derive(Clone)]
pub struct MergedConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub pin: String,
    pub brand: Option<Brand>,
    pub region: Region,
    pub output: String,
}

impl MergedConfig {
    pub fn brand(&self) -> Result<Brand> {
        self.brand
            .context("No brand configured (use --brand or set `brand` in the config file)")
    }

    /// Account configuration for a client session
    pub fn account(&self) -> Result<AccountConfig> {
        let username = self
            .username
            .clone()
            .context("No username configured (use --username or BLUELINK_USERNAME)")?;
        let password = self
            .password
            .clone()
            .context("No password configured (use --password or BLUELINK_PASSWORD)")?;

        Ok(AccountConfig::new(username, password, self.brand()?)
            .with_pin(self.pin.clone())
            .with_region(self.region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "username = \"driver@example.com\"\npassword = \"hunter2\"\nbrand = \"kia\"\noutput = \"json\""
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.username.as_deref(), Some("driver@example.com"));
        assert_eq!(config.brand, Some(Brand::Kia));
        assert_eq!(config.output.as_deref(), Some("json"));
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(
            file,
            r#"{{"username": "driver@example.com", "password": "hunter2", "pin": "1234", "brand": "hyundai"}}"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.brand, Some(Brand::Hyundai));
        assert_eq!(config.pin.as_deref(), Some("1234"));
    }

    #[test]
    fn test_load_other_extension_as_json() {
        let mut file = tempfile::Builder::new().suffix(".conf").tempfile().unwrap();
        writeln!(file, r#"{{"username": "driver@example.com", "brand": "kia"}}"#).unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.username.as_deref(), Some("driver@example.com"));
        assert_eq!(config.brand, Some(Brand::Kia));
    }

    #[test]
    fn test_load_unknown_brand() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "brand = \"tesla\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown brand: tesla"));
    }

    #[test]
    fn test_args_override_file() {
        let file = Config {
            username: Some("file@example.com".to_string()),
            password: Some("file".to_string()),
            brand: Some(Brand::Hyundai),
            ..Default::default()
        };
        let merged = file.merge_with_args(AccountArgs {
            username: Some("flag@example.com"),
            brand: Some(Brand::Kia),
            ..Default::default()
        });

        assert_eq!(merged.username.as_deref(), Some("flag@example.com"));
        assert_eq!(merged.password.as_deref(), Some("file"));
        assert_eq!(merged.brand, Some(Brand::Kia));
        assert_eq!(merged.output, "table");

        let account = merged.account().unwrap();
        assert_eq!(account.username, "flag@example.com");
        assert_eq!(account.brand, Brand::Kia);
    }

    #[test]
    fn test_missing_credentials() {
        let merged = Config::default().merge_with_args(AccountArgs {
            brand: Some(Brand::Kia),
            ..Default::default()
        });
        assert!(merged.account().is_err());
        assert_eq!(merged.brand().unwrap(), Brand::Kia);
    }

    #[test]
    fn test_debug_hides_password() {
        let config = Config {
            password: Some("hunter2".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
