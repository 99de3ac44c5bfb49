//! Bot configuration loading from config.toml
//!
//! The economy settings (claim amount and cooldown), catalog listing limit and
//! the live breaks to seed are read from a TOML file. The path defaults to
//! `./config.toml` and can be overridden with `CONFIG_PATH`.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Milliseconds in one hour
pub const HOUR_MS: i64 = 60 * 60 * 1000;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Claim rules
    pub economy: EconomyConfig,
    /// Catalog listing settings
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Live breaks seeded into the database at startup
    #[serde(default)]
    pub live_breaks: Vec<LiveBreakConfig>,
}

/// Claim amount and cooldown
#[derive(Debug, Deserialize, Clone)]
pub struct EconomyConfig {
    /// Coins credited per successful claim
    pub claim_amount: i64,
    /// Hours that must pass between two claims by the same user
    #[serde(default = "default_cooldown_hours")]
    pub claim_cooldown_hours: u32,
}

/// Catalog settings
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Maximum number of cards shown by the debug listing
    #[serde(default = "default_list_limit")]
    pub list_limit: u64,
}

/// A live break users can join
#[derive(Debug, Deserialize, Clone)]
pub struct LiveBreakConfig {
    /// Display name of the break
    pub name: String,
    /// Entry price in coins
    pub price: i64,
}

const fn default_cooldown_hours() -> u32 {
    4
}

const fn default_list_limit() -> u64 {
    50
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
        }
    }
}

impl EconomyConfig {
    /// The claim cooldown in milliseconds.
    #[must_use]
    pub fn cooldown_ms(&self) -> i64 {
        i64::from(self.claim_cooldown_hours) * HOUR_MS
    }
}

impl AppConfig {
    /// Checks the values serde cannot express as types.
    ///
    /// # Errors
    /// Returns `Error::Config` if the claim amount, cooldown or listing limit is
    /// not positive, or if a live break has an empty or repeated name or a
    /// negative price.
    pub fn validate(&self) -> Result<()> {
        if self.economy.claim_amount <= 0 {
            return Err(Error::Config {
                message: format!(
                    "economy.claim_amount must be positive, got {}",
                    self.economy.claim_amount
                ),
            });
        }
        if self.economy.claim_cooldown_hours == 0 {
            return Err(Error::Config {
                message: "economy.claim_cooldown_hours must be positive".to_string(),
            });
        }
        if self.catalog.list_limit == 0 {
            return Err(Error::Config {
                message: "catalog.list_limit must be positive".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for live_break in &self.live_breaks {
            let name = live_break.name.trim();
            if name.is_empty() {
                return Err(Error::Config {
                    message: "live break name cannot be empty".to_string(),
                });
            }
            if live_break.price < 0 {
                return Err(Error::Config {
                    message: format!("live break '{name}' has a negative price"),
                });
            }
            if !seen.insert(name) {
                return Err(Error::Config {
                    message: format!("live break '{name}' is defined more than once"),
                });
            }
        }
        Ok(())
    }
}

/// Parses and validates configuration from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML is invalid, required fields are missing,
/// or validation fails.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing or values are out of range
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    let config = parse_config(&contents)?;
    info!(
        claim_amount = config.economy.claim_amount,
        cooldown_hours = config.economy.claim_cooldown_hours,
        live_breaks = config.live_breaks.len(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Loads configuration from `CONFIG_PATH`, or `./config.toml` when unset.
///
/// # Errors
/// See [`load_config`].
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [economy]
            claim_amount = 250
            claim_cooldown_hours = 6

            [catalog]
            list_limit = 10

            [[live_breaks]]
            name = "Friday Break"
            price = 100

            [[live_breaks]]
            name = "Mega Break"
            price = 500
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.economy.claim_amount, 250);
        assert_eq!(config.economy.claim_cooldown_hours, 6);
        assert_eq!(config.economy.cooldown_ms(), 6 * HOUR_MS);
        assert_eq!(config.catalog.list_limit, 10);
        assert_eq!(config.live_breaks.len(), 2);
        assert_eq!(config.live_breaks[1].name, "Mega Break");
        assert_eq!(config.live_breaks[1].price, 500);
    }

    #[test]
    fn test_defaults_apply() {
        let config = parse_config("[economy]\nclaim_amount = 100\n").unwrap();
        assert_eq!(config.economy.claim_cooldown_hours, 4);
        assert_eq!(config.economy.cooldown_ms(), 14_400_000);
        assert_eq!(config.catalog.list_limit, 50);
        assert!(config.live_breaks.is_empty());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let zero_amount = parse_config("[economy]\nclaim_amount = 0\n");
        assert!(matches!(zero_amount, Err(Error::Config { .. })));

        let zero_cooldown =
            parse_config("[economy]\nclaim_amount = 10\nclaim_cooldown_hours = 0\n");
        assert!(matches!(zero_cooldown, Err(Error::Config { .. })));

        let negative_price = parse_config(
            "[economy]\nclaim_amount = 10\n[[live_breaks]]\nname = \"A\"\nprice = -1\n",
        );
        assert!(matches!(negative_price, Err(Error::Config { .. })));

        let duplicate_break = parse_config(
            "[economy]\nclaim_amount = 10\n\
             [[live_breaks]]\nname = \"A\"\nprice = 1\n\
             [[live_breaks]]\nname = \"A\"\nprice = 2\n",
        );
        assert!(matches!(duplicate_break, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_economy_section_is_an_error() {
        let result = parse_config("[catalog]\nlist_limit = 5\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("definitely/not/here/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
