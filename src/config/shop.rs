//! Shop seed configuration loading from config.toml
//!
//! A fresh shop database can be stocked with staff and an initial fleet from a TOML file.
//! The file is optional: without it the shop starts empty and everything is added from
//! the menu.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file used when `SHOP_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct ShopConfig {
    /// Employees to create when the employees table is empty
    #[serde(default)]
    pub employees: Vec<EmployeeConfig>,
    /// Bikes to allocate when the bikes table is empty
    #[serde(default)]
    pub bikes: Vec<BikeConfig>,
}

/// Configuration for a single employee
#[derive(Debug, Deserialize, Clone)]
pub struct EmployeeConfig {
    /// Full name
    pub name: String,
    /// Job title
    pub position: String,
}

/// Configuration for a single bike
#[derive(Debug, Deserialize, Clone)]
pub struct BikeConfig {
    /// Category name (e.g., "Adult", "Electric")
    pub category: String,
    /// Model name
    pub model: String,
}

/// Loads shop configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ShopConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Returns the config path named by `SHOP_CONFIG`, or [`DEFAULT_CONFIG_PATH`].
#[must_use]
pub fn config_path() -> PathBuf {
    std::env::var("SHOP_CONFIG").map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Loads the shop configuration if the config file exists.
///
/// # Returns
/// * `Ok(Some(config))` - The file exists and parsed
/// * `Ok(None)` - There is no config file
/// * `Err(Error)` - The file exists but could not be read or parsed
pub fn load_optional_config<P: AsRef<Path>>(path: P) -> Result<Option<ShopConfig>> {
    if path.as_ref().exists() {
        load_config(path).map(Some)
    } else {
        Ok(None)
    }
}
