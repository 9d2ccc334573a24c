/// Database configuration and connection management
pub mod database;

/// Shop seed configuration loading from config.toml
pub mod shop;
