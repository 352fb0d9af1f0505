//! Configuration management for the Supermarket Management System
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SMS_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{DEFAULT_UNIT_PRICE, MAX_LEDGER_AMOUNT};

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Sale pricing
    #[serde(default)]
    pub pricing: PricingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfig {
    /// Flat price charged per unit sold
    pub unit_price: Decimal,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("SMS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("pricing.unit_price", DEFAULT_UNIT_PRICE.to_string())?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SMS_ prefix)
            .add_source(
                Environment::with_prefix("SMS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings the services cannot work with
    pub fn validate(&self) -> AppResult<()> {
        if self.pricing.unit_price < Decimal::ZERO {
            return Err(AppError::Configuration(
                "pricing.unit_price must not be negative".to_string(),
            ));
        }
        if self.pricing.unit_price > MAX_LEDGER_AMOUNT {
            return Err(AppError::Configuration(format!(
                "pricing.unit_price must not exceed {}",
                MAX_LEDGER_AMOUNT
            )));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::Configuration(
                "database.min_connections exceeds database.max_connections".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            unit_price: DEFAULT_UNIT_PRICE,
        }
    }
}
