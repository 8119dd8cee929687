//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_KEY` - Key the cart is stored under (default: `artisan_boulangerie_cart`)
//! - `CART_STORAGE_DIR` - Directory for file-backed storage (default: `.artisan-cart`)
//! - `CART_STORAGE_QUOTA_BYTES` - Reject cart writes larger than this many bytes
//! - `CART_CURRENCY` - Currency label for display (default: `DT`)
//! - `CART_PRICE_DECIMALS` - Digits after the decimal point, 0-6 (default: 3)

use std::path::PathBuf;

use artisan_core::PriceFormat;
use thiserror::Error;

use crate::storage::FileStorage;
use crate::store::{CartStore, DEFAULT_STORAGE_KEY};

const DEFAULT_STORAGE_DIR: &str = ".artisan-cart";
const MAX_PRICE_DECIMALS: usize = 6;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key the cart is persisted under
    pub storage_key: String,
    /// Directory holding file-backed storage
    pub storage_dir: PathBuf,
    /// Maximum size of a persisted cart, in bytes
    pub storage_quota_bytes: Option<usize>,
    /// How prices are displayed
    pub price_format: PriceFormat,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_quota_bytes: None,
            price_format: PriceFormat::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_key = lookup("CART_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let storage_dir = lookup("CART_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let storage_quota_bytes = lookup("CART_STORAGE_QUOTA_BYTES")
            .map(|value| parse_positive("CART_STORAGE_QUOTA_BYTES", &value))
            .transpose()?;

        let currency = lookup("CART_CURRENCY")
            .unwrap_or_else(|| PriceFormat::DEFAULT_CURRENCY.to_string());

        let decimals = match lookup("CART_PRICE_DECIMALS") {
            Some(value) => parse_decimals(&value)?,
            None => PriceFormat::DEFAULT_DECIMALS,
        };

        Ok(Self {
            storage_key,
            storage_dir,
            storage_quota_bytes,
            price_format: PriceFormat::new(currency, decimals),
        })
    }

    /// File-backed storage as configured.
    #[must_use]
    pub fn file_storage(&self) -> FileStorage {
        let storage = FileStorage::new(&self.storage_dir);
        match self.storage_quota_bytes {
            Some(bytes) => storage.with_quota(bytes),
            None => storage,
        }
    }

    /// A cart store over the configured file storage and key.
    #[must_use]
    pub fn open_store(&self) -> CartStore<FileStorage> {
        CartStore::with_key(self.file_storage(), self.storage_key.clone())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_positive(key: &str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

fn parse_decimals(value: &str) -> Result<usize, ConfigError> {
    let decimals = value
        .trim()
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidEnvVar("CART_PRICE_DECIMALS".to_string(), e.to_string()))?;
    if decimals > MAX_PRICE_DECIMALS {
        return Err(ConfigError::InvalidEnvVar(
            "CART_PRICE_DECIMALS".to_string(),
            format!("must be at most {MAX_PRICE_DECIMALS} (got {decimals})"),
        ));
    }
    Ok(decimals)
}
