//! Storefront settings
use super::storage::DEFAULT_CART_KEY;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    db_path: PathBuf,
    storage_key: String,
    currency_symbol: String,
    deal_hours_step: i64, // hours between consecutive deal expiries
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("storefront.db"),
            storage_key: DEFAULT_CART_KEY.to_string(),
            currency_symbol: "₹".to_string(),
            deal_hours_step: 2,
        }
    }
}

impl StorefrontConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set_db_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.db_path = path.as_ref().to_path_buf();
        self
    }
    pub fn set_storage_key(mut self, key: &str) -> Self {
        self.storage_key = key.to_string();
        self
    }
    pub fn set_currency_symbol(mut self, symbol: &str) -> Self {
        self.currency_symbol = symbol.to_string();
        self
    }
    pub fn set_deal_hours_step(mut self, hours: i64) -> Self {
        self.deal_hours_step = hours;
        self
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }
    pub fn deal_hours_step(&self) -> i64 {
        self.deal_hours_step
    }
}
