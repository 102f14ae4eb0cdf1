//! # Register Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`RANIL_*`)
//! 2. Defaults (this file)
//!
//! Read-only after startup.

use ranil_core::{Money, ReceiptConfig, DEFAULT_STORE_NAME};
use ranil_store::StoreConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Register configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterConfig {
    /// Store name (printed on receipts)
    pub store_name: String,

    /// Register number, part of every receipt number
    pub register_id: u8,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Receipt width in characters (typically 32, 42, or 48)
    pub paper_width: usize,

    /// Deduct sold quantities from stock after checkout.
    /// Default: off (checkout leaves stock alone)
    pub deduct_stock: bool,

    /// Load the demo catalog, accounts and sales at startup
    pub seed: bool,
}

impl Default for RegisterConfig {
    /// ## Default Values
    /// - Store: "Ranil's Poultry Supply"
    /// - Register: 1
    /// - Currency: ₱
    /// - Paper: 42 columns
    /// - Stock deduction: off
    /// - Demo data: on
    fn default() -> Self {
        RegisterConfig {
            store_name: DEFAULT_STORE_NAME.to_string(),
            register_id: 1,
            currency_symbol: "₱".to_string(),
            paper_width: 42,
            deduct_stock: false,
            seed: true,
        }
    }
}

impl RegisterConfig {
    /// Creates a RegisterConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `RANIL_STORE_NAME`: Override store name
    /// - `RANIL_REGISTER_ID`: Register number (0-99)
    /// - `RANIL_CURRENCY_SYMBOL`: e.g. "Rs."
    /// - `RANIL_PAPER_WIDTH`: Receipt columns (32-80)
    /// - `RANIL_DEDUCT_STOCK`: "1"/"true" to deduct stock at checkout
    /// - `RANIL_SEED`: "0"/"false" to start with an empty store
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RegisterConfig::from_env`] with a custom variable source.
    ///
    /// Malformed values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = RegisterConfig::default();

        if let Some(store_name) = lookup("RANIL_STORE_NAME") {
            if !store_name.trim().is_empty() {
                config.store_name = store_name.trim().to_string();
            }
        }

        if let Some(raw) = lookup("RANIL_REGISTER_ID") {
            match raw.trim().parse::<u8>() {
                Ok(id) if id < 100 => config.register_id = id,
                _ => warn!(value = %raw, "Ignoring RANIL_REGISTER_ID"),
            }
        }

        if let Some(symbol) = lookup("RANIL_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("RANIL_PAPER_WIDTH") {
            match raw.trim().parse::<usize>() {
                Ok(width) if (32..=80).contains(&width) => config.paper_width = width,
                _ => warn!(value = %raw, "Ignoring RANIL_PAPER_WIDTH"),
            }
        }

        if let Some(raw) = lookup("RANIL_DEDUCT_STOCK") {
            match parse_flag(&raw) {
                Some(flag) => config.deduct_stock = flag,
                None => warn!(value = %raw, "Ignoring RANIL_DEDUCT_STOCK"),
            }
        }

        if let Some(raw) = lookup("RANIL_SEED") {
            match parse_flag(&raw) {
                Some(flag) => config.seed = flag,
                None => warn!(value = %raw, "Ignoring RANIL_SEED"),
            }
        }

        config
    }

    /// Store settings derived from this configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new()
            .register_id(self.register_id)
            .seed(self.seed)
    }

    /// Receipt layout derived from this configuration.
    pub fn receipt_config(&self) -> ReceiptConfig {
        ReceiptConfig {
            store_name: self.store_name.clone(),
            currency_symbol: self.currency_symbol.clone(),
            paper_width: self.paper_width,
            ..ReceiptConfig::default()
        }
    }

    /// Formats an amount with the currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use ranil_core::Money;
    /// use ranil_register::state::RegisterConfig;
    ///
    /// let config = RegisterConfig::default();
    /// assert_eq!(config.format_currency(Money::parse("1234.5").unwrap()), "₱1,234.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let grouped = amount.format_grouped();
        match grouped.strip_prefix('-') {
            Some(digits) => format!("-{}{}", self.currency_symbol, digits),
            None => format!("{}{}", self.currency_symbol, grouped),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
