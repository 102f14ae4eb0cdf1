//! # Store Lifecycle
//!
//! Creation and configuration of the in-memory store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store and Repositories                             │
//! │                                                                         │
//! │  Register startup                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new() ← register id, demo data on/off                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::new(config) ← allocate tables, load demo data                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │          Arc<Tables>                     │                           │
//! │  │  products │ sales │ suppliers │ users    │  (one RwLock each)        │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ store.products(), store.sales(), ...                           │
//! │       ▼                                                                 │
//! │  Repository handles share the same tables; cloning one is cheap.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is written to disk. Dropping the last handle drops the data.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use ranil_core::{Product, SaleRecord, Supplier, User};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreResult;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::supplier::SupplierRepository;
use crate::repository::user::UserRepository;
use crate::seed;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use ranil_store::StoreConfig;
///
/// let config = StoreConfig::new()
///     .register_id(2)
///     .seed(false);
/// assert_eq!(config.register_id, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Register number printed in receipt numbers (`YYYYMMDD-RR-NNNN`).
    /// Default: 1
    pub register_id: u8,

    /// Whether to load the demo catalog, users and sales history.
    /// Default: true
    pub seed: bool,
}

impl StoreConfig {
    /// Default configuration: register 1, demo data loaded.
    pub fn new() -> Self {
        StoreConfig {
            register_id: 1,
            seed: true,
        }
    }

    /// Empty store for tests.
    pub fn empty() -> Self {
        StoreConfig::new().seed(false)
    }

    /// Sets the register number.
    pub fn register_id(mut self, id: u8) -> Self {
        self.register_id = id;
        self
    }

    /// Sets whether demo data is loaded.
    pub fn seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new()
    }
}

// =============================================================================
// Tables
// =============================================================================

/// Sales history plus the per-day receipt counters.
#[derive(Debug, Default)]
pub(crate) struct SalesTable {
    pub(crate) records: Vec<SaleRecord>,
    pub(crate) counters: HashMap<NaiveDate, u32>,
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) products: RwLock<Vec<Product>>,
    pub(crate) sales: RwLock<SalesTable>,
    pub(crate) suppliers: RwLock<Vec<Supplier>>,
    pub(crate) users: RwLock<Vec<User>>,
}

// =============================================================================
// Store
// =============================================================================

/// Handle to the register's data.
///
/// Constructed once at startup and handed to whoever needs it. Repository
/// accessors return cheap handles onto the same tables.
#[derive(Debug, Clone)]
pub struct Store {
    tables: Arc<Tables>,
    register_id: u8,
}

impl Store {
    /// Creates the store and loads demo data if configured.
    ///
    /// Demo sales are dated relative to the current time.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        info!(
            register_id = config.register_id,
            seed = config.seed,
            "Initializing store"
        );

        let store = Store {
            tables: Arc::new(Tables::default()),
            register_id: config.register_id,
        };

        if config.seed {
            seed::load(&store, Utc::now())?;
        }

        info!(
            products = store.products().count(),
            users = store.users().list().len(),
            sales = store.sales().count(),
            "Store ready"
        );
        Ok(store)
    }

    pub fn register_id(&self) -> u8 {
        self.register_id
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(Arc::clone(&self.tables))
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(Arc::clone(&self.tables), self.register_id)
    }

    /// Returns the supplier repository.
    pub fn suppliers(&self) -> SupplierRepository {
        SupplierRepository::new(Arc::clone(&self.tables))
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(Arc::clone(&self.tables))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
