//! # ranil-store: In-Memory Store for Ranil POS
//!
//! Holds the catalog, sales history, suppliers and accounts for one
//! register process and exposes them through repositories.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ranil POS Data Flow                              │
//! │                                                                         │
//! │  Register command (add 1 0.25)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   ranil-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repositories │    │    Seed      │  │   │
//! │  │   │  (store.rs)   │    │               │    │  (seed.rs)   │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │ Arc<Tables>   │◄───│ SaleRepo      │    │ demo catalog │  │   │
//! │  │   │ StoreConfig   │    │ SupplierRepo  │    │ demo sales   │  │   │
//! │  │   │               │    │ UserRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ranil-core sees `impl Catalog` and `impl SaleSink` only               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store handle and configuration
//! - [`repository`] - Repository implementations (product, sale, ...)
//! - [`seed`] - Demo data
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use ranil_core::{Cart, Quantity, SaleSink};
//! use ranil_store::{Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::new()).unwrap();
//! let catalog = store.products();
//!
//! let mut cart = Cart::new("2");
//! cart.add_quantity(&catalog, "1", Quantity::from_units(2)).unwrap();
//!
//! let mut sales = store.sales();
//! let sale = sales.record(cart.checkout().unwrap());
//! assert!(sale.receipt_number().is_some());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::supplier::SupplierRepository;
pub use repository::user::UserRepository;
