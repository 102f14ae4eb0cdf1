//! # ranil-core: Cart and Stock Reservation Engine
//!
//! The business logic of the Ranil register: the catalog types, the cart
//! that reserves stock while a sale is being built, the immutable sale
//! record produced at checkout, receipt layout and report aggregation.
//! Nothing in this crate touches storage or the terminal.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ranil POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Register shell (apps/register)                 │   │
//! │  │    login ──► products ──► add/set/remove ──► checkout ──► print │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ranil-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │   sale    │  │  receipt  │  │  report   │  │   │
//! │  │   │ Cart      │  │ SaleRecord│  │ Renderer  │  │ buckets   │  │   │
//! │  │   │ CartLine  │  │ SaleSink  │  │ Receipt   │  │ dashboard │  │   │
//! │  │   └─────┬─────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │         │ reads                                                 │   │
//! │  │   ┌─────▼─────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   money   │  │ quantity  │  │ validation│  │   │
//! │  │   │  Catalog  │  │  Money    │  │ Quantity  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 ranil-store (in-memory repositories)            │   │
//! │  │        impl Catalog for ProductRepository, impl SaleSink        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Supplier, User, stock status
//! - [`money`] / [`quantity`] - exact decimal amounts
//! - [`catalog`] - the read-only product lookup the cart depends on
//! - [`cart`] - reservations and checkout
//! - [`sale`] - the committed sale record and its sink
//! - [`receipt`] - receipt view model and text layout
//! - [`report`] - revenue buckets, top products, dashboard tiles
//! - [`validation`] - field rules for catalog and user data
//! - [`error`] - domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use ranil_core::{Cart, Money, Product, Quantity};
//!
//! let catalog = vec![Product {
//!     id: "1".into(),
//!     name: "Aozi Dog Adult".into(),
//!     category: "Dog Food".into(),
//!     price: Money::from_major(165),
//!     stock: Quantity::from_units(100),
//!     unit: "kg".into(),
//!     low_stock_threshold: Quantity::from_units(30),
//!     supplier_id: "1".into(),
//! }];
//!
//! let mut cart = Cart::new("2");
//! cart.add_quantity(&catalog, "1", Quantity::parse("0.25").unwrap()).unwrap();
//!
//! // 0.25 kg × 165.00, kept exact
//! assert_eq!(cart.total(), Money::parse("41.25").unwrap());
//!
//! let sale = cart.checkout().unwrap();
//! assert!(cart.is_empty());
//! assert_eq!(sale.total(), Money::parse("41.25").unwrap());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod quantity;
pub mod receipt;
pub mod report;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quantity::Quantity;
pub use receipt::{Receipt, ReceiptConfig, ReceiptRenderer};
pub use report::{DashboardSummary, ReportPeriod, SalesBucket, StockOverview};
pub use sale::{SaleRecord, SaleSink};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Store name printed on receipts unless configured otherwise.
pub const DEFAULT_STORE_NAME: &str = "Ranil's Poultry Supply";

/// Highest unit price the catalog accepts, in whole currency units.
pub const MAX_PRICE: i64 = 1_000_000;

/// Highest stock level (and threshold) the catalog accepts.
pub const MAX_STOCK: i64 = 1_000_000;

pub use report::DEFAULT_TOP_PRODUCTS;
