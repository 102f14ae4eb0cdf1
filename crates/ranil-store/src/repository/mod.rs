//! # Repository Module
//!
//! Repository implementations over the store's tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories                                         │
//! │                                                                         │
//! │  Register command                                                      │
//! │       │                                                                 │
//! │       │  store.products().search("dog", 20)                            │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_by_id / search / by_category                                  │
//! │  ├── insert / update / delete                                          │
//! │  └── adjust_stock / apply_sale                                         │
//! │       │                                                                 │
//! │       │  read() / write() on the products table                        │
//! │       ▼                                                                 │
//! │  Arc<Tables>                                                           │
//! │                                                                         │
//! │  The cart sees only `impl Catalog`; the checkout path sees only        │
//! │  `impl SaleSink`. Neither knows the store exists.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD, search, stock
//! - [`SaleRepository`](sale::SaleRepository) - Sales history, receipt numbers
//! - [`SupplierRepository`](supplier::SupplierRepository) - Supplier CRUD
//! - [`UserRepository`](user::UserRepository) - Accounts and activation

pub mod product;
pub mod sale;
pub mod supplier;
pub mod user;
