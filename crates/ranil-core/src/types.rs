//! # Domain Types
//!
//! Core domain types used throughout Ranil POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Supplier     │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  price (Money)  │◄──│  name           │   │  username       │       │
//! │  │  stock (Qty)    │   │  contact        │   │  role           │       │
//! │  │  unit           │   │  email          │   │  active         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  StockStatus    │   │      Role       │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  InStock        │   │  Admin          │                             │
//! │  │  LowStock       │   │  Seller         │                             │
//! │  │  OutOfStock     │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart and sale types live in [`crate::cart`] and [`crate::sale`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::quantity::Quantity;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// ## Invariant
/// `stock >= 0`. Repositories validate this on insert and never let a stock
/// adjustment take it below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: String,

    /// Display name shown to the seller and on the receipt.
    pub name: String,

    /// Category used by the product grid filter ("Dog Food", "Medicine", ...).
    pub category: String,

    /// Price per unit.
    pub price: Money,

    /// Current stock level, in `unit`.
    pub stock: Quantity,

    /// Unit label: "kg", "bag", "tablet", ...
    pub unit: String,

    /// Stock at or below this level is reported as low.
    pub low_stock_threshold: Quantity,

    /// Supplier this product is ordered from.
    pub supplier_id: String,
}

impl Product {
    /// Stock status against the catalog stock level.
    pub fn stock_status(&self) -> StockStatus {
        self.stock_status_for(self.stock)
    }

    /// Stock status for a given available amount.
    ///
    /// The register grid passes `stock - reserved` so a product turns
    /// "low" or "out of stock" as soon as the cart holds enough of it.
    pub fn stock_status_for(&self, available: Quantity) -> StockStatus {
        if !available.is_positive() {
            StockStatus::OutOfStock
        } else if available <= self.low_stock_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Low-stock check used by the admin dashboard (includes out of stock).
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }
}

// =============================================================================
// Stock Status
// =============================================================================

/// How the stock of a product is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// More than the low-stock threshold available.
    InStock,
    /// Some left, at or below the threshold.
    LowStock,
    /// Nothing left to sell.
    OutOfStock,
}

// =============================================================================
// Supplier
// =============================================================================

/// A supplier products are ordered from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    /// Contact phone number.
    pub contact: String,
    pub email: String,
}

// =============================================================================
// Users
// =============================================================================

/// What a signed-in user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages catalog, suppliers and users; sees reports.
    Admin,
    /// Runs the register.
    Seller,
}

impl Role {
    /// Reports, the dashboard and store management are admin-only.
    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Seller => "seller",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "seller" => Ok(Role::Seller),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// A register user. Sellers are referenced from sale records by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: Role,
    /// Inactive users cannot sign in.
    pub active: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
