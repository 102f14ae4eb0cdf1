//! # Cart Engine
//!
//! Owns the sale in progress and keeps every reservation within stock.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action          Cart Method             Stock Check           │
//! │  ───────────────          ───────────             ───────────           │
//! │                                                                         │
//! │  Pick quantity ──────────► add_quantity() ──────► reserved + qty        │
//! │                                                    <= stock             │
//! │                                                                         │
//! │  Edit quantity ──────────► set_quantity() ──────► qty <= stock          │
//! │                            (qty <= 0 removes)                           │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_line() ───────► (none, idempotent)    │
//! │                                                                         │
//! │  Complete Sale ──────────► checkout() ──────────► cart not empty        │
//! │                            → SaleRecord, cart cleared                   │
//! │                                                                         │
//! │  NOTE: A rejected operation leaves the cart exactly as it was.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is passed in per call and only read. Checkout does not touch
//! catalog stock; deducting it is up to whoever owns the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::quantity::Quantity;
use crate::sale::SaleRecord;
use crate::types::Product;

// =============================================================================
// Cart Line
// =============================================================================

/// One product reserved in the cart.
///
/// ## Snapshot Pattern
/// Name, price and unit are copied from the catalog when the line is first
/// created. Later catalog edits don't change what this sale charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Reserved quantity, always > 0.
    pub quantity: Quantity,

    /// Price per unit at time of adding (frozen).
    pub unit_price: Money,

    /// Unit label at time of adding (frozen).
    pub unit: String,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a line from a catalog product.
    pub fn from_product(product: &Product, quantity: Quantity) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
            unit_price: product.price,
            unit: product.unit.clone(),
            added_at: Utc::now(),
        }
    }

    /// Exact line total (unit price × quantity), unrounded.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart for one sale session.
///
/// ## Invariants
/// - At most one line per product (repeated adds accumulate)
/// - Every line quantity is > 0
/// - Every line quantity is <= the product's catalog stock at the time it
///   was last changed
/// - Lines keep the order in which products were first added
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,

    /// Seller running this session; copied into the sale record.
    seller_id: String,

    /// When the cart was created/last cleared
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty cart for a seller.
    pub fn new(seller_id: impl Into<String>) -> Self {
        Cart {
            lines: Vec::new(),
            seller_id: seller_id.into(),
            created_at: Utc::now(),
        }
    }

    /// Adds `quantity` to the product's reservation.
    ///
    /// ## Behavior
    /// - `quantity` must be > 0
    /// - `reserved + quantity` must not exceed the product's stock; the error
    ///   carries the remaining headroom (`stock - reserved`)
    /// - First add creates the line with a price/unit snapshot; later adds
    ///   only grow the quantity
    ///
    /// ## Example
    /// ```rust
    /// use ranil_core::cart::Cart;
    /// use ranil_core::quantity::Quantity;
    /// # use ranil_core::{Money, Product};
    /// # let catalog = vec![Product {
    /// #     id: "P1".into(), name: "Crack Corn".into(), category: "Poultry Feed".into(),
    /// #     price: Money::from_major(35), stock: Quantity::from_units(10), unit: "kg".into(),
    /// #     low_stock_threshold: Quantity::from_units(3), supplier_id: "3".into(),
    /// # }];
    ///
    /// let mut cart = Cart::new("seller-1");
    /// cart.add_quantity(&catalog, "P1", Quantity::from_units(4)).unwrap();
    /// assert!(cart.add_quantity(&catalog, "P1", Quantity::from_units(7)).is_err());
    /// ```
    pub fn add_quantity<C>(
        &mut self,
        catalog: &C,
        product_id: &str,
        quantity: Quantity,
    ) -> CoreResult<&CartLine>
    where
        C: Catalog + ?Sized,
    {
        debug!(product_id, %quantity, "add_quantity");

        if !quantity.is_positive() {
            return Err(CoreError::InvalidQuantity {
                value: quantity.to_string(),
            });
        }

        let product = lookup(catalog, product_id)?;
        let current = self.reserved(product_id);
        let available = product.stock.saturating_sub(current);

        let fits = current
            .checked_add(quantity)
            .is_some_and(|new_reserved| new_reserved <= product.stock);
        if !fits {
            warn!(product_id, %quantity, %available, "Insufficient stock");
            return Err(CoreError::InsufficientStock {
                product_id: product_id.to_string(),
                requested: quantity,
                available,
            });
        }

        let index = match self.position(product_id) {
            Some(index) => {
                self.lines[index].quantity = current + quantity;
                index
            }
            None => {
                self.lines.push(CartLine::from_product(&product, quantity));
                self.lines.len() - 1
            }
        };

        Ok(&self.lines[index])
    }

    /// Replaces the product's reserved quantity.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove_line`]
    /// - `quantity > stock`: `InsufficientStock` with the full stock as
    ///   `available` (this replaces, it doesn't add)
    /// - Product not yet in the cart: a new line is created
    pub fn set_quantity<C>(
        &mut self,
        catalog: &C,
        product_id: &str,
        quantity: Quantity,
    ) -> CoreResult<()>
    where
        C: Catalog + ?Sized,
    {
        debug!(product_id, %quantity, "set_quantity");

        if !quantity.is_positive() {
            self.remove_line(product_id);
            return Ok(());
        }

        let product = lookup(catalog, product_id)?;
        if quantity > product.stock {
            warn!(product_id, %quantity, stock = %product.stock, "Insufficient stock");
            return Err(CoreError::InsufficientStock {
                product_id: product_id.to_string(),
                requested: quantity,
                available: product.stock,
            });
        }

        match self.position(product_id) {
            Some(index) => self.lines[index].quantity = quantity,
            None => self.lines.push(CartLine::from_product(&product, quantity)),
        }

        Ok(())
    }

    /// Removes the product's line. No-op if it isn't in the cart.
    pub fn remove_line(&mut self, product_id: &str) {
        debug!(product_id, "remove_line");
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Exact cart total: sum of `quantity × unit_price`, unrounded.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Commits the cart into a sale record and empties the cart.
    ///
    /// ## Returns
    /// - `Ok(SaleRecord)` holding a copy of the lines and `total()`
    /// - `Err(EmptyCart)` if there is nothing to sell (cart unchanged)
    ///
    /// Catalog stock is NOT decremented here.
    pub fn checkout(&mut self) -> CoreResult<SaleRecord> {
        if self.lines.is_empty() {
            warn!("Checkout attempted on empty cart");
            return Err(CoreError::EmptyCart);
        }

        let lines = std::mem::take(&mut self.lines);
        let record = SaleRecord::new(self.seller_id.clone(), lines, Utc::now());
        self.created_at = Utc::now();

        info!(
            sale_id = %record.id(),
            seller_id = %record.seller_id(),
            items = record.lines().len(),
            total = %record.total(),
            "Sale committed"
        );

        Ok(record)
    }

    /// Abandons the sale in progress.
    pub fn clear(&mut self) {
        debug!("clear cart");
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Quantity of the product currently reserved (zero if absent).
    pub fn reserved(&self, product_id: &str) -> Quantity {
        self.line(product_id)
            .map(|l| l.quantity)
            .unwrap_or_default()
    }

    /// Stock still free for this product: catalog stock minus reservation.
    ///
    /// This is the figure the product grid shows.
    pub fn available(&self, product: &Product) -> Quantity {
        product.stock.saturating_sub(self.reserved(&product.id))
    }

    /// The line for a product, if present.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn seller_id(&self) -> &str {
        &self.seller_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all reserved quantities (mixed units, for the badge only).
    pub fn total_quantity(&self) -> Quantity {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }
}

fn lookup<C: Catalog + ?Sized>(catalog: &C, product_id: &str) -> CoreResult<Product> {
    catalog
        .get_product(product_id)
        .ok_or_else(|| CoreError::ProductNotFound {
            product_id: product_id.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
