//! # Cart Commands
//!
//! Reserving stock for the sale in progress.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│  Sale    │                        │
//! │  │  Cart    │     │          │     │ recorded │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │       ▲                │             checkout                           │
//! │       │           add_to_cart        (sale.rs)                          │
//! │       │           set_quantity                                          │
//! │       │           remove_from_cart                                      │
//! │       │                │                                                │
//! │       │                ▼                                                │
//! │       └─────────── clear_cart                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation returns the whole cart so the caller can redraw it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ranil_core::{Cart, CartLine, CoreError, Money, Quantity};
use ranil_store::ProductRepository;

use crate::error::{ErrorCode, ShellError, ShellResult};
use crate::state::{RegisterConfig, SessionState};

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

/// Summary figures for the cart footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Number of distinct products.
    pub item_count: usize,
    /// Sum of line quantities, mixed units.
    pub total_quantity: Quantity,
    /// Exact total; rounded only when printed.
    pub total: Money,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.lines().to_vec(),
            totals: CartTotals {
                item_count: cart.item_count(),
                total_quantity: cart.total_quantity(),
                total: cart.total(),
            },
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(session: &SessionState) -> ShellResult<CartResponse> {
    debug!("get_cart command");
    session.require_user()?;
    session
        .cart()
        .map(CartResponse::from)
        .ok_or_else(ShellError::not_signed_in)
}

/// Adds a quantity of a product to the cart.
///
/// ## Behavior
/// - Product already in cart: its quantity grows
/// - Product not in cart: a new line with the current price and unit
/// - Total reservation may not exceed the product's stock
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  add 30 12                                                              │
/// │          │                                                              │
/// │          ▼                                                              │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. Look up product 30 (Round Up, 10 bottle in stock)         │    │
/// │  │  2. Cart holds 0, 0 + 12 > 10                                  │    │
/// │  │  3. Reject, cart unchanged                                     │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │          │                                                              │
/// │          ▼                                                              │
/// │  "Cannot add 12 bottle. Only 10 bottle available."                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn add_to_cart(
    products: &ProductRepository,
    session: &mut SessionState,
    product_id: &str,
    quantity: Quantity,
) -> ShellResult<CartResponse> {
    debug!(product_id, %quantity, "add_to_cart command");

    let cart = session.cart_mut()?;
    if let Err(err) = cart.add_quantity(products, product_id, quantity) {
        return Err(match err {
            CoreError::InsufficientStock {
                requested,
                available,
                ..
            } => {
                let unit = unit_of(products, product_id);
                ShellError::new(
                    ErrorCode::InsufficientStock,
                    format!(
                        "Cannot add {} {}. Only {} {} available.",
                        requested, unit, available, unit
                    ),
                )
            }
            err => err.into(),
        });
    }
    Ok(CartResponse::from(&*cart))
}

/// Replaces the reserved quantity of a product.
///
/// ## Behavior
/// - Quantity 0 or less: removes the line
/// - Quantity above stock: rejected, cart unchanged
pub fn set_quantity(
    products: &ProductRepository,
    session: &mut SessionState,
    product_id: &str,
    quantity: Quantity,
) -> ShellResult<CartResponse> {
    debug!(product_id, %quantity, "set_quantity command");

    let cart = session.cart_mut()?;
    if let Err(err) = cart.set_quantity(products, product_id, quantity) {
        return Err(match err {
            CoreError::InsufficientStock {
                requested,
                available,
                ..
            } => {
                let unit = unit_of(products, product_id);
                ShellError::new(
                    ErrorCode::InsufficientStock,
                    format!(
                        "Cannot set quantity to {}. Only {} {} available.",
                        requested, available, unit
                    ),
                )
            }
            err => err.into(),
        });
    }
    Ok(CartResponse::from(&*cart))
}

/// Removes a product from the cart. Removing an absent product is a no-op.
pub fn remove_from_cart(session: &mut SessionState, product_id: &str) -> ShellResult<CartResponse> {
    debug!(product_id, "remove_from_cart command");

    let cart = session.cart_mut()?;
    cart.remove_line(product_id);
    Ok(CartResponse::from(&*cart))
}

/// Abandons the sale in progress.
pub fn clear_cart(session: &mut SessionState) -> ShellResult<CartResponse> {
    debug!("clear_cart command");

    let cart = session.cart_mut()?;
    cart.clear();
    Ok(CartResponse::from(&*cart))
}

/// Renders the cart as a text table.
pub fn render_cart(cart: &CartResponse, config: &RegisterConfig) -> String {
    if cart.items.is_empty() {
        return "Cart is empty.\n".to_string();
    }

    let mut out = String::new();
    for line in &cart.items {
        let qty = format!("{} {}", line.quantity, line.unit);
        out.push_str(&format!(
            "{:<5} {:<28} {:>12} x {:>12} = {:>14}\n",
            line.product_id,
            line.name,
            qty,
            config.format_currency(line.unit_price),
            config.format_currency(line.line_total()),
        ));
    }
    out.push_str(&format!(
        "{} item(s), total {}\n",
        cart.totals.item_count,
        config.format_currency(cart.totals.total)
    ));
    out
}

fn unit_of(products: &ProductRepository, product_id: &str) -> String {
    products
        .get_by_id(product_id)
        .map(|p| p.unit)
        .unwrap_or_default()
}
