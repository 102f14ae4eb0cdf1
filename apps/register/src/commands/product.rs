//! # Product Commands
//!
//! Product grid listing and search.
//!
//! ## Grid Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Grid Flow                                    │
//! │                                                                         │
//! │  Operator types "products Dog Food" or "search puppy"                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRepository::by_category / search                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  For each product: available = stock - reserved in this cart           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │ ID   Name                        Price       Stock             │     │
//! │  │ 1    Aozi Dog Adult              ₱165.00/kg  Stock: 97 kg      │     │
//! │  │ 30   Round Up                    ₱485.00/bottle  Low: 2 bottle │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reservations show up in the grid straight away; catalog stock itself is
//! untouched until (and unless) the sale deducts it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ranil_core::{Cart, Money, Product, Quantity, StockStatus};
use ranil_store::ProductRepository;

use crate::error::ShellResult;
use crate::state::RegisterConfig;

/// Default number of search results.
pub const SEARCH_LIMIT: usize = 20;

/// Product as shown in the register grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Money,
    pub unit: String,
    /// Catalog stock minus what this cart already holds.
    pub available: Quantity,
    pub status: StockStatus,
}

impl ProductView {
    /// Builds the grid entry, netting out the cart's reservation.
    pub fn new(product: &Product, cart: Option<&Cart>) -> Self {
        let available = match cart {
            Some(cart) => cart.available(product),
            None => product.stock,
        };
        ProductView {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            unit: product.unit.clone(),
            available,
            status: product.stock_status_for(available),
        }
    }

    /// "Low: 2 bottle", "Stock: 97 kg", "Out of stock".
    pub fn stock_label(&self) -> String {
        match self.status {
            StockStatus::InStock => format!("Stock: {} {}", self.available, self.unit),
            StockStatus::LowStock => format!("Low: {} {}", self.available, self.unit),
            StockStatus::OutOfStock => "Out of stock".to_string(),
        }
    }
}

/// Lists products, optionally filtered to one category.
///
/// "All" (or no category) lists the whole catalog.
pub fn list_products(
    products: &ProductRepository,
    cart: Option<&Cart>,
    category: Option<&str>,
) -> Vec<ProductView> {
    debug!(?category, "list_products command");
    let rows = match category {
        Some(category) => products.by_category(category),
        None => products.list(),
    };
    rows.iter().map(|p| ProductView::new(p, cart)).collect()
}

/// Case-insensitive search on name and category.
///
/// An empty query returns the first [`SEARCH_LIMIT`] products.
pub fn search_products(
    products: &ProductRepository,
    cart: Option<&Cart>,
    query: &str,
) -> ShellResult<Vec<ProductView>> {
    debug!(query = %query, "search_products command");

    let rows = products.search(query, SEARCH_LIMIT)?;
    Ok(rows.iter().map(|p| ProductView::new(p, cart)).collect())
}

/// Category names for the grid filter, "All" first.
pub fn list_categories(products: &ProductRepository) -> Vec<String> {
    let mut categories = vec!["All".to_string()];
    categories.extend(products.categories());
    categories
}

/// Renders grid rows as a text table.
pub fn render_products(rows: &[ProductView], config: &RegisterConfig) -> String {
    if rows.is_empty() {
        return "No products found.\n".to_string();
    }

    let mut out = format!("{:<5} {:<28} {:>16}  {}\n", "ID", "Name", "Price", "Stock");
    for row in rows {
        let price = format!("{}/{}", config.format_currency(row.price), row.unit);
        out.push_str(&format!(
            "{:<5} {:<28} {:>16}  {}\n",
            row.id,
            row.name,
            price,
            row.stock_label()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use ranil_store::{Store, StoreConfig};

    use super::*;

    fn store() -> Store {
        Store::new(StoreConfig::default()).unwrap()
    }

    #[test]
    fn test_grid_nets_out_reservation() {
        let store = store();
        let products = store.products();
        let mut cart = Cart::new("2");
        cart.add_quantity(&products, "30", Quantity::from_units(8))
            .unwrap();

        let rows = list_products(&products, Some(&cart), Some("Chemical"));
        let round_up = rows.iter().find(|r| r.id == "30").unwrap();

        assert_eq!(round_up.available, Quantity::from_units(2));
        assert_eq!(round_up.status, StockStatus::LowStock);
        assert_eq!(round_up.stock_label(), "Low: 2 bottle");
        // Catalog stock is untouched.
        assert_eq!(products.get_by_id("30").unwrap().stock, Quantity::from_units(10));
    }

    #[test]
    fn test_fully_reserved_is_out_of_stock() {
        let store = store();
        let products = store.products();
        let mut cart = Cart::new("2");
        cart.add_quantity(&products, "30", Quantity::from_units(10))
            .unwrap();

        let row = ProductView::new(&products.get_by_id("30").unwrap(), Some(&cart));
        assert_eq!(row.status, StockStatus::OutOfStock);
        assert_eq!(row.stock_label(), "Out of stock");
    }

    #[test]
    fn test_search_and_categories() {
        let store = store();
        let products = store.products();

        let rows = search_products(&products, None, "  PUPPY ").unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(search_products(&products, None, "").unwrap().len(), SEARCH_LIMIT);
        assert!(search_products(&products, None, &"x".repeat(101)).is_err());

        let categories = list_categories(&products);
        assert_eq!(categories[0], "All");
        assert_eq!(categories.len(), 9);
    }

    #[test]
    fn test_render_products() {
        let store = store();
        let rows = list_products(&store.products(), None, Some("Cat Litter"));
        let text = render_products(&rows, &RegisterConfig::default());

        assert!(text.contains("Cat Litter (Feline)"));
        assert!(text.contains("₱220.00/bag"));
        assert!(text.contains("Stock: 20 bag"));
        assert_eq!(render_products(&[], &RegisterConfig::default()), "No products found.\n");
    }
}
