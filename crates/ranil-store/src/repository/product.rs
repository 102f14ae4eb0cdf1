//! # Product Repository
//!
//! Catalog operations.
//!
//! ## Key Operations
//! - Lookup and search for the product grid
//! - CRUD for the admin inventory screen
//! - Stock adjustments (restock, correction, sale deduction)
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Search Works                                     │
//! │                                                                         │
//! │  Operator types: "puppy"                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Case-insensitive substring match on name and category                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ 4  | Beef Pro Puppy    | Dog Food       │ ← MATCH                   │
//! │  │ 5  | Bow Wow Adult     | Dog Food       │                           │
//! │  │ 6  | Bow Wow Puppy     | Dog Food       │ ← MATCH                   │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results in catalog order, capped at `limit`                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Deduction
//! Checkout never touches stock. [`ProductRepository::apply_sale`] is the
//! explicit step for callers that want sold quantities taken off the shelf.

use std::sync::Arc;

use ranil_core::validation::{validate_product, validate_search_query, validate_stock};
use ranil_core::{Catalog, CoreError, Product, Quantity, SaleRecord};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::Tables;

/// Repository for catalog operations.
///
/// ## Usage
/// ```rust
/// use ranil_store::{Store, StoreConfig};
///
/// let store = Store::new(StoreConfig::new()).unwrap();
/// let repo = store.products();
///
/// let results = repo.search("puppy", 20).unwrap();
/// assert!(results.iter().all(|p| p.name.contains("Puppy")));
///
/// let product = repo.get_by_id("1").unwrap();
/// assert_eq!(product.name, "Aozi Dog Adult");
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    tables: Arc<Tables>,
}

impl ProductRepository {
    pub(crate) fn new(tables: Arc<Tables>) -> Self {
        ProductRepository { tables }
    }

    /// Gets a product by ID.
    pub fn get_by_id(&self, id: &str) -> Option<Product> {
        self.tables
            .products
            .read()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Every product, in catalog order.
    pub fn list(&self) -> Vec<Product> {
        self.tables.products.read().clone()
    }

    /// Searches products by name or category.
    ///
    /// ## Arguments
    /// * `query` - Search term; empty returns the first `limit` products
    /// * `limit` - Maximum results to return
    pub fn search(&self, query: &str, limit: usize) -> StoreResult<Vec<Product>> {
        let query = validate_search_query(query)?.to_lowercase();

        debug!(query = %query, limit, "Searching products");

        let products: Vec<Product> = self
            .tables
            .products
            .read()
            .iter()
            .filter(|p| {
                query.is_empty()
                    || p.name.to_lowercase().contains(&query)
                    || p.category.to_lowercase().contains(&query)
            })
            .take(limit)
            .cloned()
            .collect();

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Products in one category (case-insensitive). `"All"` returns
    /// everything.
    pub fn by_category(&self, category: &str) -> Vec<Product> {
        let category = category.trim();
        if category.eq_ignore_ascii_case("all") {
            return self.list();
        }

        self.tables
            .products
            .read()
            .iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for product in self.tables.products.read().iter() {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Inserts a new product.
    ///
    /// ## Errors
    /// - `Validation` if any field rule fails
    /// - `Duplicate` if the id is taken
    pub fn insert(&self, product: Product) -> StoreResult<Product> {
        validate_product(&product)?;

        let mut products = self.tables.products.write();
        if products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::duplicate("product id", &product.id));
        }

        debug!(id = %product.id, name = %product.name, "Inserting product");
        products.push(product.clone());
        Ok(product)
    }

    /// Replaces an existing product, keeping its catalog position.
    ///
    /// Carts already holding this product keep their price snapshot.
    pub fn update(&self, product: Product) -> StoreResult<()> {
        validate_product(&product)?;

        let mut products = self.tables.products.write();
        let slot = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| StoreError::not_found("Product", &product.id))?;

        debug!(id = %product.id, "Updating product");
        *slot = product;
        Ok(())
    }

    /// Removes a product and returns it.
    ///
    /// Past sales keep their own copy of name and price.
    pub fn delete(&self, id: &str) -> StoreResult<Product> {
        let mut products = self.tables.products.write();
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        debug!(id = %id, "Deleting product");
        Ok(products.remove(index))
    }

    /// Changes a product's stock by `delta` and returns the new level.
    ///
    /// ## Arguments
    /// * `id` - Product ID
    /// * `delta` - Positive for restocking, negative for corrections
    ///
    /// Stock never goes below zero; a larger negative delta empties it.
    /// A delta that would take stock past [`ranil_core::MAX_STOCK`] is
    /// rejected and the level is left unchanged.
    pub fn adjust_stock(&self, id: &str, delta: Quantity) -> StoreResult<Quantity> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let mut products = self.tables.products.write();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        let next = product
            .stock
            .checked_add(delta)
            .ok_or_else(|| CoreError::InvalidQuantity {
                value: delta.to_string(),
            })?;
        let next = if next < Quantity::zero() {
            Quantity::zero()
        } else {
            next
        };
        validate_stock(next)?;
        product.stock = next;

        Ok(product.stock)
    }

    /// Deducts every line of a sale from stock.
    ///
    /// All lines are applied under one lock. Lines whose product has since
    /// been deleted are skipped.
    pub fn apply_sale(&self, sale: &SaleRecord) -> StoreResult<()> {
        let mut products = self.tables.products.write();

        for line in sale.lines() {
            match products.iter_mut().find(|p| p.id == line.product_id) {
                Some(product) => {
                    product.stock = product.stock.saturating_sub(line.quantity);
                }
                None => {
                    warn!(
                        sale_id = %sale.id(),
                        product_id = %line.product_id,
                        "Sold product no longer in catalog"
                    );
                }
            }
        }

        info!(sale_id = %sale.id(), lines = sale.lines().len(), "Stock deducted for sale");
        Ok(())
    }

    /// Products at or below their low-stock threshold.
    pub fn low_stock(&self) -> Vec<Product> {
        self.tables
            .products
            .read()
            .iter()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect()
    }

    /// Number of products in the catalog.
    pub fn count(&self) -> usize {
        self.tables.products.read().len()
    }
}

impl Catalog for ProductRepository {
    fn get_product(&self, id: &str) -> Option<Product> {
        self.get_by_id(id)
    }

    fn products(&self) -> Vec<Product> {
        self.list()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use ranil_core::{Cart, Money, ValidationError};

    use crate::{Store, StoreConfig};

    use super::*;

    fn seeded() -> ProductRepository {
        Store::new(StoreConfig::new()).unwrap().products()
    }

    fn round_up() -> Product {
        Product {
            id: "99".to_string(),
            name: "Round Up 1L".to_string(),
            category: "Chemical".to_string(),
            price: Money::from_major(485),
            stock: Quantity::from_units(10),
            unit: "bottle".to_string(),
            low_stock_threshold: Quantity::from_units(5),
            supplier_id: "6".to_string(),
        }
    }

    #[test]
    fn test_search() {
        let repo = seeded();

        let puppy = repo.search("PUPPY", 20).unwrap();
        let names: Vec<&str> = puppy.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Beef Pro Puppy", "Bow Wow Puppy", "Nutrichunks Puppy", "Pedigree Puppy"]
        );

        // category match
        assert_eq!(repo.search("hog feed", 20).unwrap().len(), 2);
        // limit
        assert_eq!(repo.search("", 5).unwrap().len(), 5);
        assert!(repo.search(&"x".repeat(200), 5).is_err());
    }

    #[test]
    fn test_categories_and_filter() {
        let repo = seeded();

        let categories = repo.categories();
        assert_eq!(categories.first().map(String::as_str), Some("Dog Food"));
        assert_eq!(categories.last().map(String::as_str), Some("Chemical"));
        assert_eq!(categories.len(), 8);

        assert_eq!(repo.by_category("cat litter").len(), 2);
        assert_eq!(repo.by_category("All").len(), 31);
        assert!(repo.by_category("Fish").is_empty());
    }

    #[test]
    fn test_insert_update_delete() {
        let repo = Store::new(StoreConfig::empty()).unwrap().products();

        repo.insert(round_up()).unwrap();
        assert_eq!(
            repo.insert(round_up()),
            Err(StoreError::duplicate("product id", "99"))
        );

        let mut edited = round_up();
        edited.price = Money::from_major(500);
        repo.update(edited).unwrap();
        assert_eq!(repo.get_by_id("99").unwrap().price, Money::from_major(500));

        let removed = repo.delete("99").unwrap();
        assert_eq!(removed.id, "99");
        assert!(repo.get_by_id("99").is_none());
        assert!(matches!(repo.delete("99"), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_insert_rejects_invalid() {
        let repo = Store::new(StoreConfig::empty()).unwrap().products();

        let mut bad = round_up();
        bad.unit = "  ".to_string();
        assert_eq!(
            repo.insert(bad),
            Err(StoreError::Validation(ValidationError::Required {
                field: "unit".to_string()
            }))
        );
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_adjust_stock_floors_at_zero() {
        let repo = seeded();

        // Round Up: stock 10
        assert_eq!(
            repo.adjust_stock("30", Quantity::from_units(5)).unwrap(),
            Quantity::from_units(15)
        );
        assert_eq!(
            repo.adjust_stock("30", Quantity::from_units(-40)).unwrap(),
            Quantity::zero()
        );
        assert!(repo.adjust_stock("nope", Quantity::from_units(1)).is_err());
    }

    #[test]
    fn test_adjust_stock_rejects_past_max() {
        let repo = seeded();
        let huge = Quantity::parse("10000000000000000000000000").unwrap();

        assert_eq!(
            repo.adjust_stock("30", huge),
            Err(StoreError::Validation(ValidationError::OutOfRange {
                field: "stock".to_string(),
                min: 0,
                max: ranil_core::MAX_STOCK,
            }))
        );
        assert_eq!(repo.get_by_id("30").unwrap().stock, Quantity::from_units(10));

        // exactly the maximum is still allowed, and the product stays editable
        let to_max = Quantity::from_units(ranil_core::MAX_STOCK - 10);
        assert_eq!(
            repo.adjust_stock("30", to_max).unwrap(),
            Quantity::from_units(ranil_core::MAX_STOCK)
        );
        let product = repo.get_by_id("30").unwrap();
        repo.update(product).unwrap();
    }

    #[test]
    fn test_apply_sale_deducts_stock() {
        let repo = seeded();
        let mut cart = Cart::new("2");
        cart.add_quantity(&repo, "29", Quantity::parse("2.5").unwrap())
            .unwrap();
        cart.add_quantity(&repo, "30", Quantity::from_units(10)).unwrap();
        let sale = cart.checkout().unwrap();

        // checkout alone leaves stock untouched
        assert_eq!(repo.get_by_id("30").unwrap().stock, Quantity::from_units(10));

        repo.apply_sale(&sale).unwrap();
        assert_eq!(
            repo.get_by_id("29").unwrap().stock,
            Quantity::parse("17.5").unwrap()
        );
        assert_eq!(repo.get_by_id("30").unwrap().stock, Quantity::zero());
        assert!(repo.low_stock().iter().any(|p| p.id == "30"));
    }

    #[test]
    fn test_catalog_impl_serves_cart() {
        let repo = seeded();
        let mut cart = Cart::new("1");

        let err = cart
            .add_quantity(&repo, "30", Quantity::from_units(11))
            .unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));

        assert!(matches!(
            cart.add_quantity(&repo, "404", Quantity::from_units(1)),
            Err(CoreError::ProductNotFound { .. })
        ));
        assert_eq!(Catalog::products(&repo).len(), 31);
    }
}
