//! # Catalog Provider
//!
//! The read-only view of products the cart reserves against.
//!
//! ```text
//! ┌──────────────────┐   get_product(id)   ┌──────────────────────────┐
//! │  Cart (engine)   │ ──────────────────► │  impl Catalog            │
//! │  reserve, total  │ ◄────────────────── │  ProductRepository,      │
//! └──────────────────┘   Option<Product>   │  &[Product] (tests)      │
//!                                          └──────────────────────────┘
//! ```
//!
//! The engine never writes through this trait. Stock changes are the
//! catalog owner's business.

use crate::types::Product;

/// Read-only product lookup.
pub trait Catalog {
    /// Returns the product with this id, if any.
    fn get_product(&self, id: &str) -> Option<Product>;

    /// Returns every product, in catalog order.
    fn products(&self) -> Vec<Product>;
}

impl Catalog for [Product] {
    fn get_product(&self, id: &str) -> Option<Product> {
        self.iter().find(|p| p.id == id).cloned()
    }

    fn products(&self) -> Vec<Product> {
        self.to_vec()
    }
}

impl Catalog for Vec<Product> {
    fn get_product(&self, id: &str) -> Option<Product> {
        self.as_slice().get_product(id)
    }

    fn products(&self) -> Vec<Product> {
        self.clone()
    }
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn get_product(&self, id: &str) -> Option<Product> {
        (**self).get_product(id)
    }

    fn products(&self) -> Vec<Product> {
        (**self).products()
    }
}
