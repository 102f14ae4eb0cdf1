//! # Demo Data
//!
//! Loads the shop's demo catalog, suppliers, accounts and a short sales
//! history into an empty store.
//!
//! ## What Gets Loaded
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  31 products   Dog Food, Cat Food, Cat Litter, Poultry Feed, Hog Feed, │
//! │                Aqua Feed, Medicine, Chemical                            │
//! │   3 suppliers                                                          │
//! │   5 accounts   admin, seller, john_seller, mary_admin, old_user (off)  │
//! │   6 sales      2 today, 2 yesterday, 2 seven days ago                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything goes through the normal repository inserts, so the demo data
//! obeys the same validation as operator input.

use chrono::{DateTime, Duration, Utc};
use ranil_core::{CartLine, Money, Product, Quantity, Role, SaleRecord, Supplier, User};
use tracing::info;

use crate::error::StoreResult;
use crate::store::Store;

/// (id, name, category, stock, price in cents, supplier, threshold, unit)
const PRODUCTS: &[(&str, &str, &str, i64, i64, &str, i64, &str)] = &[
    ("1", "Aozi Dog Adult", "Dog Food", 100, 16500, "1", 30, "kg"),
    ("2", "Beef Pro Adult (1kg)", "Dog Food", 45, 12000, "1", 30, "kg"),
    ("3", "Beef Pro Adult (½kg)", "Dog Food", 20, 6000, "1", 20, "kg"),
    ("4", "Beef Pro Puppy", "Dog Food", 30, 14000, "1", 20, "kg"),
    ("5", "Bow Wow Adult", "Dog Food", 100, 7000, "1", 30, "kg"),
    ("6", "Bow Wow Puppy", "Dog Food", 50, 8000, "1", 25, "kg"),
    ("7", "High Action 24", "Dog Food", 80, 5500, "1", 30, "kg"),
    ("8", "Nutrichunks Adult", "Dog Food", 40, 10500, "1", 25, "kg"),
    ("9", "Nutrichunks Puppy", "Dog Food", 25, 13500, "1", 20, "kg"),
    ("10", "Pedigree Adult", "Dog Food", 60, 11000, "1", 30, "kg"),
    ("11", "Pedigree Puppy", "Dog Food", 40, 13000, "1", 25, "kg"),
    ("12", "Aozi Cat Organic", "Cat Food", 40, 16500, "2", 20, "kg"),
    ("13", "Meow Mix", "Cat Food", 35, 14000, "2", 20, "kg"),
    ("14", "Whiskas Adult", "Cat Food", 30, 17000, "2", 20, "kg"),
    ("15", "Whiskas Kitten", "Cat Food", 25, 18000, "2", 20, "kg"),
    ("16", "Cat Litter (Feline)", "Cat Litter", 20, 22000, "2", 10, "bag"),
    ("17", "Cat Litter (Generic)", "Cat Litter", 30, 9000, "2", 15, "pack"),
    ("18", "African Mix (Lovebird)", "Poultry Feed", 60, 6500, "3", 25, "kg"),
    ("19", "Crack Corn (Bistay)", "Poultry Feed", 80, 3500, "3", 30, "kg"),
    ("20", "Integra 3000", "Poultry Feed", 50, 6500, "3", 25, "kg"),
    ("21", "Sunflower Seeds", "Poultry Feed", 40, 9000, "3", 20, "kg"),
    ("22", "Hog Starter (B-Meg)", "Hog Feed", 80, 6500, "4", 30, "kg"),
    ("23", "Hog Finisher", "Hog Feed", 80, 5500, "4", 30, "kg"),
    ("24", "Floating Pellet (Adult)", "Aqua Feed", 50, 6500, "4", 25, "kg"),
    ("25", "Amoxicillin", "Medicine", 200, 400, "5", 50, "tablet"),
    ("26", "Albendazole", "Medicine", 50, 8500, "5", 20, "tablet"),
    ("27", "Dextrose Powder", "Medicine", 40, 3000, "5", 20, "pack"),
    ("28", "Zero Mite Shampoo", "Medicine", 100, 1200, "5", 30, "sachet"),
    ("29", "Lannate", "Chemical", 20, 6050, "6", 10, "pack"),
    ("30", "Round Up", "Chemical", 10, 48500, "6", 5, "bottle"),
    ("31", "Racumin / Rato", "Chemical", 50, 2500, "6", 15, "pack"),
];

/// (id, name, contact, email)
const SUPPLIERS: &[(&str, &str, &str, &str)] = &[
    ("1", "Ceylon Poultry Supplies", "0771234567", "ceylon@poultry.lk"),
    ("2", "Lanka Feed Mills", "0772345678", "info@lankafeed.lk"),
    ("3", "Agro Vet Solutions", "0773456789", "contact@agrovet.lk"),
];

/// (id, username, role, active)
const USERS: &[(&str, &str, Role, bool)] = &[
    ("1", "admin", Role::Admin, true),
    ("2", "seller", Role::Seller, true),
    ("3", "john_seller", Role::Seller, true),
    ("4", "mary_admin", Role::Admin, true),
    ("5", "old_user", Role::Seller, false),
];

/// (days ago, seller, [(product id, quantity)])
const SALES: &[(i64, &str, &[(&str, i64)])] = &[
    (0, "1", &[("1", 3), ("8", 2)]),
    (0, "1", &[("16", 4)]),
    (1, "2", &[("22", 2), ("19", 5)]),
    (1, "2", &[("25", 20), ("27", 5)]),
    (7, "3", &[("29", 2), ("31", 4)]),
    (7, "3", &[("14", 3)]),
];

/// Loads the demo data, dating sales relative to `now`.
pub fn load(store: &Store, now: DateTime<Utc>) -> StoreResult<()> {
    let products = store.products();
    for &(id, name, category, stock, price_cents, supplier_id, threshold, unit) in PRODUCTS {
        products.insert(Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price: Money::from_cents(price_cents),
            stock: Quantity::from_units(stock),
            unit: unit.to_string(),
            low_stock_threshold: Quantity::from_units(threshold),
            supplier_id: supplier_id.to_string(),
        })?;
    }

    let suppliers = store.suppliers();
    for &(id, name, contact, email) in SUPPLIERS {
        suppliers.insert(Supplier {
            id: id.to_string(),
            name: name.to_string(),
            contact: contact.to_string(),
            email: email.to_string(),
        })?;
    }

    let users = store.users();
    for &(id, username, role, active) in USERS {
        users.insert(User {
            id: id.to_string(),
            username: username.to_string(),
            role,
            active,
        })?;
    }

    let sales = store.sales();
    for &(days_ago, seller_id, items) in SALES {
        let at = now - Duration::days(days_ago);
        let lines = items
            .iter()
            .filter_map(|&(product_id, quantity)| {
                products.get_by_id(product_id).map(|product| {
                    let mut line = CartLine::from_product(&product, Quantity::from_units(quantity));
                    line.added_at = at;
                    line
                })
            })
            .collect();
        sales.insert(SaleRecord::new(seller_id, lines, at));
    }

    info!(
        products = PRODUCTS.len(),
        suppliers = SUPPLIERS.len(),
        users = USERS.len(),
        sales = SALES.len(),
        "Demo data loaded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use ranil_core::report;

    use crate::StoreConfig;

    use super::*;

    #[test]
    fn test_seeded_sales_totals() {
        let store = Store::new(StoreConfig::empty()).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 14, 30, 0).unwrap();
        load(&store, now).unwrap();

        let totals: Vec<Money> = store.sales().list().iter().map(|s| s.total()).collect();
        let expected: Vec<Money> = [705, 880, 305, 230, 221, 510]
            .into_iter()
            .map(Money::from_major)
            .collect();
        assert_eq!(totals, expected);

        assert_eq!(report::total_revenue(&store.sales().list()), Money::from_major(2851));
    }

    #[test]
    fn test_seeded_receipt_numbers() {
        let store = Store::new(StoreConfig::empty()).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 14, 30, 0).unwrap();
        load(&store, now).unwrap();

        let numbers: Vec<String> = store
            .sales()
            .list()
            .iter()
            .filter_map(|s| s.receipt_number().map(str::to_string))
            .collect();
        assert_eq!(numbers[0], "20261018-01-0001");
        assert_eq!(numbers[1], "20261018-01-0002");
        assert_eq!(numbers[2], "20261017-01-0001");
        assert_eq!(numbers[5], "20261011-01-0002");
    }

    #[test]
    fn test_seed_twice_is_rejected() {
        let store = Store::new(StoreConfig::new()).unwrap();
        assert!(load(&store, Utc::now()).is_err());
    }

    #[test]
    fn test_lannate_price_keeps_cents() {
        let store = Store::new(StoreConfig::new()).unwrap();
        let lannate = store.products().get_by_id("29").unwrap();
        assert_eq!(lannate.price, Money::parse("60.50").unwrap());
    }
}
