//! # Management Commands
//!
//! Catalog, supplier and account maintenance. Every command here is
//! admin only.
//!
//! ## Commands
//! ```text
//! ┌──────────────────────────────────────────────┬──────────────────────────┐
//! │ Command                                      │ Effect                   │
//! ├──────────────────────────────────────────────┼──────────────────────────┤
//! │ product add <name> | <category> | <price>    │ New product              │
//! │   | <stock> | <unit> | <threshold>           │                          │
//! │   | <supplier-id>                            │                          │
//! │ product edit <id> <field> <value>            │ Change one field         │
//! │ product delete <id>                          │ Remove from the catalog  │
//! │ restock <id> <qty>                           │ Adjust stock by qty      │
//! ├──────────────────────────────────────────────┼──────────────────────────┤
//! │ suppliers                                    │ Supplier list            │
//! │ supplier add <name> | <contact> | <email>    │ New supplier             │
//! │ supplier edit <id> <field> <value>           │ Change one field         │
//! │ supplier delete <id>                         │ Only if it supplies none │
//! ├──────────────────────────────────────────────┼──────────────────────────┤
//! │ users                                        │ Active, then inactive    │
//! │ user add <username> [admin|seller]           │ New active account       │
//! │ user activate|deactivate <id>                │ Toggle sign-in access    │
//! └──────────────────────────────────────────────┴──────────────────────────┘
//! ```
//!
//! New records get the next free numeric id.

use tracing::{debug, info};

use ranil_core::{Money, Product, Quantity, Role, Supplier, User};
use ranil_store::{ProductRepository, SupplierRepository, UserRepository};

use crate::error::{ErrorCode, ShellError, ShellResult};
use crate::state::SessionState;

const PRODUCT_ADD_USAGE: &str = "Usage: product add <name> | <category> | <price> | <stock> | <unit> | <threshold> | <supplier-id>";
const SUPPLIER_ADD_USAGE: &str = "Usage: supplier add <name> | <contact> | <email>";

// =============================================================================
// Forms
// =============================================================================

/// Fields of a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub stock: Quantity,
    pub unit: String,
    pub low_stock_threshold: Quantity,
    pub supplier_id: String,
}

/// One product field to change.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductChange {
    Name(String),
    Category(String),
    Price(Money),
    Stock(Quantity),
    Unit(String),
    Threshold(Quantity),
    Supplier(String),
}

/// Fields of a new supplier.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierForm {
    pub name: String,
    pub contact: String,
    pub email: String,
}

/// One supplier field to change.
#[derive(Debug, Clone, PartialEq)]
pub enum SupplierChange {
    Name(String),
    Contact(String),
    Email(String),
}

/// Parses `<name> | <category> | <price> | <stock> | <unit> | <threshold> | <supplier-id>`.
pub fn parse_product_form(input: &str) -> ShellResult<ProductForm> {
    let fields = split_fields(input);
    let [name, category, price, stock, unit, threshold, supplier_id] = fields.as_slice() else {
        return Err(ShellError::usage(PRODUCT_ADD_USAGE));
    };

    Ok(ProductForm {
        name: name.to_string(),
        category: category.to_string(),
        price: parse_price(price)?,
        stock: parse_amount("stock", stock)?,
        unit: unit.to_string(),
        low_stock_threshold: parse_amount("threshold", threshold)?,
        supplier_id: supplier_id.to_string(),
    })
}

/// Parses `<field> <value>` for `product edit`.
pub fn parse_product_change(field: &str, value: &str) -> ShellResult<ProductChange> {
    let value = value.trim();
    let change = match field.to_ascii_lowercase().as_str() {
        "name" => ProductChange::Name(value.to_string()),
        "category" => ProductChange::Category(value.to_string()),
        "price" => ProductChange::Price(parse_price(value)?),
        "stock" => ProductChange::Stock(parse_amount("stock", value)?),
        "unit" => ProductChange::Unit(value.to_string()),
        "threshold" => ProductChange::Threshold(parse_amount("threshold", value)?),
        "supplier" => ProductChange::Supplier(value.to_string()),
        other => {
            return Err(ShellError::usage(format!(
                "Unknown product field '{}'. Fields: name, category, price, stock, unit, threshold, supplier",
                other
            )))
        }
    };
    Ok(change)
}

/// Parses `<name> | <contact> | <email>`.
pub fn parse_supplier_form(input: &str) -> ShellResult<SupplierForm> {
    let fields = split_fields(input);
    let [name, contact, email] = fields.as_slice() else {
        return Err(ShellError::usage(SUPPLIER_ADD_USAGE));
    };

    Ok(SupplierForm {
        name: name.to_string(),
        contact: contact.to_string(),
        email: email.to_string(),
    })
}

/// Parses `<field> <value>` for `supplier edit`.
pub fn parse_supplier_change(field: &str, value: &str) -> ShellResult<SupplierChange> {
    let value = value.trim().to_string();
    match field.to_ascii_lowercase().as_str() {
        "name" => Ok(SupplierChange::Name(value)),
        "contact" => Ok(SupplierChange::Contact(value)),
        "email" => Ok(SupplierChange::Email(value)),
        other => Err(ShellError::usage(format!(
            "Unknown supplier field '{}'. Fields: name, contact, email",
            other
        ))),
    }
}

fn split_fields(input: &str) -> Vec<&str> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    input.split('|').map(str::trim).collect()
}

fn parse_price(raw: &str) -> ShellResult<Money> {
    Money::parse(raw).ok_or_else(|| {
        ShellError::new(
            ErrorCode::ValidationError,
            format!("Invalid price: '{}'", raw.trim()),
        )
    })
}

fn parse_amount(field: &str, raw: &str) -> ShellResult<Quantity> {
    Quantity::parse(raw).map_err(|_| {
        ShellError::new(
            ErrorCode::ValidationError,
            format!("Invalid {}: '{}'", field, raw.trim()),
        )
    })
}

/// One past the largest numeric id in use.
fn next_id<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let max = ids.filter_map(|id| id.parse::<u64>().ok()).max().unwrap_or(0);
    max.saturating_add(1).to_string()
}

fn require_supplier(suppliers: &SupplierRepository, id: &str) -> ShellResult<()> {
    suppliers
        .get_by_id(id)
        .map(|_| ())
        .ok_or_else(|| ShellError::not_found("Supplier", id))
}

// =============================================================================
// Products
// =============================================================================

/// Adds a product under the next free id.
pub fn add_product(
    products: &ProductRepository,
    suppliers: &SupplierRepository,
    session: &SessionState,
    form: ProductForm,
) -> ShellResult<Product> {
    debug!(name = %form.name, "add_product command");
    session.require_admin("manage products")?;
    require_supplier(suppliers, &form.supplier_id)?;

    let id = next_id(products.list().iter().map(|p| p.id.as_str()));
    let product = products.insert(Product {
        id,
        name: form.name,
        category: form.category,
        price: form.price,
        stock: form.stock,
        unit: form.unit,
        low_stock_threshold: form.low_stock_threshold,
        supplier_id: form.supplier_id,
    })?;

    info!(id = %product.id, name = %product.name, "Product added");
    Ok(product)
}

/// Changes one field of a product.
///
/// Carts already holding the product keep the price they reserved at.
pub fn edit_product(
    products: &ProductRepository,
    suppliers: &SupplierRepository,
    session: &SessionState,
    id: &str,
    change: ProductChange,
) -> ShellResult<Product> {
    debug!(id, ?change, "edit_product command");
    session.require_admin("manage products")?;

    let mut product = products
        .get_by_id(id)
        .ok_or_else(|| ShellError::not_found("Product", id))?;

    match change {
        ProductChange::Name(name) => product.name = name,
        ProductChange::Category(category) => product.category = category,
        ProductChange::Price(price) => product.price = price,
        ProductChange::Stock(stock) => product.stock = stock,
        ProductChange::Unit(unit) => product.unit = unit,
        ProductChange::Threshold(threshold) => product.low_stock_threshold = threshold,
        ProductChange::Supplier(supplier_id) => {
            require_supplier(suppliers, &supplier_id)?;
            product.supplier_id = supplier_id;
        }
    }

    products.update(product.clone())?;
    info!(id = %product.id, "Product updated");
    Ok(product)
}

/// Removes a product from the catalog. Past sales keep their copy.
pub fn delete_product(
    products: &ProductRepository,
    session: &SessionState,
    id: &str,
) -> ShellResult<Product> {
    debug!(id, "delete_product command");
    session.require_admin("manage products")?;

    let removed = products.delete(id)?;
    info!(id = %removed.id, name = %removed.name, "Product deleted");
    Ok(removed)
}

/// Adds `delta` to a product's stock (negative corrects it down).
pub fn restock(
    products: &ProductRepository,
    session: &SessionState,
    id: &str,
    delta: Quantity,
) -> ShellResult<Product> {
    debug!(id, %delta, "restock command");
    session.require_admin("manage products")?;

    products.adjust_stock(id, delta)?;
    products
        .get_by_id(id)
        .ok_or_else(|| ShellError::not_found("Product", id))
}

// =============================================================================
// Suppliers
// =============================================================================

pub fn list_suppliers(
    suppliers: &SupplierRepository,
    session: &SessionState,
) -> ShellResult<Vec<Supplier>> {
    debug!("list_suppliers command");
    session.require_admin("manage suppliers")?;
    Ok(suppliers.list())
}

pub fn add_supplier(
    suppliers: &SupplierRepository,
    session: &SessionState,
    form: SupplierForm,
) -> ShellResult<Supplier> {
    debug!(name = %form.name, "add_supplier command");
    session.require_admin("manage suppliers")?;

    let id = next_id(suppliers.list().iter().map(|s| s.id.as_str()));
    let supplier = suppliers.insert(Supplier {
        id,
        name: form.name,
        contact: form.contact,
        email: form.email,
    })?;

    info!(id = %supplier.id, name = %supplier.name, "Supplier added");
    Ok(supplier)
}

pub fn edit_supplier(
    suppliers: &SupplierRepository,
    session: &SessionState,
    id: &str,
    change: SupplierChange,
) -> ShellResult<Supplier> {
    debug!(id, ?change, "edit_supplier command");
    session.require_admin("manage suppliers")?;

    let mut supplier = suppliers
        .get_by_id(id)
        .ok_or_else(|| ShellError::not_found("Supplier", id))?;

    match change {
        SupplierChange::Name(name) => supplier.name = name,
        SupplierChange::Contact(contact) => supplier.contact = contact,
        SupplierChange::Email(email) => supplier.email = email,
    }

    suppliers.update(supplier.clone())?;
    Ok(supplier)
}

/// Deletes a supplier no product is ordered from.
pub fn delete_supplier(
    products: &ProductRepository,
    suppliers: &SupplierRepository,
    session: &SessionState,
    id: &str,
) -> ShellResult<Supplier> {
    debug!(id, "delete_supplier command");
    session.require_admin("manage suppliers")?;
    require_supplier(suppliers, id)?;

    let supplied = products
        .list()
        .iter()
        .filter(|p| p.supplier_id == id)
        .count();
    if supplied > 0 {
        return Err(ShellError::new(
            ErrorCode::ValidationError,
            format!("Supplier {} still supplies {} product(s)", id, supplied),
        ));
    }

    let removed = suppliers.delete(id)?;
    info!(id = %removed.id, name = %removed.name, "Supplier deleted");
    Ok(removed)
}

// =============================================================================
// Users
// =============================================================================

pub fn list_users(users: &UserRepository, session: &SessionState) -> ShellResult<Vec<User>> {
    debug!("list_users command");
    session.require_admin("manage users")?;
    Ok(users.list())
}

/// Creates an active account under the next free id.
pub fn add_user(
    users: &UserRepository,
    session: &SessionState,
    username: &str,
    role: Role,
) -> ShellResult<User> {
    debug!(username, ?role, "add_user command");
    session.require_admin("manage users")?;

    let id = next_id(users.list().iter().map(|u| u.id.as_str()));
    let user = users.insert(User {
        id,
        username: username.trim().to_string(),
        role,
        active: true,
    })?;

    info!(id = %user.id, username = %user.username, "User added");
    Ok(user)
}

/// Enables or disables sign-in for an account.
///
/// The signed-in administrator cannot deactivate themselves.
pub fn set_user_active(
    users: &UserRepository,
    session: &SessionState,
    id: &str,
    active: bool,
) -> ShellResult<User> {
    debug!(id, active, "set_user_active command");
    let admin = session.require_admin("manage users")?;
    if !active && admin.id == id {
        return Err(ShellError::new(
            ErrorCode::ValidationError,
            "You cannot deactivate your own account",
        ));
    }

    users.set_active(id, active)?;
    users
        .get_by_id(id)
        .ok_or_else(|| ShellError::not_found("User", id))
}

// =============================================================================
// Rendering
// =============================================================================

pub fn render_suppliers(suppliers: &[Supplier]) -> String {
    if suppliers.is_empty() {
        return "No suppliers.\n".to_string();
    }

    let mut out = format!("{:<5} {:<28} {:<12} {}\n", "ID", "Name", "Contact", "Email");
    for s in suppliers {
        out.push_str(&format!(
            "{:<5} {:<28} {:<12} {}\n",
            s.id, s.name, s.contact, s.email
        ));
    }
    out
}

pub fn render_users(users: &[User]) -> String {
    let mut out = String::new();
    for (heading, active) in [("Active users", true), ("Inactive users", false)] {
        let group: Vec<&User> = users.iter().filter(|u| u.active == active).collect();
        out.push_str(&format!("{} ({})\n", heading, group.len()));
        for u in group {
            out.push_str(&format!("  {:<5} {:<20} {}\n", u.id, u.username, u.role.as_str()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use ranil_store::{Store, StoreConfig};

    use crate::commands::session;

    use super::*;

    fn signed_in(store: &Store, username: &str) -> SessionState {
        let mut state = SessionState::new();
        session::login(&store.users(), &mut state, username).unwrap();
        state
    }

    fn vitality() -> ProductForm {
        parse_product_form("Vitality Adult | Dog Food | 180.50 | 40 | kg | 10 | 1").unwrap()
    }

    #[test]
    fn test_parse_product_form() {
        let form = vitality();
        assert_eq!(form.name, "Vitality Adult");
        assert_eq!(form.price, Money::parse("180.5").unwrap());
        assert_eq!(form.stock, Quantity::from_units(40));
        assert_eq!(form.supplier_id, "1");

        assert_eq!(
            parse_product_form("Vitality | Dog Food | 180").unwrap_err().code,
            ErrorCode::Usage
        );
        assert_eq!(
            parse_product_form("Vitality | Dog Food | cheap | 40 | kg | 10 | 1")
                .unwrap_err()
                .code,
            ErrorCode::ValidationError
        );
        assert_eq!(parse_product_form("").unwrap_err().code, ErrorCode::Usage);
    }

    #[test]
    fn test_parse_changes() {
        assert_eq!(
            parse_product_change("PRICE", "500").unwrap(),
            ProductChange::Price(Money::from_major(500))
        );
        assert_eq!(
            parse_product_change("name", " Round Up 1L ").unwrap(),
            ProductChange::Name("Round Up 1L".into())
        );
        assert_eq!(parse_product_change("colour", "red").unwrap_err().code, ErrorCode::Usage);
        assert_eq!(
            parse_supplier_change("email", "sales@agrovet.lk").unwrap(),
            SupplierChange::Email("sales@agrovet.lk".into())
        );
    }

    #[test]
    fn test_add_product_assigns_next_id() {
        let store = Store::new(StoreConfig::default()).unwrap();
        let admin = signed_in(&store, "admin");

        let product = add_product(&store.products(), &store.suppliers(), &admin, vitality()).unwrap();

        assert_eq!(product.id, "32");
        assert_eq!(store.products().count(), 32);
        assert_eq!(store.products().search("vitality", 20).unwrap().len(), 1);
    }

    #[test]
    fn test_add_product_checks_supplier_and_fields() {
        let store = Store::new(StoreConfig::default()).unwrap();
        let admin = signed_in(&store, "admin");

        let mut form = vitality();
        form.supplier_id = "9".into();
        let err = add_product(&store.products(), &store.suppliers(), &admin, form).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let mut form = vitality();
        form.unit = " ".into();
        let err = add_product(&store.products(), &store.suppliers(), &admin, form).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(store.products().count(), 31);
    }

    #[test]
    fn test_sellers_cannot_manage() {
        let store = Store::new(StoreConfig::default()).unwrap();
        let seller = signed_in(&store, "seller");

        let err = add_product(&store.products(), &store.suppliers(), &seller, vitality()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.message, "Only administrators can manage products");

        assert!(restock(&store.products(), &seller, "30", Quantity::from_units(5)).is_err());
        assert!(list_suppliers(&store.suppliers(), &seller).is_err());
        assert!(add_user(&store.users(), &seller, "sneaky", Role::Admin).is_err());
        assert_eq!(store.products().get_by_id("30").unwrap().stock, Quantity::from_units(10));
    }

    #[test]
    fn test_edit_and_delete_product() {
        let store = Store::new(StoreConfig::default()).unwrap();
        let admin = signed_in(&store, "admin");
        let products = store.products();

        let edited = edit_product(
            &products,
            &store.suppliers(),
            &admin,
            "30",
            ProductChange::Price(Money::from_major(500)),
        )
        .unwrap();
        assert_eq!(edited.price, Money::from_major(500));
        assert_eq!(products.get_by_id("30").unwrap().price, Money::from_major(500));

        let err = edit_product(
            &products,
            &store.suppliers(),
            &admin,
            "30",
            ProductChange::Stock(Quantity::from_units(2_000_000)),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = edit_product(
            &products,
            &store.suppliers(),
            &admin,
            "30",
            ProductChange::Supplier("9".into()),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let removed = delete_product(&products, &admin, "30").unwrap();
        assert_eq!(removed.name, "Round Up");
        assert!(products.get_by_id("30").is_none());
        assert_eq!(delete_product(&products, &admin, "30").unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_restock() {
        let store = Store::new(StoreConfig::default()).unwrap();
        let admin = signed_in(&store, "admin");

        let product = restock(&store.products(), &admin, "30", Quantity::from_units(5)).unwrap();
        assert_eq!(product.stock, Quantity::from_units(15));

        let product = restock(&store.products(), &admin, "30", Quantity::from_units(-3)).unwrap();
        assert_eq!(product.stock, Quantity::from_units(12));

        let err = restock(&store.products(), &admin, "30", Quantity::from_units(1_000_000)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(store.products().get_by_id("30").unwrap().stock, Quantity::from_units(12));
    }

    #[test]
    fn test_supplier_lifecycle() {
        let store = Store::new(StoreConfig::default()).unwrap();
        let admin = signed_in(&store, "admin");
        let suppliers = store.suppliers();

        let form = parse_supplier_form("Pet Depot | 0774567890 | orders@petdepot.lk").unwrap();
        let added = add_supplier(&suppliers, &admin, form).unwrap();
        assert_eq!(added.id, "4");

        let err = edit_supplier(&suppliers, &admin, "4", SupplierChange::Email("nope".into()))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        edit_supplier(&suppliers, &admin, "4", SupplierChange::Contact("0775550000".into()))
            .unwrap();
        assert_eq!(suppliers.get_by_id("4").unwrap().contact, "0775550000");

        // Ceylon Poultry still supplies the dog food
        let err = delete_supplier(&store.products(), &suppliers, &admin, "1").unwrap_err();
        assert_eq!(err.message, "Supplier 1 still supplies 11 product(s)");

        delete_supplier(&store.products(), &suppliers, &admin, "4").unwrap();
        assert_eq!(list_suppliers(&suppliers, &admin).unwrap().len(), 3);
    }

    #[test]
    fn test_user_management() {
        let store = Store::new(StoreConfig::default()).unwrap();
        let admin = signed_in(&store, "admin");
        let users = store.users();

        let clerk = add_user(&users, &admin, "new_clerk", Role::Seller).unwrap();
        assert_eq!(clerk.id, "6");
        assert!(clerk.active);
        assert!(users.find_active("new_clerk").is_some());

        let err = add_user(&users, &admin, "SELLER", Role::Seller).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let john = set_user_active(&users, &admin, "3", false).unwrap();
        assert!(!john.active);
        assert!(users.find_active("john_seller").is_none());

        set_user_active(&users, &admin, "5", true).unwrap();
        assert!(users.find_active("old_user").is_some());

        let err = set_user_active(&users, &admin, "1", false).unwrap_err();
        assert_eq!(err.message, "You cannot deactivate your own account");
        assert_eq!(
            set_user_active(&users, &admin, "42", true).unwrap_err().code,
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_render_users_groups_by_status() {
        let store = Store::new(StoreConfig::default()).unwrap();
        let admin = signed_in(&store, "admin");

        let text = render_users(&list_users(&store.users(), &admin).unwrap());
        assert!(text.starts_with("Active users (4)\n"));
        assert!(text.contains("Inactive users (1)\n"));
        assert!(text.contains("old_user"));
    }
}
