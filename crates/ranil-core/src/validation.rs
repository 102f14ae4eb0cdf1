//! # Validation Module
//!
//! Input checks for catalog, supplier and user records, run before a
//! repository accepts a write.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Register shell                                               │
//! │  ├── Argument count, numeric parsing                                   │
//! │  └── parse_quantity() ← operator quantities                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Field rules for Product, Supplier, User                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: ranil-store                                                  │
//! │  └── Uniqueness (duplicate ids, usernames)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart does not call into here: its own rules (positive quantity,
//! stock ceiling) are part of the reservation logic in [`crate::cart`].

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::{Product, Supplier};
use crate::{MAX_PRICE, MAX_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a catalog id.
///
/// Ids are short and free of whitespace, e.g. `"12"` or `"FEED-01"`.
///
/// ## Example
/// ```rust
/// use ranil_core::validation::validate_product_id;
///
/// assert!(validate_product_id("12").is_ok());
/// assert!(validate_product_id("").is_err());
/// assert!(validate_product_id("has space").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    required("id", id, 36)?;

    if !id
        .trim()
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name (1..=100 characters).
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    required("name", name, 100)
}

pub fn validate_category(category: &str) -> ValidationResult<()> {
    required("category", category, 50)
}

/// Validates a unit of measure such as `kg`, `bottle` or `tablet`.
pub fn validate_unit(unit: &str) -> ValidationResult<()> {
    required("unit", unit, 20)
}

/// Validates a search query.
///
/// Empty is allowed and means "everything". Returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a login name: 3..=32 characters of letters, digits or `_`.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    required("username", username, 32)?;

    let username = username.trim();
    if username.chars().count() < 3 {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must be at least 3 characters".to_string(),
        });
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Loose email check: one `@` with something on both sides and a dot in
/// the domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    required("email", email, 254)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@domain.tld".to_string(),
    };

    let (local, domain) = email.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(invalid());
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (free items are allowed)
/// - Must not exceed [`MAX_PRICE`]
///
/// ## Example
/// ```rust
/// use ranil_core::money::Money;
/// use ranil_core::validation::validate_price;
///
/// assert!(validate_price(Money::parse("60.5").unwrap()).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_major(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > Money::from_major(MAX_PRICE) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE,
        });
    }

    Ok(())
}

/// Validates a stock level (zero allowed).
pub fn validate_stock(stock: Quantity) -> ValidationResult<()> {
    validate_amount("stock", stock)
}

/// Validates a low-stock threshold (zero allowed).
pub fn validate_threshold(threshold: Quantity) -> ValidationResult<()> {
    validate_amount("low_stock_threshold", threshold)
}

fn validate_amount(field: &str, value: Quantity) -> ValidationResult<()> {
    if value < Quantity::zero() || value > Quantity::from_units(MAX_STOCK) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_STOCK,
        });
    }

    Ok(())
}

/// Parses an operator quantity and requires it to be positive.
///
/// ## User Workflow
/// ```text
/// Operator types: add 29 0.25
///       │
///       ▼
/// parse_quantity("0.25") ← THIS FUNCTION
///       │
///       ├── not a number? → InvalidQuantity
///       ├── <= 0?         → InvalidQuantity
///       │
///       └── OK → Cart::add_quantity
/// ```
pub fn parse_quantity(input: &str) -> CoreResult<Quantity> {
    let quantity = Quantity::parse(input)?;
    if !quantity.is_positive() {
        return Err(CoreError::InvalidQuantity {
            value: input.trim().to_string(),
        });
    }
    Ok(quantity)
}

// =============================================================================
// Record Validators
// =============================================================================

/// Runs every field rule on a product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_product_name(&product.name)?;
    validate_category(&product.category)?;
    validate_unit(&product.unit)?;
    validate_price(product.price)?;
    validate_stock(product.stock)?;
    validate_threshold(product.low_stock_threshold)?;
    Ok(())
}

/// Runs every field rule on a supplier.
pub fn validate_supplier(supplier: &Supplier) -> ValidationResult<()> {
    validate_product_id(&supplier.id)?;
    required("name", &supplier.name, 100)?;
    required("contact", &supplier.contact, 32)?;
    validate_email(&supplier.email)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
