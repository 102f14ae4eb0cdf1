//! # Error Types
//!
//! Domain-specific error types for ranil-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ranil-core errors (this file)                                         │
//! │  ├── CoreError        - Cart and domain rule failures                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  ranil-store errors (separate crate)                                   │
//! │  └── StoreError       - Repository operation failures                  │
//! │                                                                         │
//! │  Register shell errors (in app)                                        │
//! │  └── ShellError       - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ShellError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable: the operator corrects the input and
//! resubmits. Nothing here is fatal to the process.

use thiserror::Error;

use crate::quantity::Quantity;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Reservation would exceed the catalog stock.
    ///
    /// `available` is the remaining headroom the operator can still add, so
    /// the UI can say exactly how much is left.
    ///
    /// ## User Workflow
    /// ```text
    /// Stock 10 kg, cart already holds 4 kg
    ///      │
    ///      ▼
    /// Add 7 kg
    ///      │
    ///      ▼
    /// InsufficientStock { requested: 7, available: 6 }
    ///      │
    ///      ▼
    /// UI shows: "Cannot add 7 kg. Only 6 kg available."
    /// ```
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        requested: Quantity,
        available: Quantity,
    },

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Quantity is non-positive or not a number.
    #[error("Invalid quantity: {value}")]
    InvalidQuantity { value: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when catalog, supplier or user data doesn't meet requirements,
/// before it reaches a repository.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid id, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate product id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
