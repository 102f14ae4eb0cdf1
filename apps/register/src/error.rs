//! # Shell Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Register                           │
//! │                                                                         │
//! │  Operator types: add 30 12                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ShellError>                                           │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ──── StoreError::NotFound ──────────┐              │  │
//! │  │         │                                         │              │  │
//! │  │         ▼                                         ▼              │  │
//! │  │  Cart Error? ───── CoreError::InsufficientStock ─ ShellError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Shell prints: "Error: Cannot add 12 bottle. Only 10 bottle available."│
//! │  The loop continues; no error ends the session.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! `ShellError` serializes to `{ "code": "...", "message": "..." }` so a UI
//! driving the register can branch on the code.

use ranil_core::{CoreError, ValidationError};
use ranil_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Error returned from register commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for 30: available 10, requested 12"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ShellError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, sale or account not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Reservation would exceed stock
    InsufficientStock,

    /// Checkout with nothing in the cart
    EmptyCart,

    /// Quantity is not a positive number
    InvalidQuantity,

    /// Command needs a signed-in user
    NotSignedIn,

    /// Signed-in role may not run this command
    Forbidden,

    /// Unrecognized command or wrong arguments
    Usage,

    /// Something that should not happen
    Internal,
}

impl ShellError {
    /// Creates a new shell error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ShellError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ShellError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        ShellError::new(ErrorCode::Usage, message)
    }

    pub fn not_signed_in() -> Self {
        ShellError::new(ErrorCode::NotSignedIn, "Please log in first")
    }

    pub fn forbidden(what: &str) -> Self {
        ShellError::new(
            ErrorCode::Forbidden,
            format!("Only administrators can {}", what),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ShellError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to shell errors.
impl From<CoreError> for ShellError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound { product_id } => {
                ShellError::not_found("Product", &product_id)
            }
            err @ CoreError::InsufficientStock { .. } => {
                ShellError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::EmptyCart => ShellError::new(
                ErrorCode::EmptyCart,
                "Cart is empty. Add items before completing the sale.",
            ),
            CoreError::InvalidQuantity { value } => ShellError::new(
                ErrorCode::InvalidQuantity,
                format!("Invalid quantity: '{}'. Enter a number greater than 0.", value),
            ),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ShellError {
    fn from(err: ValidationError) -> Self {
        ShellError::new(ErrorCode::ValidationError, err.to_string())
    }
}

/// Converts store errors to shell errors.
impl From<StoreError> for ShellError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ShellError::not_found(&entity, &id),
            StoreError::Duplicate { field, value } => ShellError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            StoreError::Validation(e) => e.into(),
            StoreError::Core(e) => e.into(),
        }
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!(error = %err, "Terminal I/O failed");
        ShellError::internal(format!("I/O error: {}", err))
    }
}

/// Result type for register commands.
pub type ShellResult<T> = Result<T, ShellError>;
