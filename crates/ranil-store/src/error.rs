//! # Store Error Types
//!
//! Error types for repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (ranil-core)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds entity context                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ShellError (register app) ← Code + message for the operator           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use ranil_core::{CoreError, ValidationError};
use thiserror::Error;

/// Repository operation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Entity not found.
    ///
    /// ## When This Occurs
    /// - Update or delete of an unknown id
    /// - Stock adjustment for a product that was removed
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Uniqueness violation.
    ///
    /// ## When This Occurs
    /// - Inserting a product, supplier or user id that exists
    /// - Inserting a second user with the same username
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Record failed field validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Domain rule failure surfaced through the store.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            StoreError::not_found("Product", "99").to_string(),
            "Product not found: 99"
        );
        assert_eq!(
            StoreError::duplicate("username", "admin").to_string(),
            "Duplicate username: 'admin' already exists"
        );
        assert_eq!(
            StoreError::from(CoreError::EmptyCart).to_string(),
            "Cart is empty"
        );
    }
}
