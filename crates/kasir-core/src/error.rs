//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasir-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kasir-db errors (separate crate)                                      │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── CheckoutError    - CoreError or DbError from a checkout           │
//! │                                                                         │
//! │  kasir-api errors                                                      │
//! │  └── ApiError         - What HTTP clients see (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → JSON body              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{CategoryId, ProductId};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - A checkout line references an id that has no product row
    /// - The product was deleted between listing and checkout
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Category cannot be found.
    ///
    /// ## When This Occurs
    /// - Creating or re-assigning a product to a category id that does not exist
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Insufficient stock to complete a checkout.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout [{product_id: 1, quantity: 5}]
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 1, name: "Teh Botol", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// 400 INSUFFICIENT_STOCK "Insufficient stock for Teh Botol ..."
    /// ```
    ///
    /// `available` is `None` when the shortage was only discovered while
    /// committing (another checkout took the stock first).
    #[error("Insufficient stock for {name} (product {product_id}): {}requested {requested}", .available.map(|a| format!("available {a}, ")).unwrap_or_default())]
    InsufficientStock {
        product_id: ProductId,
        name: String,
        available: Option<i64>,
        requested: i64,
    },

    /// A monetary amount does not fit in 64 bits.
    #[error("Amount overflow while computing {what}")]
    AmountOverflow { what: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Collection must contain at least one element.
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The record is still referenced elsewhere and cannot be removed.
    #[error("{entity} {id} is still referenced by {referenced_by}")]
    StillReferenced {
        entity: String,
        id: i64,
        referenced_by: String,
    },
}

impl ValidationError {
    /// Creates a Required error for a field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message() {
        let err = CoreError::InsufficientStock {
            product_id: 1,
            name: "Teh Botol".to_string(),
            available: Some(3),
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Teh Botol (product 1): available 3, requested 5"
        );
    }

    #[test]
    fn test_insufficient_stock_message_without_snapshot() {
        let err = CoreError::InsufficientStock {
            product_id: 7,
            name: "Kopi".to_string(),
            available: None,
            requested: 1,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Kopi (product 7): requested 1"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "name must be at most 100 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("items").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
