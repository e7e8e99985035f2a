//! # Input Checks
//!
//! Business rule checks shared by the domain constructors and the catalog
//! loader.
//!
//! ## Where Checks Run
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Product::new ───────► validate_price_cents (both tiers)               │
//! │  CartItem::new ──────► validate_quantity                               │
//! │  load_products ──────► validate_catalog (ids unique)                   │
//! │                                                                         │
//! │  SQLite adds its own PRIMARY KEY / CHECK constraints underneath.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use habemus_core::validation::{validate_price_cents, validate_quantity};
//!
//! validate_quantity(5).unwrap();
//! assert!(validate_price_cents("price_retail", -1).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::Product;

pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be zero or positive (zero is a valid line that contributes nothing)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::NegativeQuantity { quantity: qty });
    }
    Ok(())
}

/// Prices are stored as cents and may be zero, never negative.
///
/// `field` names the offending column in the error message.
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::NegativePrice {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a freshly loaded catalog.
///
/// ## Rules
/// - Product ids are unique; the first repeated id is reported
pub fn validate_catalog(products: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if !seen.insert(product.id()) {
            return Err(ValidationError::DuplicateProductId { id: product.id() });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
