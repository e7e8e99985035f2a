//! # Calculator Errors
//!
//! Domain-specific error types for habemus-core.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  habemus-core errors (this file)                                       │
//! │  ├── CoreError        - Precondition violations (InvalidArgument)      │
//! │  └── ValidationError  - The specific rule that was broken              │
//! │                                                                         │
//! │  habemus-db errors (separate crate)                                    │
//! │  └── DbError          - Data source failures                           │
//! │                                                                         │
//! │  habemus-app errors                                                    │
//! │  └── AppError         - Startup / configuration failures               │
//! │                                                                         │
//! │  Data source failures during a catalog load never surface as errors:   │
//! │  the view model turns them into `SalesUiState::error`.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while building products and cart lines.
///
/// These are precondition violations: callers are expected to prevent them
/// (the view model removes a cart entry instead of building a `CartItem`
/// with a negative quantity).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An argument broke a domain invariant.
    #[error("{0}")]
    InvalidArgument(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A value rejected before it reaches a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A cart quantity below zero.
    #[error("Quantity must be non-negative")]
    NegativeQuantity { quantity: i64 },

    /// A product price below zero.
    #[error("{field} must be non-negative")]
    NegativePrice { field: String },

    /// Two catalog entries share an id.
    #[error("Duplicate product id {id} in catalog")]
    DuplicateProductId { id: ProductId },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
