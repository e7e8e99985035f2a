//! # habemus-core: Pure Business Logic for Habemus Sales
//!
//! This crate holds the pricing and cart rules of the sales calculator as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Habemus Sales Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Rendering surface (mobile / web)                   │   │
//! │  │      Product list ──► Quantity inputs ──► Totals + share        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ subscribe / mutate                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │         habemus-app (SalesViewModel + SalesUiState)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ habemus-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  summary  │  │   │
//! │  │   │  Product  │  │   Money   │  │ CartItem  │  │ order text│  │   │
//! │  │   │ Customer  │  │  format   │  │ SalesCalc │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │       habemus-db (ProductRepository implementations)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product and CustomerType
//! - [`money`] - Money type with integer cents and the display format
//! - [`cart`] - CartItem, SalesCalculation, CartCalculator
//! - [`catalog`] - The reference seed catalog
//! - [`summary`] - Shareable order summary text
//! - [`repository`] - The product data source contract
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use habemus_core::{CartCalculator, CartItem, CustomerType, Money, Product};
//! use std::sync::Arc;
//!
//! let blonde = Arc::new(
//!     Product::new(1, "LATA BAUM BLONDE 473 CC", Money::from_cents(264507), Money::from_cents(176338))
//!         .unwrap(),
//! );
//! let items = vec![CartItem::new(blonde, 2).unwrap()];
//!
//! let calculation = CartCalculator::new().calculate_cart(items, CustomerType::Retailer);
//! assert_eq!(calculation.total().format_amount(), "3526.76");
//! assert_eq!(calculation.item_count(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod repository;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartCalculator, CartItem, SalesCalculation};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use repository::ProductRepository;
pub use types::{CustomerType, Product, ProductId};
