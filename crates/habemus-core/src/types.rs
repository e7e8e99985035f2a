//! # Domain Types
//!
//! Core domain types used throughout Habemus Sales.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │        Product           │        │      CustomerType        │      │
//! │  │  ──────────────────────  │        │  ──────────────────────  │      │
//! │  │  id (i64, catalog-wide)  │◄───────│  ConsumerFinal           │      │
//! │  │  name                    │ price()│  Retailer  (default)     │      │
//! │  │  price_consumer_final    │        └──────────────────────────┘      │
//! │  │  price_retail            │                                          │
//! │  └──────────────────────────┘                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are built by the data source and never mutated afterwards; the
//! catalog and every cart line share the same `Arc<Product>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::validate_price_cents;

/// Catalog-wide product identifier.
pub type ProductId = i64;

// =============================================================================
// Customer Type
// =============================================================================

/// Pricing tier selector.
///
/// ## Price Selection
/// ```text
/// ConsumerFinal ("Consumidor Final") ──► product.price_consumer_final
/// Retailer      ("Comercio")         ──► product.price_retail
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    /// End consumer buying for themselves.
    ConsumerFinal,
    /// Reseller buying for a shop.
    #[default]
    Retailer,
}

impl CustomerType {
    /// Both tiers, in display order.
    pub const ALL: [CustomerType; 2] = [CustomerType::ConsumerFinal, CustomerType::Retailer];

    /// Label printed next to the tier selector.
    pub fn label(&self) -> &'static str {
        match self {
            CustomerType::ConsumerFinal => "Consumidor Final",
            CustomerType::Retailer => "Comercio",
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerType::ConsumerFinal => write!(f, "consumer_final"),
            CustomerType::Retailer => write!(f, "retailer"),
        }
    }
}

/// Error returned when a customer type string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown customer type: '{0}'. Valid options: consumer_final, retailer")]
pub struct ParseCustomerTypeError(pub String);

impl FromStr for CustomerType {
    type Err = ParseCustomerTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "consumer_final" | "consumidor_final" | "consumer" => Ok(CustomerType::ConsumerFinal),
            "retailer" | "comercio" | "retail" => Ok(CustomerType::Retailer),
            other => Err(ParseCustomerTypeError(other.to_string())),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale, with one price per customer type.
///
/// Serialize-only: products are built through [`Product::new`] so the price
/// invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    price_consumer_final: Money,
    price_retail: Money,
}

impl Product {
    /// Creates a product.
    ///
    /// ## Returns
    /// * `Err(CoreError::InvalidArgument)` - either price is negative
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price_consumer_final: Money,
        price_retail: Money,
    ) -> CoreResult<Self> {
        validate_price_cents("price_consumer_final", price_consumer_final.cents())?;
        validate_price_cents("price_retail", price_retail.cents())?;

        Ok(Product {
            id,
            name: name.into(),
            price_consumer_final,
            price_retail,
        })
    }

    /// Infallible constructor for built-in tables: unsigned cents cannot
    /// break the price invariant.
    pub(crate) fn from_unsigned_cents(
        id: ProductId,
        name: &str,
        consumer_final_cents: u32,
        retail_cents: u32,
    ) -> Self {
        Product {
            id,
            name: name.to_string(),
            price_consumer_final: Money::from_cents(i64::from(consumer_final_cents)),
            price_retail: Money::from_cents(i64::from(retail_cents)),
        }
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price_consumer_final(&self) -> Money {
        self.price_consumer_final
    }

    #[inline]
    pub fn price_retail(&self) -> Money {
        self.price_retail
    }

    /// Returns the unit price for a customer type.
    ///
    /// Every price shown anywhere in the application derives from here.
    pub fn price(&self, customer_type: CustomerType) -> Money {
        match customer_type {
            CustomerType::ConsumerFinal => self.price_consumer_final,
            CustomerType::Retailer => self.price_retail,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
