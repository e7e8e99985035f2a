//! # Sales UI State
//!
//! One immutable snapshot of everything the sales screen draws.
//!
//! ## Snapshot Contents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SalesUiState                                     │
//! │                                                                         │
//! │  products       Vec<Arc<Product>>     catalog, in source order         │
//! │  cart_items     BTreeMap<id, qty>     qty > 0 only; absent = zero      │
//! │  customer_type  CustomerType          Retailer by default              │
//! │  is_loading     bool                  a catalog load is in flight      │
//! │  error          Option<String>        last load failure                │
//! │                                                                         │
//! │  derived:                                                               │
//! │  cart_items_list ── join cart_items × products (unknown ids dropped)   │
//! │  calculation ────── CartCalculator over cart_items_list                │
//! │  subtotal / total / item_count                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions never mutate: each returns a new snapshot built from the
//! current one, which the view model swaps in whole.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use habemus_core::{CartCalculator, CartItem, CustomerType, Money, Product, ProductId, SalesCalculation};

/// Snapshot of the sales screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesUiState {
    products: Vec<Arc<Product>>,
    cart_items: BTreeMap<ProductId, i64>,
    customer_type: CustomerType,
    is_loading: bool,
    error: Option<String>,
}

impl SalesUiState {
    /// Empty catalog, empty cart, the given tier, not loading.
    pub fn new(customer_type: CustomerType) -> Self {
        SalesUiState {
            customer_type,
            ..Default::default()
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn cart_items(&self) -> &BTreeMap<ProductId, i64> {
        &self.cart_items
    }

    pub fn customer_type(&self) -> CustomerType {
        self.customer_type
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Quantity in the cart for `product_id`; zero when absent.
    pub fn quantity_of(&self, product_id: ProductId) -> i64 {
        self.cart_items.get(&product_id).copied().unwrap_or(0)
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// Cart entries joined with the catalog, in product-id order.
    ///
    /// Entries whose id is not in the current catalog are skipped: the cart
    /// may briefly reference products a reload has removed.
    pub fn cart_items_list(&self) -> Vec<CartItem> {
        self.cart_items
            .iter()
            .filter_map(|(id, &quantity)| {
                let product = self.products.iter().find(|p| p.id() == *id)?;
                CartItem::new(Arc::clone(product), quantity).ok()
            })
            .collect()
    }

    pub fn calculation(&self) -> SalesCalculation {
        CartCalculator::new().calculate_cart(self.cart_items_list(), self.customer_type)
    }

    pub fn subtotal(&self) -> Money {
        self.calculation().subtotal()
    }

    pub fn total(&self) -> Money {
        self.calculation().total()
    }

    pub fn item_count(&self) -> i64 {
        self.calculation().item_count()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Absolute set: `quantity <= 0` removes the entry, anything else
    /// overwrites it. The id is not checked against the catalog.
    pub fn with_quantity(&self, product_id: ProductId, quantity: i64) -> Self {
        let mut next = self.clone();
        if quantity <= 0 {
            next.cart_items.remove(&product_id);
        } else {
            next.cart_items.insert(product_id, quantity);
        }
        next
    }

    pub fn with_customer_type(&self, customer_type: CustomerType) -> Self {
        SalesUiState {
            customer_type,
            ..self.clone()
        }
    }

    pub fn cleared_cart(&self) -> Self {
        SalesUiState {
            cart_items: BTreeMap::new(),
            ..self.clone()
        }
    }

    /// Start of a load. A previous error stays visible until it resolves.
    pub fn loading(&self) -> Self {
        SalesUiState {
            is_loading: true,
            ..self.clone()
        }
    }

    /// Successful load: new catalog, error cleared. Cart and tier are kept.
    pub fn loaded(&self, products: Vec<Arc<Product>>) -> Self {
        SalesUiState {
            products,
            is_loading: false,
            error: None,
            ..self.clone()
        }
    }

    /// Load dropped before it resolved: only the flag changes.
    pub fn load_abandoned(&self) -> Self {
        SalesUiState {
            is_loading: false,
            ..self.clone()
        }
    }

    /// Failed load: catalog kept as it was.
    pub fn failed(&self, message: impl Into<String>) -> Self {
        SalesUiState {
            is_loading: false,
            error: Some(message.into()),
            ..self.clone()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
