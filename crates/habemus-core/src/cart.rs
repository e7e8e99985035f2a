//! # Cart Math
//!
//! Cart lines and the aggregate computed over them.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Calculation                                   │
//! │                                                                         │
//! │  cart (id → qty) + catalog                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<CartItem>         (product, quantity ≥ 0)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartCalculator::calculate_cart(items, customer_type)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SalesCalculation                                                       │
//! │    subtotal   = Σ product.price(customer_type) × quantity               │
//! │    total      = subtotal            (no tax / discount layer)           │
//! │    item_count = Σ quantity                                              │
//! │                                                                         │
//! │  Quantities are not capped, so every sum saturates at i64::MAX.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{CustomerType, Product};
use crate::validation::validate_quantity;

// =============================================================================
// Cart Item
// =============================================================================

/// A product paired with a quantity.
///
/// Built on demand from the cart map and the catalog; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    product: Arc<Product>,
    quantity: i64,
}

impl CartItem {
    /// Creates a cart line.
    ///
    /// ## Returns
    /// * `Err(CoreError::InvalidArgument)` - quantity is negative
    ///
    /// ## Example
    /// ```rust
    /// use habemus_core::{CartItem, Money, Product};
    /// use std::sync::Arc;
    ///
    /// let product = Arc::new(Product::new(1, "LATA", Money::from_cents(100), Money::from_cents(80)).unwrap());
    /// assert!(CartItem::new(product.clone(), 0).is_ok());
    /// assert!(CartItem::new(product, -1).is_err());
    /// ```
    pub fn new(product: Arc<Product>, quantity: i64) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        Ok(CartItem { product, quantity })
    }

    #[inline]
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price for the given tier.
    #[inline]
    pub fn unit_price(&self, customer_type: CustomerType) -> Money {
        self.product.price(customer_type)
    }

    /// Line total: unit price × quantity.
    pub fn subtotal(&self, customer_type: CustomerType) -> Money {
        self.unit_price(customer_type).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sales Calculation
// =============================================================================

/// Aggregate over a set of cart lines for one customer type.
///
/// Pure function of its inputs; recomputed whenever it is needed. Line
/// order does not affect any result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesCalculation {
    items: Vec<CartItem>,
    customer_type: CustomerType,
}

impl SalesCalculation {
    pub fn new(items: Vec<CartItem>, customer_type: CustomerType) -> Self {
        SalesCalculation {
            items,
            customer_type,
        }
    }

    #[inline]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[inline]
    pub fn customer_type(&self) -> CustomerType {
        self.customer_type
    }

    /// Sum of every line total.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .map(|item| item.subtotal(self.customer_type))
            .sum()
    }

    /// Same as the subtotal: no taxes or discounts are modeled.
    pub fn total(&self) -> Money {
        self.subtotal()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, item| count.saturating_add(item.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

// =============================================================================
// Cart Calculator
// =============================================================================

/// Stateless factory for [`SalesCalculation`].
///
/// Kept as a seam so pricing can be tested and swapped independently of the
/// view-state plumbing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartCalculator;

impl CartCalculator {
    pub fn new() -> Self {
        CartCalculator
    }

    pub fn calculate_cart(
        &self,
        items: Vec<CartItem>,
        customer_type: CustomerType,
    ) -> SalesCalculation {
        SalesCalculation::new(items, customer_type)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    fn product(id: i64, consumer_final_cents: i64, retail_cents: i64) -> Arc<Product> {
        Arc::new(
            Product::new(
                id,
                format!("LATA {}", id),
                Money::from_cents(consumer_final_cents),
                Money::from_cents(retail_cents),
            )
            .unwrap(),
        )
    }

    fn blonde() -> Arc<Product> {
        product(1, 264507, 176338)
    }

    fn scottish() -> Arc<Product> {
        product(2, 269797, 179864)
    }

    #[test]
    fn test_subtotal_consumer_final() {
        let item = CartItem::new(blonde(), 2).unwrap();
        assert_eq!(item.subtotal(CustomerType::ConsumerFinal).format_amount(), "5290.14");
    }

    #[test]
    fn test_subtotal_retail() {
        let item = CartItem::new(blonde(), 3).unwrap();
        assert_eq!(item.subtotal(CustomerType::Retailer).format_amount(), "5290.14");
    }

    #[test]
    fn test_negative_quantity_is_invalid_argument() {
        let err = CartItem::new(blonde(), -1).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidArgument(ValidationError::NegativeQuantity { quantity: -1 })
        );
        assert_eq!(err.to_string(), "Quantity must be non-negative");
    }

    #[test]
    fn test_zero_and_positive_quantities_accepted() {
        let zero = CartItem::new(blonde(), 0).unwrap();
        assert!(zero.subtotal(CustomerType::Retailer).is_zero());
        assert!(CartItem::new(blonde(), 1).is_ok());
        assert!(CartItem::new(blonde(), 999).is_ok());
    }

    #[test]
    fn test_empty_cart() {
        let calculation = CartCalculator::new().calculate_cart(Vec::new(), CustomerType::ConsumerFinal);
        assert!(calculation.total().is_zero());
        assert!(calculation.subtotal().is_zero());
        assert_eq!(calculation.item_count(), 0);
        assert!(calculation.is_empty());
    }

    #[test]
    fn test_single_item() {
        let items = vec![CartItem::new(blonde(), 1).unwrap()];
        let calculation = CartCalculator::new().calculate_cart(items, CustomerType::ConsumerFinal);
        assert_eq!(calculation.total(), Money::from_cents(264507));
        assert_eq!(calculation.item_count(), 1);
    }

    #[test]
    fn test_customer_type_selects_tier() {
        let items = vec![CartItem::new(blonde(), 1).unwrap()];
        let calculator = CartCalculator::new();

        let consumer = calculator.calculate_cart(items.clone(), CustomerType::ConsumerFinal);
        let retail = calculator.calculate_cart(items, CustomerType::Retailer);

        assert_eq!(consumer.total().format_amount(), "2645.07");
        assert_eq!(retail.total().format_amount(), "1763.38");
    }

    #[test]
    fn test_multiple_items() {
        let items = vec![
            CartItem::new(blonde(), 2).unwrap(),
            CartItem::new(scottish(), 1).unwrap(),
        ];

        let consumer = SalesCalculation::new(items.clone(), CustomerType::ConsumerFinal);
        assert_eq!(consumer.total(), Money::from_cents(264507 * 2 + 269797));
        assert_eq!(consumer.item_count(), 3);

        let retail = SalesCalculation::new(items, CustomerType::Retailer);
        assert_eq!(retail.total(), Money::from_cents(176338 * 2 + 179864));
        assert_eq!(retail.item_count(), 3);
    }

    #[test]
    fn test_total_is_sum_of_line_subtotals() {
        let items = vec![
            CartItem::new(product(5, 280527, 187018), 4).unwrap(),
            CartItem::new(product(6, 321033, 214022), 0).unwrap(),
            CartItem::new(product(13, 184980, 123320), 7).unwrap(),
        ];

        for customer_type in CustomerType::ALL {
            let calculation = SalesCalculation::new(items.clone(), customer_type);
            let expected: Money = items.iter().map(|i| i.subtotal(customer_type)).sum();
            assert_eq!(calculation.total(), expected);
            assert_eq!(calculation.subtotal(), calculation.total());
            assert_eq!(calculation.item_count(), 11);
        }
    }

    #[test]
    fn test_oversized_quantities_saturate() {
        let items = vec![
            CartItem::new(blonde(), i64::MAX).unwrap(),
            CartItem::new(scottish(), i64::MAX).unwrap(),
        ];
        let calculation = CartCalculator::new().calculate_cart(items, CustomerType::Retailer);

        assert_eq!(calculation.item_count(), i64::MAX);
        assert_eq!(calculation.total(), Money::from_cents(i64::MAX));
        assert!(!calculation.is_empty());

        let half = CartItem::new(blonde(), i64::MAX / 2).unwrap();
        assert_eq!(half.subtotal(CustomerType::ConsumerFinal), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_line_order_does_not_matter() {
        let a = CartItem::new(blonde(), 2).unwrap();
        let b = CartItem::new(scottish(), 5).unwrap();

        let forward = SalesCalculation::new(vec![a.clone(), b.clone()], CustomerType::Retailer);
        let backward = SalesCalculation::new(vec![b, a], CustomerType::Retailer);
        assert_eq!(forward.total(), backward.total());
        assert_eq!(forward.item_count(), backward.item_count());
    }
}
