//! # Order Summary
//!
//! Plain-text rendering of a cart, ready to paste into a chat message.
//!
//! ```text
//! BLONDE: $1763.38 × 2 = $3526.76
//! OLD ALE: $2140.22 × 1 = $2140.22
//!
//! Total: $5666.98
//! ```
//!
//! Lines with a zero quantity are skipped; when nothing is left the summary
//! is [`EMPTY_CART`].

use crate::cart::{CartItem, SalesCalculation};

/// Text shared when the cart has nothing in it.
pub const EMPTY_CART: &str = "Carrito vacío";

const NAME_PREFIX: &str = "LATA BAUM ";
const NAME_SUFFIX: &str = " 473 CC";

/// Drops the brand prefix and the can size from a catalog name.
///
/// ```rust
/// use habemus_core::summary::short_name;
///
/// assert_eq!(short_name("LATA BAUM OLD ALE 473 CC"), "OLD ALE");
/// assert_eq!(short_name("Agua"), "Agua");
/// ```
pub fn short_name(name: &str) -> String {
    name.replace(NAME_PREFIX, "").replace(NAME_SUFFIX, "")
}

/// Renders the calculation as shareable text.
///
/// Items are listed by product name so the output does not depend on the
/// order the cart was filled in.
pub fn order_summary(calculation: &SalesCalculation) -> String {
    let customer_type = calculation.customer_type();

    let mut items: Vec<&CartItem> = calculation
        .items()
        .iter()
        .filter(|item| item.quantity() > 0)
        .collect();
    if items.is_empty() {
        return EMPTY_CART.to_string();
    }
    items.sort_by(|a, b| a.product().name().cmp(b.product().name()));

    let mut lines: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "{}: {} × {} = {}",
                short_name(item.product().name()),
                item.unit_price(customer_type),
                item.quantity(),
                item.subtotal(customer_type)
            )
        })
        .collect();

    lines.push(String::new());
    lines.push(format!("Total: {}", calculation.total()));
    lines.join("\n")
}
