//! # Seed Catalog
//!
//! The reference product list: thirteen 473 cc cans, each with a
//! consumer-final and a retail price.
//!
//! Used to populate an empty SQLite database and as the default contents of
//! the in-memory repository.

use crate::types::{Product, ProductId};

/// (id, name, consumer-final cents, retail cents)
const SEED: [(ProductId, &str, u32, u32); 13] = [
    (1, "LATA BAUM BLONDE 473 CC", 264507, 176338),
    (2, "LATA BAUM SCOTTISH 473 CC", 269797, 179864),
    (3, "LATA BAUM PORTER 473 CC", 280527, 187018),
    (4, "LATA BAUM HONEY 473 CC", 280527, 187018),
    (5, "LATA BAUM IRON ALE 473 CC", 280527, 187018),
    (6, "LATA BAUM OLD ALE 473 CC", 321033, 214022),
    (7, "LATA BAUM GLADSTONE 473 CC", 321033, 214022),
    (8, "LATA BAUM FUCK IPA 473 CC", 397575, 265050),
    (9, "LATA BAUM APA 473 CC", 350433, 233622),
    (10, "LATA BAUM CALIFORNIA 473 CC", 468431, 312287),
    (11, "LATA BAUM ALGEBRA GIN TONIC 473 CC", 377862, 251908),
    (12, "LATA BAUM LEMON 473 CC", 269797, 179864),
    (13, "LATA BAUM LAGER DORADA 473 CC", 184980, 123320),
];

/// Number of products in the seed catalog.
pub const SEED_PRODUCT_COUNT: usize = SEED.len();

/// Builds the seed catalog, ordered by id.
pub fn seed_products() -> Vec<Product> {
    SEED.iter()
        .map(|&(id, name, consumer_final, retail)| {
            Product::from_unsigned_cents(id, name, consumer_final, retail)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::CustomerType;

    #[test]
    fn test_seed_has_thirteen_products_in_id_order() {
        let products = seed_products();
        assert_eq!(products.len(), SEED_PRODUCT_COUNT);
        assert_eq!(products.len(), 13);

        let ids: Vec<_> = products.iter().map(Product::id).collect();
        assert_eq!(ids, (1..=13).collect::<Vec<_>>());
    }

    #[test]
    fn test_every_seed_row_becomes_a_product() {
        let products = seed_products();
        assert_eq!(products.len(), SEED.len());

        for (product, &(id, name, consumer_final, retail)) in products.iter().zip(SEED.iter()) {
            assert_eq!(product.id(), id);
            assert_eq!(product.name(), name);
            assert_eq!(product.price_consumer_final().cents(), i64::from(consumer_final));
            assert_eq!(product.price_retail().cents(), i64::from(retail));

            // Same result as the validating constructor.
            let validated = Product::new(
                id,
                name,
                product.price_consumer_final(),
                product.price_retail(),
            )
            .unwrap();
            assert_eq!(&validated, product);
        }
    }

    #[test]
    fn test_seed_prices() {
        let products = seed_products();

        let blonde = &products[0];
        assert_eq!(blonde.name(), "LATA BAUM BLONDE 473 CC");
        assert_eq!(blonde.price(CustomerType::ConsumerFinal).format_amount(), "2645.07");
        assert_eq!(blonde.price(CustomerType::Retailer).format_amount(), "1763.38");

        let old_ale = &products[5];
        assert_eq!(old_ale.id(), 6);
        assert_eq!(old_ale.price_retail().format_amount(), "2140.22");

        let lager = &products[12];
        assert_eq!(lager.price_consumer_final().format_amount(), "1849.80");
        assert_eq!(lager.price_retail().format_amount(), "1233.20");
    }

    #[test]
    fn test_retail_is_cheaper_than_consumer_final() {
        for product in seed_products() {
            assert!(product.price_retail() < product.price_consumer_final(), "{}", product.name());
        }
    }

    #[test]
    fn test_seed_matches_decimal_list_prices() {
        let products = seed_products();
        assert_eq!(products[7].price_consumer_final(), Money::from_decimal(3975.75));
        assert_eq!(products[10].price_retail(), Money::from_decimal(2519.08));
    }
}
