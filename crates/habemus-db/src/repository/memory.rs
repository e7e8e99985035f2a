//! # In-Memory Product Repository
//!
//! A fixed catalog held in memory. The default instance serves the seed
//! catalog, which is what the web build runs against.

use std::sync::Arc;

use tracing::debug;

use habemus_core::catalog::seed_products;
use habemus_core::{Product, ProductId, ProductRepository};

use crate::error::DbError;

/// Repository over a fixed list of products.
///
/// Clones share the list.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<[Product]>,
}

impl InMemoryProductRepository {
    /// Creates a repository serving exactly `products`, in the given order.
    pub fn new(products: Vec<Product>) -> Self {
        InMemoryProductRepository {
            products: products.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        InMemoryProductRepository::new(seed_products())
    }
}

impl ProductRepository for InMemoryProductRepository {
    type Error = DbError;

    async fn get_all_products(&self) -> Result<Vec<Product>, DbError> {
        debug!(count = self.products.len(), "Serving in-memory catalog");
        Ok(self.products.to_vec())
    }

    async fn get_product_by_id(&self, id: ProductId) -> Result<Option<Product>, DbError> {
        Ok(self.products.iter().find(|p| p.id() == id).cloned())
    }
}
