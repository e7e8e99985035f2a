//! # Product Repository Contract
//!
//! The asynchronous data source the view model loads the catalog from.
//!
//! ```text
//! SalesViewModel::load_products()
//!       │
//!       │  repo.get_all_products().await
//!       ▼
//! impl ProductRepository
//! ├── SqliteProductRepository    (habemus-db, file or :memory:)
//! ├── InMemoryProductRepository  (habemus-db, fixed list)
//! └── scripted fakes             (tests)
//! ```
//!
//! Implementations decide their own error type; the view model only needs
//! its `Display` text.

use std::future::Future;

use crate::types::{Product, ProductId};

/// Supplies products asynchronously.
///
/// Both operations may fail for any implementation-defined reason (I/O,
/// decoding, network). They never partially succeed.
pub trait ProductRepository: Send + Sync {
    /// Failure type surfaced to the caller.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the full catalog in the data source's natural order.
    fn get_all_products(&self) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send;

    /// Looks up a single product; `Ok(None)` when the id is unknown.
    fn get_product_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_products;

    #[derive(Debug, thiserror::Error)]
    #[error("offline")]
    struct Offline;

    struct FixedRepository(Vec<Product>);

    impl ProductRepository for FixedRepository {
        type Error = Offline;

        async fn get_all_products(&self) -> Result<Vec<Product>, Offline> {
            Ok(self.0.clone())
        }

        async fn get_product_by_id(&self, id: ProductId) -> Result<Option<Product>, Offline> {
            Ok(self.0.iter().find(|p| p.id() == id).cloned())
        }
    }

    struct OfflineRepository;

    impl ProductRepository for OfflineRepository {
        type Error = Offline;

        async fn get_all_products(&self) -> Result<Vec<Product>, Offline> {
            Err(Offline)
        }

        async fn get_product_by_id(&self, _id: ProductId) -> Result<Option<Product>, Offline> {
            Err(Offline)
        }
    }

    #[tokio::test]
    async fn test_fixed_repository() {
        let repo = FixedRepository(seed_products());

        assert_eq!(repo.get_all_products().await.unwrap().len(), 13);
        let found = repo.get_product_by_id(9).await.unwrap().unwrap();
        assert_eq!(found.name(), "LATA BAUM APA 473 CC");
        assert!(repo.get_product_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failure_exposes_display_text() {
        let err = OfflineRepository.get_all_products().await.unwrap_err();
        assert_eq!(err.to_string(), "offline");
    }
}
