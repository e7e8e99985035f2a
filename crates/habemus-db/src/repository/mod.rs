//! # Repository Module
//!
//! Product data sources behind the `ProductRepository` contract.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Sources                                      │
//! │                                                                         │
//! │  SalesViewModel<ProductSource>                                         │
//! │       │                                                                 │
//! │       │  get_all_products().await                                      │
//! │       ▼                                                                 │
//! │  ProductSource  (picked by [catalog] source = "sqlite" | "memory")     │
//! │  ├── Sqlite(SqliteProductRepository) ──► products table                │
//! │  └── Memory(InMemoryProductRepository) ──► fixed Vec<Product>          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SqliteProductRepository`](product::SqliteProductRepository) - `products` table
//! - [`InMemoryProductRepository`](memory::InMemoryProductRepository) - fixed list
//! - [`ProductSource`] - runtime switch between the two

pub mod memory;
pub mod product;

use habemus_core::{Product, ProductId, ProductRepository};

use crate::error::DbError;
use memory::InMemoryProductRepository;
use product::SqliteProductRepository;

/// The configured product source.
///
/// `ProductRepository` is not object safe, so the runtime choice is an enum.
#[derive(Debug, Clone)]
pub enum ProductSource {
    Sqlite(SqliteProductRepository),
    Memory(InMemoryProductRepository),
}

impl ProductSource {
    /// Short name used in logs and config (`sqlite` / `memory`).
    pub fn kind(&self) -> &'static str {
        match self {
            ProductSource::Sqlite(_) => "sqlite",
            ProductSource::Memory(_) => "memory",
        }
    }
}

impl From<SqliteProductRepository> for ProductSource {
    fn from(repo: SqliteProductRepository) -> Self {
        ProductSource::Sqlite(repo)
    }
}

impl From<InMemoryProductRepository> for ProductSource {
    fn from(repo: InMemoryProductRepository) -> Self {
        ProductSource::Memory(repo)
    }
}

impl ProductRepository for ProductSource {
    type Error = DbError;

    async fn get_all_products(&self) -> Result<Vec<Product>, DbError> {
        match self {
            ProductSource::Sqlite(repo) => repo.get_all_products().await,
            ProductSource::Memory(repo) => repo.get_all_products().await,
        }
    }

    async fn get_product_by_id(&self, id: ProductId) -> Result<Option<Product>, DbError> {
        match self {
            ProductSource::Sqlite(repo) => repo.get_product_by_id(id).await,
            ProductSource::Memory(repo) => repo.get_product_by_id(id).await,
        }
    }
}
