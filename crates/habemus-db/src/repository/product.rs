//! # SQLite Product Repository
//!
//! Reads and writes the `products` table.
//!
//! ## Row Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products                                  habemus_core::Product        │
//! │  ──────────────────────────────────        ───────────────────────────  │
//! │  id                          INTEGER  ───► id                           │
//! │  name                        TEXT     ───► name                         │
//! │  price_consumer_final_cents  INTEGER  ───► price_consumer_final (Money) │
//! │  price_retail_cents          INTEGER  ───► price_retail (Money)         │
//! │                                                                         │
//! │  Rows go through Product::new, so a negative price stored by some      │
//! │  other tool comes back as DbError::InvalidRow instead of a Product.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use habemus_core::{Money, Product, ProductId, ProductRepository};

use crate::error::{DbError, DbResult};

/// Raw `products` row.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price_consumer_final_cents: i64,
    price_retail_cents: i64,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> DbResult<Self> {
        let id = row.id;
        Product::new(
            id,
            row.name,
            Money::from_cents(row.price_consumer_final_cents),
            Money::from_cents(row.price_retail_cents),
        )
        .map_err(|source| DbError::InvalidRow { id, source })
    }
}

/// Inserts one product with any executor (pool, connection, transaction).
pub(crate) async fn insert_product<'e, E>(executor: E, product: &Product) -> DbResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO products (id, name, price_consumer_final_cents, price_retail_cents)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(product.id())
    .bind(product.name())
    .bind(product.price_consumer_final().cents())
    .bind(product.price_retail().cents())
    .execute(executor)
    .await
    .map_err(|e| match DbError::from(e) {
        DbError::UniqueViolation { field, .. } => DbError::duplicate(field, product.id().to_string()),
        other => other,
    })?;

    Ok(())
}

/// Repository over the `products` table.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let catalog = repo.get_all().await?;
/// let blonde = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Creates a new repository on a pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteProductRepository { pool }
    }

    /// Returns every product ordered by id.
    pub async fn get_all(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, price_consumer_final_cents, price_retail_cents
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded products");
        rows.into_iter().map(Product::try_from).collect()
    }

    /// Gets a product by id; `Ok(None)` when it does not exist.
    pub async fn get_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        debug!(id, "Getting product by ID");

        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, price_consumer_final_cents, price_retail_cents
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - the id is taken
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id(), name = %product.name(), "Inserting product");
        insert_product(&self.pool, product).await
    }

    /// Counts stored products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

impl ProductRepository for SqliteProductRepository {
    type Error = DbError;

    async fn get_all_products(&self) -> DbResult<Vec<Product>> {
        self.get_all().await
    }

    async fn get_product_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        self.get_by_id(id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
