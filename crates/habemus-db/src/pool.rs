//! # Catalog Database
//!
//! Opening the SQLite catalog and keeping it populated.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Database Startup                           │
//! │                                                                         │
//! │  DbConfig::new(path)          DbConfig::in_memory()                    │
//! │  (WAL file, created if        (one private connection,                 │
//! │   missing)                     gone when the pool closes)              │
//! │            └──────────────┬──────────────┘                             │
//! │                           ▼                                             │
//! │  Database::new(config) ── open pool ── apply embedded migrations       │
//! │                           │                                             │
//! │                           ▼                                             │
//! │  ensure_seeded() ──────── reference catalog, only into an empty table  │
//! │                           │                                             │
//! │                           ▼                                             │
//! │  products() ───────────── SqliteProductRepository over the same pool   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use habemus_core::catalog::seed_products;

use crate::error::{DbError, DbResult};
use crate::migrations::{self, MigrationStatus};
use crate::repository::product::{insert_product, SqliteProductRepository};

// =============================================================================
// Configuration
// =============================================================================

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// A database file.
    File(PathBuf),
    /// A private in-memory database.
    Memory,
}

impl DbLocation {
    /// Maps the conventional `:memory:` path to [`DbLocation::Memory`].
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path == Path::new(":memory:") {
            DbLocation::Memory
        } else {
            DbLocation::File(path)
        }
    }
}

/// How to open the catalog database.
///
/// ## Example
/// ```rust
/// use habemus_db::{DbConfig, DbLocation};
///
/// let config = DbConfig::new("/var/lib/habemus/catalog.db").max_connections(2);
/// assert_eq!(config.max_connections, 2);
///
/// assert_eq!(DbConfig::new(":memory:").location, DbLocation::Memory);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: DbLocation,

    /// Pool size for file databases. In-memory databases always use one
    /// connection so every query sees the same data.
    pub max_connections: u32,

    /// How long a query waits for a free connection.
    pub acquire_timeout: Duration,

    /// Apply embedded migrations while opening. On by default.
    pub run_migrations: bool,
}

impl DbConfig {
    /// File database at `path` (`:memory:` selects an in-memory one).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: DbLocation::from_path(path),
            max_connections: 4,
            acquire_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    /// Throwaway in-memory database, mainly for tests and demos.
    pub fn in_memory() -> Self {
        DbConfig {
            location: DbLocation::Memory,
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.location == DbLocation::Memory
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        match &self.location {
            DbLocation::Memory => SqliteConnectOptions::new().in_memory(true),
            DbLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                // Seeder and app may read the same file concurrently
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
        }
    }

    fn pool_size(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            self.max_connections.max(1)
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle on the catalog database. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, brings the schema up to date.
    ///
    /// ## Returns
    /// * `Err(DbError::ConnectionFailed)` - the file could not be opened or created
    /// * `Err(DbError::MigrationFailed)` - the schema could not be applied
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(location = ?config.location, "Opening catalog database");

        let pool_size = config.pool_size();
        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .acquire_timeout(config.acquire_timeout)
            // An in-memory database dies with its last connection
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(pool_size, "Catalog pool ready");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Safe to call repeatedly.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Embedded versus applied migrations.
    pub async fn migration_status(&self) -> DbResult<MigrationStatus> {
        migrations::migration_status(&self.pool).await
    }

    /// Underlying pool, for queries no repository covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repository over the `products` table.
    pub fn products(&self) -> SqliteProductRepository {
        SqliteProductRepository::new(self.pool.clone())
    }

    /// Inserts the reference catalog when the products table is empty.
    ///
    /// Count and inserts share one transaction, so a concurrent seeder
    /// either sees the full catalog or none of it.
    ///
    /// ## Returns
    /// Number of products inserted; 0 when the table already had rows.
    pub async fn ensure_seeded(&self) -> DbResult<usize> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            debug!(existing, "Catalog already present, skipping seed");
            tx.rollback().await?;
            return Ok(0);
        }

        let products = seed_products();
        for product in &products {
            insert_product(&mut *tx, product).await?;
        }
        tx.commit().await?;

        info!(count = products.len(), "Seeded product catalog");
        Ok(products.len())
    }

    /// Closes the pool; later repository calls fail with `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing catalog database");
        self.pool.close().await;
    }

    /// True when a trivial query succeeds.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
