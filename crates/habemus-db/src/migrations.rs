//! # Schema Migrations
//!
//! The catalog schema ships inside the binary; `sqlx::migrate!` embeds every
//! file under `migrations/sqlite/` at compile time.
//!
//! ```text
//! migrations/sqlite/
//!   001_create_products.sql    products(id, name, price_consumer_final_cents,
//!                                       price_retail_cents)
//!
//! Database::new ──► run_migrations ──► _sqlx_migrations bookkeeping
//!                                      (version + checksum per applied file)
//! ```
//!
//! Applied files are checksummed, so editing one after release makes the
//! next open fail with `MigrationFailed`. Schema changes go in a new
//! `NNN_*.sql` file.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Embedded versus applied migration counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    pub embedded: usize,
    pub applied: usize,
}

impl MigrationStatus {
    /// Nothing left to apply.
    pub fn is_current(&self) -> bool {
        self.applied >= self.embedded
    }

    pub fn pending(&self) -> usize {
        self.embedded.saturating_sub(self.applied)
    }
}

/// Applies whatever the database has not seen yet.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    let before = migration_status(pool).await?;

    // Runs even when nothing is pending so checksums are still verified
    MIGRATOR.run(pool).await?;

    if before.is_current() {
        debug!(applied = before.applied, "Catalog schema up to date");
    } else {
        info!(applied = before.pending(), "Applied catalog schema migrations");
    }
    Ok(())
}

pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let table_exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    let applied: i64 = if table_exists == 0 {
        0
    } else {
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?
    };

    Ok(MigrationStatus {
        embedded: MIGRATOR.migrations.len(),
        applied: usize::try_from(applied).unwrap_or(0),
    })
}
