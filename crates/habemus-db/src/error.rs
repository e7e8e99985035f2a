//! # Catalog Storage Errors
//!
//! `DbError` is the `ProductRepository::Error` of both product sources.
//! Its Display text is what a failed load shows in `SalesUiState.error`,
//! so messages are written for the person at the till.
//!
//! ```text
//! sqlx::Error ─────────┐
//! MigrateError ────────┼──► DbError ──► load_products(): error string
//! CoreError (bad row) ─┘            └─► initialize():    AppError::Database
//! ```

use habemus_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A product id was inserted twice.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// The catalog file could not be opened, or the pool was closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement (missing table, CHECK constraint, ...).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Stored row violates a product invariant, e.g. a negative price
    /// written by some other tool.
    #[error("Invalid product row {id}: {source}")]
    InvalidRow {
        id: i64,
        #[source]
        source: CoreError,
    },

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// ```text
/// RowNotFound                        → NotFound
/// Database("UNIQUE constraint ...")  → UniqueViolation (value filled in by caller)
/// Database(other)                    → QueryFailed
/// PoolTimedOut                       → PoolExhausted
/// PoolClosed                         → ConnectionFailed
/// anything else                      → Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        const UNIQUE_PREFIX: &str = "UNIQUE constraint failed: ";

        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),
            sqlx::Error::Database(db_err) => match db_err.message().strip_prefix(UNIQUE_PREFIX) {
                Some(column) => DbError::duplicate(column, "unknown"),
                None => DbError::QueryFailed(db_err.message().to_string()),
            },
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => {
                DbError::ConnectionFailed("catalog database is closed".to_string())
            }
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use habemus_core::ValidationError;

    #[test]
    fn test_helpers() {
        let err = DbError::not_found("Product", "42");
        assert_eq!(err.to_string(), "Product not found: 42");

        let err = DbError::duplicate("products.id", "7");
        assert_eq!(err.to_string(), "Duplicate products.id: '7' already exists");
    }

    #[test]
    fn test_sqlx_mapping() {
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_invalid_row_message() {
        let err = DbError::InvalidRow {
            id: 3,
            source: ValidationError::NegativePrice {
                field: "price_retail".to_string(),
            }
            .into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid product row 3: price_retail must be non-negative"
        );
    }
}
