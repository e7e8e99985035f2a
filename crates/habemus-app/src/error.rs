//! # Application Error Type
//!
//! Failures that can stop the sales screen from starting.
//!
//! ```text
//! initialize(config)
//!   ├── AppConfig::load     ──► Io / ConfigParse / Config
//!   ├── Database::new       ──► Database(DbError)
//!   └── ensure_seeded       ──► Database(DbError)
//! ```
//!
//! Catalog load failures after startup are not errors at this level: they
//! end up in `SalesUiState::error`.

use habemus_db::DbError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading the config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for `AppConfig`.
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Opening, migrating or seeding the product database failed.
    #[error(transparent)]
    Database(#[from] DbError),
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        AppError::Config(message.into())
    }
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
