//! # habemus-app: Sales Screen State for Habemus Sales
//!
//! The layer a rendering surface (mobile or web) binds to: one
//! [`SalesViewModel`] holding the current [`SalesUiState`], plus the
//! configuration and logging needed to stand it up.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      initialize(config)                                 │
//! │                                                                         │
//! │  1. init_tracing(config.logging.filter)   (RUST_LOG wins, idempotent)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. open_product_source(config)                                        │
//! │       ├── sqlite: Database::new → migrations → ensure_seeded           │
//! │       └── memory: InMemoryProductRepository::default()                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. SalesViewModel::with_customer_type(source, default tier)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. load_products().await   (failure shows up as state.error)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use habemus_app::{initialize, AppConfig};
//!
//! let vm = initialize(AppConfig::load(None)?).await?;
//! vm.update_quantity(1, 2);
//! println!("{}", vm.ui_state().total());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod ui_state;
pub mod view_model;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{AppConfig, CatalogSource};
pub use error::{AppError, AppResult};
pub use ui_state::SalesUiState;
pub use view_model::SalesViewModel;

use tracing::info;
use tracing_subscriber::EnvFilter;

use habemus_db::{Database, DbConfig, DbLocation, InMemoryProductRepository, ProductSource};

/// Installs the global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Returns `false` when a
/// subscriber was already installed, which is not an error.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

/// Opens the product repository named by `config.catalog`.
///
/// For SQLite, the file's directory is created if needed, migrations run and
/// the reference catalog is inserted into an empty table.
pub async fn open_product_source(config: &AppConfig) -> AppResult<ProductSource> {
    match config.catalog.source {
        CatalogSource::Memory => Ok(InMemoryProductRepository::default().into()),
        CatalogSource::Sqlite => {
            let db_config = match DbLocation::from_path(config.database_path()?) {
                DbLocation::Memory => DbConfig::in_memory(),
                DbLocation::File(path) => {
                    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                        std::fs::create_dir_all(dir)?;
                    }
                    DbConfig::new(path)
                }
            };

            let db = Database::new(db_config).await?;
            db.ensure_seeded().await?;
            Ok(db.products().into())
        }
    }
}

/// Builds a ready-to-use view model and performs the first catalog load.
///
/// Errors cover startup only (config, database file). A failing first load
/// still returns the view model, with the message in `ui_state().error()`.
pub async fn initialize(config: AppConfig) -> AppResult<SalesViewModel<ProductSource>> {
    init_tracing(&config.logging.filter);

    let source = open_product_source(&config).await?;
    info!(
        source = source.kind(),
        customer_type = %config.sales.default_customer_type,
        "Initializing sales view model"
    );

    let view_model = SalesViewModel::with_customer_type(source, config.sales.default_customer_type);
    view_model.load_products().await;

    Ok(view_model)
}

// =============================================================================
// Unit Tests
// =============================================================================
