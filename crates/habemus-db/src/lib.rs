//! # habemus-db: Product Data Sources for Habemus Sales
//!
//! This crate implements the `ProductRepository` contract from
//! `habemus-core`: a SQLite-backed catalog (sqlx) and a fixed in-memory one.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Habemus Sales Data Flow                            │
//! │                                                                         │
//! │  SalesViewModel::load_products()                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   habemus-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐ │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │ │   │
//! │  │   │               │    │ SqliteProduct  │    │              │ │   │
//! │  │   │ SqlitePool    │◄───│ InMemoryProduct│    │ 001_create_  │ │   │
//! │  │   │ ensure_seeded │    │ ProductSource  │    │  products    │ │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (platform data dir) or :memory:                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - opening the catalog (file or in-memory) and seeding it
//! - [`migrations`] - embedded schema and its applied/pending status
//! - [`error`] - `DbError`, shared by both repositories
//! - [`repository`] - SQLite, in-memory and the `ProductSource` switch
//!
//! ## Usage
//!
//! ```rust,ignore
//! use habemus_core::ProductRepository;
//! use habemus_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("habemus.db")).await?;
//! db.ensure_seeded().await?;
//!
//! let catalog = db.products().get_all_products().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig, DbLocation};

pub use repository::memory::InMemoryProductRepository;
pub use repository::product::SqliteProductRepository;
pub use repository::ProductSource;
