//! # Application Configuration
//!
//! Where the catalog comes from, which price tier the screen starts on and
//! how chatty the logs are.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     HABEMUS_DB_PATH=/srv/habemus/catalog.db                            │
//! │     HABEMUS_CATALOG_SOURCE=memory                                      │
//! │     HABEMUS_CUSTOMER_TYPE=consumer_final                               │
//! │     HABEMUS_LOG=debug                                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $HABEMUS_CONFIG, or                                                │
//! │     ~/.config/habemus-sales/config.toml (Linux)                        │
//! │     ~/Library/Application Support/bar.habemus.sales/config.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     SQLite catalog in the platform data dir, Retailer prices           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! source = "sqlite"          # sqlite | memory
//! database_path = "/srv/habemus/catalog.db"
//!
//! [sales]
//! default_customer_type = "retailer"   # retailer | consumer_final
//!
//! [logging]
//! filter = "info,habemus=debug,sqlx=warn"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use habemus_core::CustomerType;

use crate::error::{AppError, AppResult};

/// Filter used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_LOG_FILTER: &str = "info,habemus=debug,sqlx=warn";

const DATABASE_FILE: &str = "habemus.db";
const CONFIG_FILE: &str = "config.toml";

// =============================================================================
// Catalog Source
// =============================================================================

/// Which product repository backs the sales screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// `products` table in a SQLite file, seeded on first run.
    #[default]
    Sqlite,

    /// The built-in catalog held in memory.
    Memory,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Sqlite => write!(f, "sqlite"),
            CatalogSource::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for CatalogSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "db" | "database" => Ok(CatalogSource::Sqlite),
            "memory" | "in_memory" | "static" => Ok(CatalogSource::Memory),
            other => Err(AppError::config(format!(
                "Unknown catalog source: '{}'. Valid options: sqlite, memory",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[catalog]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogSource,

    /// SQLite file. Defaults to `habemus.db` in the platform data dir.
    /// `":memory:"` gives a throwaway database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

/// `[sales]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesConfig {
    /// Price tier selected when the screen opens.
    #[serde(default)]
    pub default_customer_type: CustomerType,
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives. `RUST_LOG` still wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub sales: SalesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration: defaults, then the TOML file, then environment
    /// overrides, then validation.
    ///
    /// File lookup order: `config_path`, `$HABEMUS_CONFIG`, the platform
    /// config dir. A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os("HABEMUS_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Like [`load`](Self::load) but falls back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Checks values that parse but cannot work.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(path) = &self.catalog.database_path {
            if path.as_os_str().is_empty() {
                return Err(AppError::config("catalog.database_path must not be empty"));
            }
        }

        if self.logging.filter.trim().is_empty() {
            return Err(AppError::config("logging.filter must not be empty"));
        }
        EnvFilter::try_new(&self.logging.filter).map_err(|e| {
            AppError::config(format!("logging.filter '{}': {}", self.logging.filter, e))
        })?;

        Ok(())
    }

    /// Applies `HABEMUS_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are logged
    /// and skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("HABEMUS_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.catalog.database_path = Some(PathBuf::from(path));
        }

        if let Some(source) = lookup("HABEMUS_CATALOG_SOURCE") {
            match source.parse() {
                Ok(parsed) => {
                    debug!(source = %source, "Overriding catalog source from environment");
                    self.catalog.source = parsed;
                }
                Err(e) => warn!(source = %source, error = %e, "Ignoring catalog source override"),
            }
        }

        if let Some(customer_type) = lookup("HABEMUS_CUSTOMER_TYPE") {
            match customer_type.parse() {
                Ok(parsed) => self.sales.default_customer_type = parsed,
                Err(e) => warn!(error = %e, "Ignoring customer type override"),
            }
        }

        if let Some(filter) = lookup("HABEMUS_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Resolves the SQLite file: the configured path, else the platform
    /// data dir.
    pub fn database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.catalog.database_path {
            return Ok(path.clone());
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
            .ok_or_else(|| {
                AppError::config("no platform data directory; set catalog.database_path")
            })
    }

    /// Returns the default config file location for this platform.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("bar", "habemus", "sales")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
