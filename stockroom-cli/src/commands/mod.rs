//! Command implementations for the stockroom CLI

pub mod init_db;
pub mod serve;

pub use init_db::run_init_db;
pub use serve::run_serve;

use anyhow::{Context, Result};

use crate::config::StockroomConfig;

/// Flag (or `DATABASE_URL`, merged in by clap) first, then the config file.
pub(crate) fn resolve_database_url(
    flag: Option<String>,
    config: &StockroomConfig,
) -> Result<String> {
    flag.or_else(|| config.database.url.clone()).context(
        "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, \
         ~/.stockroom/.env, or [database] url in the config file",
    )
}
