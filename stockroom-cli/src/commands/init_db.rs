//! Create the tables without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use stockroom_server::db::{create_pool_with_options, ensure_tables};

use super::resolve_database_url;
use crate::config::StockroomConfig;

/// Arguments for the init-db command
#[derive(Parser, Debug, Default)]
pub struct InitDbArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_init_db(args: InitDbArgs, config: &StockroomConfig) -> Result<()> {
    let database_url = resolve_database_url(args.database_url, config)?;

    // one connection is enough for DDL
    let pool = create_pool_with_options(&database_url, 1)
        .await
        .context("Failed to create database pool")?;

    ensure_tables(&pool)
        .await
        .context("Failed to create database tables")?;

    pool.close().await;
    tracing::info!("Database tables ready");

    Ok(())
}
