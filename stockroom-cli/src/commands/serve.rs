//! HTTP server command
//!
//! Connects, makes sure the tables exist, then serves until shutdown.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use stockroom_server::db::{create_pool_with_options, ensure_tables, DEFAULT_MAX_CONNECTIONS};
use stockroom_server::{run_server, ServerConfig};

use super::resolve_database_url;
use crate::config::StockroomConfig;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8000)
    #[arg(long, short = 'b', env = "STOCKROOM_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections (default: 5)
    #[arg(long, env = "STOCKROOM_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,
}

/// Fully resolved serve settings
#[derive(Debug)]
pub struct ServeSettings {
    pub server: ServerConfig,
    pub database_url: String,
    pub max_connections: u32,
}

impl ServeSettings {
    pub fn resolve(args: ServeArgs, config: &StockroomConfig) -> Result<Self> {
        let defaults = ServerConfig::default();

        let server = ServerConfig {
            bind_addr: args
                .bind
                .or(config.server.bind)
                .unwrap_or(defaults.bind_addr),
            cors_permissive: args.cors_permissive
                || config.server.cors_permissive.unwrap_or(defaults.cors_permissive),
        };

        Ok(Self {
            server,
            database_url: resolve_database_url(args.database_url, config)?,
            max_connections: args
                .max_connections
                .or(config.database.max_connections)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        })
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &StockroomConfig) -> Result<()> {
    let settings = ServeSettings::resolve(args, config)?;

    tracing::info!("Starting stockroom server on {}", settings.server.bind_addr);

    let pool = create_pool_with_options(&settings.database_url, settings.max_connections)
        .await
        .context("Failed to create database pool")?;

    ensure_tables(&pool)
        .await
        .context("Failed to create database tables")?;

    // Blocks until shutdown
    run_server(pool, settings.server)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url() -> ServeArgs {
        ServeArgs {
            database_url: Some("postgres://localhost/stockroom".into()),
            ..ServeArgs::default()
        }
    }

    #[test]
    fn defaults_apply_without_file() {
        let settings = ServeSettings::resolve(with_url(), &StockroomConfig::default()).unwrap();

        assert_eq!(settings.server.bind_addr, "127.0.0.1:8000".parse().unwrap());
        assert!(!settings.server.cors_permissive);
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn file_fills_gaps_and_flags_win() {
        let mut config = StockroomConfig::default();
        config.server.bind = Some("0.0.0.0:9000".parse().unwrap());
        config.server.cors_permissive = Some(true);
        config.database.max_connections = Some(20);

        let settings = ServeSettings::resolve(with_url(), &config).unwrap();
        assert_eq!(settings.server.bind_addr, "0.0.0.0:9000".parse().unwrap());
        assert!(settings.server.cors_permissive);
        assert_eq!(settings.max_connections, 20);

        let args = ServeArgs {
            bind: Some("127.0.0.1:7000".parse().unwrap()),
            max_connections: Some(2),
            ..with_url()
        };
        let settings = ServeSettings::resolve(args, &config).unwrap();
        assert_eq!(settings.server.bind_addr, "127.0.0.1:7000".parse().unwrap());
        assert_eq!(settings.max_connections, 2);
    }

    #[test]
    fn requires_database_url() {
        assert!(ServeSettings::resolve(ServeArgs::default(), &StockroomConfig::default()).is_err());
    }
}
