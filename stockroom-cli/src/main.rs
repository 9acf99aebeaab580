//! stockroom CLI - runs the user & item record server
//!
//! - `serve`: HTTP API over PostgreSQL
//! - `init-db`: create the tables and exit

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::StockroomConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "stockroom",
    author,
    version,
    about = "User and inventory item records over HTTP",
    long_about = "Serve a JSON API for users and inventory items backed by PostgreSQL. \
                  Passwords are hashed before storage and never returned."
)]
struct Cli {
    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.stockroom/config.toml)
    #[arg(long, global = true, env = "STOCKROOM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create database tables and exit
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so clap's env fallbacks see .env values
    config::load_dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    let file_config = StockroomConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &file_config).await?,
        Commands::InitDb(args) => commands::run_init_db(args, &file_config).await?,
    }
    Ok(())
}
