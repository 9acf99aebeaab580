//! stockroom-server: HTTP server for user and inventory item records
//!
//! Validates input at the edge, persists records in PostgreSQL, and
//! hashes credentials before they reach the store.

pub mod credentials;
pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, create_pool_with_options, DbError};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
