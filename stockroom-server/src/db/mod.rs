//! Database layer - connection pool, schema, and repositories
//!
//! # Design Principles
//!
//! - One pooled handle, passed explicitly to every repository
//! - One transaction per create/update/delete
//! - Rely on DB constraints and read their structured error codes - no check-then-insert

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
pub use schema::ensure_tables;
