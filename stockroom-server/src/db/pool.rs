//! Connection pool construction
//!
//! The pool is the only shared handle to the store. `AppState` owns it and
//! repositories borrow it per request.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool size used when neither flag, env nor config file sets one.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connect with [`DEFAULT_MAX_CONNECTIONS`].
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect eagerly so a bad URL fails at startup rather than on the first request.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
