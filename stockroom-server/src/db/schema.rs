//! Table creation at startup
//!
//! There is no migration history: both tables are created if absent.

use sqlx::PgPool;

/// Name of the uniqueness constraint on `users.email`.
pub const USERS_EMAIL_CONSTRAINT: &str = "users_email_unique";

/// Create the `items` and `users` tables and their indexes if missing.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring stockroom tables exist...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            memo TEXT,
            quantity INTEGER NOT NULL DEFAULT 0,
            price NUMERIC(10, 2) NOT NULL DEFAULT 0.00
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(100) NOT NULL,
            password VARCHAR(255) NOT NULL,
            CONSTRAINT users_email_unique UNIQUE (email)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Low-stock lookups filter on quantity
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_quantity ON items(quantity)")
        .execute(pool)
        .await?;

    tracing::info!("stockroom tables ready");
    Ok(())
}
