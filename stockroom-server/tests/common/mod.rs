//! Shared helpers for router-level tests
#![allow(dead_code)]

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tower::ServiceExt;

use stockroom_server::db::ensure_tables;
use stockroom_server::{build_router, AppState, ServerConfig};

/// Send server logs to the test harness; `RUST_LOG=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Router over a pool that never connects.
///
/// Good for paths that are rejected before reaching the store.
pub fn offline_router() -> Router {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy("postgres://stockroom@127.0.0.1:1/offline")
        .expect("lazy pool");
    build_router(AppState::new(pool), &ServerConfig::default())
}

/// Pool bound to a fresh schema so tests don't see each other's rows.
///
/// Requires `DATABASE_URL`.
pub async fn isolated_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let schema = format!("stockroom_test_{}", uuid::Uuid::new_v4().simple());

    let admin = PgPool::connect(&url).await.expect("admin connection");
    admin
        .execute(format!("CREATE SCHEMA {}", schema).as_str())
        .await
        .expect("create schema");
    admin.close().await;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .after_connect(move |conn, _meta| {
            let set_path = format!("SET search_path TO {}", schema);
            Box::pin(async move {
                conn.execute(set_path.as_str()).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("test pool");

    ensure_tables(&pool).await.expect("create tables");
    pool
}

pub async fn db_router() -> (Router, PgPool) {
    init_tracing();
    let pool = isolated_pool().await;
    let router = build_router(AppState::new(pool.clone()), &ServerConfig::default());
    (router, pool)
}

/// Send one request through the router; returns status and JSON body
/// (`Value::Null` for empty bodies).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, value)
}

/// Send a raw (possibly invalid) JSON body.
pub async fn send_raw(app: &Router, method: &str, uri: &str, raw: &str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_owned()))
        .expect("request");

    app.clone().oneshot(request).await.expect("response").status()
}
