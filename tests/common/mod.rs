#![allow(dead_code)]

use axum::{Router, http::StatusCode, response::Redirect, routing::get};
use sqlx::SqlitePool;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use std::time::Duration;
use tempfile::TempDir;
use url_minter::config::Config;
use url_minter::infrastructure::persistence::{PoolSettings, connect};
use url_minter::server::build_state;
use url_minter::state::AppState;

pub fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        db_max_connections: 8,
        db_connect_timeout: 30,
        store_timeout_ms: 10_000,
        code_max_attempts: 5,
        url_check: false,
        url_check_timeout_ms: 2_000,
    }
}

/// Fresh, migrated in-memory database.
pub async fn memory_pool() -> SqlitePool {
    connect("sqlite::memory:", &PoolSettings::default())
        .await
        .unwrap()
}

/// Migrated file database inside `dir`, with `max_connections` connections.
pub async fn file_pool(dir: &TempDir, max_connections: u32) -> SqlitePool {
    let path = dir.path().join("urls.sqlite3");
    let url = format!("sqlite://{}?mode=rwc", path.display());

    connect(
        &url,
        &PoolSettings {
            max_connections,
            acquire_timeout: Duration::from_secs(30),
        },
    )
    .await
    .unwrap()
}

pub async fn create_test_mapping(pool: &SqlitePool, url: &str, code: &str, clicks: i64) {
    sqlx::query("INSERT INTO urls (original_url, shortened_url, clicks) VALUES (?1, ?2, ?3)")
        .bind(url)
        .bind(code)
        .bind(clicks)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn clicks_for(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM urls WHERE shortened_url = ?1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    build_state(pool, &test_config("sqlite::memory:"))
}

/// State whose verifier probes submitted URLs over HTTP.
pub fn create_checking_state(pool: SqlitePool) -> AppState {
    let config = Config {
        url_check: true,
        ..test_config("sqlite::memory:")
    };
    build_state(pool, &config)
}

/// Serves `GET /ok` (200) and `GET /gone` (410) on a random local port.
pub async fn spawn_target() -> SocketAddr {
    let app = Router::new()
        .route("/ok", get(|| async { "ok" }))
        .route("/gone", get(|| async { StatusCode::GONE }))
        .route("/moved", get(|| async { Redirect::permanent("/ok") }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// A local address with nothing listening on it.
pub async fn unbound_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
