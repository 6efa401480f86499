//! Shared fixtures: an in-memory SQLite database with every migration applied.

#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::{ConnectOptions, ConnectionTrait, Statement};

use restaurant_api::api::{create_router, AppState};
use restaurant_api::config::Config;
use restaurant_api::infra::Database;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

/// Fresh database; a single pooled connection keeps the in-memory data alive.
pub async fn test_database() -> Arc<Database> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    Arc::new(
        Database::connect_with(options)
            .await
            .expect("in-memory database"),
    )
}

pub fn test_config() -> Config {
    Config::builder(TEST_SECRET).build().expect("test config")
}

/// Router over a fresh database, optionally with the sample menu loaded.
pub async fn test_app(seed_menu: bool) -> (axum::Router, Arc<Database>) {
    let db = test_database().await;
    let state = AppState::from_config(db.clone(), test_config());

    if seed_menu {
        state.menu_service.seed_if_empty().await.expect("seed menu");
    }

    (create_router(state), db)
}

pub async fn count_rows(db: &Database, table: &str) -> i64 {
    let conn = db.connection();
    let row = conn
        .query_one(Statement::from_string(
            conn.get_database_backend(),
            format!("SELECT COUNT(*) AS n FROM {table}"),
        ))
        .await
        .expect("count query")
        .expect("count row");

    row.try_get::<i64>("", "n").expect("count value")
}
