//! Seed command - Inserts the sample menu into an empty catalog.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::{MenuCatalog, MenuService};

pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let catalog = MenuCatalog::new(Arc::new(Persistence::new(db.get_connection())));
    match catalog.seed_if_empty().await? {
        0 => println!("Menu already has items; nothing inserted"),
        n => println!("Inserted {} menu items", n),
    }

    Ok(())
}
