//! Menu catalog service - read-only listing plus first-run seeding.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{group_by_category, MenuCategory};
use crate::errors::{AppError, AppResult};
use crate::infra::db::seed::sample_menu;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait MenuService: Send + Sync {
    /// Catalog grouped by category; an empty catalog is `NotFound`
    async fn list_menu(&self) -> AppResult<Vec<MenuCategory>>;

    /// Insert the sample catalog when no items exist; returns rows inserted
    async fn seed_if_empty(&self) -> AppResult<usize>;
}

pub struct MenuCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MenuCatalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> MenuService for MenuCatalog<U> {
    async fn list_menu(&self) -> AppResult<Vec<MenuCategory>> {
        let items = self.uow.menu().list().await?;
        if items.is_empty() {
            return Err(AppError::not_found("Menu"));
        }

        Ok(group_by_category(items))
    }

    async fn seed_if_empty(&self) -> AppResult<usize> {
        let menu = self.uow.menu();
        if menu.count().await? > 0 {
            tracing::debug!("Menu already populated, skipping seed");
            return Ok(0);
        }

        let inserted = menu.insert_many(sample_menu()).await?;
        tracing::info!(inserted, "Seeded sample menu");
        Ok(inserted)
    }
}
