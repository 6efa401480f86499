//! Menu repository - the catalog.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use super::entities::menu_item::{self, ActiveModel, Entity as MenuItemEntity};
use crate::domain::{MenuItem, NewMenuItem};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// All items, ordered by id
    async fn list(&self) -> AppResult<Vec<MenuItem>>;

    /// Number of items in the catalog
    async fn count(&self) -> AppResult<u64>;

    /// Bulk insert; returns how many rows were written
    async fn insert_many(&self, items: Vec<NewMenuItem>) -> AppResult<usize>;
}

pub struct MenuStore {
    db: DatabaseConnection,
}

impl MenuStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MenuRepository for MenuStore {
    async fn list(&self) -> AppResult<Vec<MenuItem>> {
        let models = MenuItemEntity::find()
            .order_by_asc(menu_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(MenuItem::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        MenuItemEntity::find()
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn insert_many(&self, items: Vec<NewMenuItem>) -> AppResult<usize> {
        if items.is_empty() {
            return Ok(0);
        }

        let inserted = items.len();
        let models = items.into_iter().map(|item| ActiveModel {
            name: Set(item.name),
            description: Set(item.description),
            price: Set(item.price),
            image_url: Set(item.image_url),
            category: Set(item.category),
            ..Default::default()
        });

        MenuItemEntity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(inserted)
    }
}
