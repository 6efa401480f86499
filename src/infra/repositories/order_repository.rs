//! Order repository - read side of the ledger.
//!
//! Writes go through [`crate::infra::TxOrderRepository`] so an order and its
//! items always commit together.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::entities::{
    menu_item::Entity as MenuItemEntity,
    order::{self, Entity as OrderEntity},
    order_item::{self, Entity as OrderItemEntity},
};
use crate::domain::{MenuItem, Order, OrderItem};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A line item joined with the menu entry it references.
pub type OrderLineRow = (OrderItem, Option<MenuItem>);

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Orders owned by `user_id`, newest first
    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Order>>;

    /// One order, only if it belongs to `user_id`
    async fn find_for_user(&self, user_id: i32, order_id: i32) -> AppResult<Option<Order>>;

    /// Line items of the given orders with their menu items, in insertion order
    async fn lines_for_orders(&self, order_ids: Vec<i32>) -> AppResult<Vec<OrderLineRow>>;
}

pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Order>> {
        let models = OrderEntity::find()
            .filter(order::Column::UserId.eq(user_id))
            .order_by_desc(order::Column::CreatedAt)
            .order_by_desc(order::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Order::from).collect())
    }

    async fn find_for_user(&self, user_id: i32, order_id: i32) -> AppResult<Option<Order>> {
        let model = OrderEntity::find_by_id(order_id)
            .filter(order::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(Order::from))
    }

    async fn lines_for_orders(&self, order_ids: Vec<i32>) -> AppResult<Vec<OrderLineRow>> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = OrderItemEntity::find()
            .filter(order_item::Column::OrderId.is_in(order_ids))
            .find_also_related(MenuItemEntity)
            .order_by_asc(order_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(line, menu_item)| (OrderItem::from(line), menu_item.map(MenuItem::from)))
            .collect())
    }
}
