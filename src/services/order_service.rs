//! Order service - placing orders and reading a user's order history.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{NewOrder, Order, OrderDetail, OrderLineDetail, OrderSummary};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{OrderLineRow, UnitOfWork};
use crate::with_transaction;

#[async_trait]
pub trait OrderService: Send + Sync {
    /// Persist a cart as one order with its line items, atomically
    async fn create_order(&self, user_id: i32, order: NewOrder) -> AppResult<Order>;

    /// The caller's orders, newest first, with item counts
    async fn list_orders(&self, user_id: i32) -> AppResult<Vec<OrderSummary>>;

    /// The caller's orders, newest first, with full line items
    async fn list_orders_detailed(&self, user_id: i32) -> AppResult<Vec<OrderDetail>>;

    /// One of the caller's orders; other users' orders are `NotFound`
    async fn get_order(&self, user_id: i32, order_id: i32) -> AppResult<OrderDetail>;
}

fn line_detail((line, menu_item): OrderLineRow) -> OrderLineDetail {
    let (menu_item_name, menu_item_image, category) = match menu_item {
        Some(item) => (item.name, item.image_url, item.category),
        None => (String::new(), None, String::new()),
    };

    OrderLineDetail {
        id: line.id,
        menu_item_id: line.menu_item_id,
        menu_item_name,
        menu_item_image,
        category,
        price: line.price,
        quantity: line.quantity,
    }
}

pub struct OrderManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OrderManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn user_name(&self, user_id: i32) -> AppResult<String> {
        let user = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User")?;
        Ok(user.name)
    }

    /// Line details keyed by order id, each list in insertion order.
    async fn lines_by_order(&self, order_ids: Vec<i32>) -> AppResult<HashMap<i32, Vec<OrderLineDetail>>> {
        let rows = self.uow.orders().lines_for_orders(order_ids).await?;

        let mut grouped: HashMap<i32, Vec<OrderLineDetail>> = HashMap::new();
        for row in rows {
            grouped.entry(row.0.order_id).or_default().push(line_detail(row));
        }
        Ok(grouped)
    }
}

#[async_trait]
impl<U: UnitOfWork> OrderService for OrderManager<U> {
    async fn create_order(&self, user_id: i32, order: NewOrder) -> AppResult<Order> {
        order.validate()?;
        let total = order.total()?;

        let created = with_transaction!(self.uow, |ctx| {
            let orders = ctx.orders();

            let ids: Vec<i32> = order.lines.iter().map(|line| line.menu_item_id).collect();
            let missing = orders.missing_menu_items(&ids).await?;
            if !missing.is_empty() {
                let missing: Vec<String> = missing.iter().map(ToString::to_string).collect();
                return Err(AppError::validation(format!(
                    "Unknown menu item(s): {}",
                    missing.join(", ")
                )));
            }

            let created = orders
                .insert_order(user_id, total, order.location, order.note)
                .await?;
            orders.insert_items(created.id, &order.lines).await?;
            Ok(created)
        })?;

        tracing::info!(
            order_id = created.id,
            user_id,
            total = %created.total_price,
            "Order created"
        );
        Ok(created)
    }

    async fn list_orders(&self, user_id: i32) -> AppResult<Vec<OrderSummary>> {
        let orders = self.uow.orders().list_for_user(user_id).await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let user_name = self.user_name(user_id).await?;
        let lines = self.lines_by_order(orders.iter().map(|o| o.id).collect()).await?;

        Ok(orders
            .into_iter()
            .map(|order| {
                let count = lines.get(&order.id).map_or(0, Vec::len);
                OrderSummary::new(order, user_name.clone(), count)
            })
            .collect())
    }

    async fn list_orders_detailed(&self, user_id: i32) -> AppResult<Vec<OrderDetail>> {
        let orders = self.uow.orders().list_for_user(user_id).await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let user_name = self.user_name(user_id).await?;
        let mut lines = self.lines_by_order(orders.iter().map(|o| o.id).collect()).await?;

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = lines.remove(&order.id).unwrap_or_default();
                OrderDetail::new(order, user_name.clone(), items)
            })
            .collect())
    }

    async fn get_order(&self, user_id: i32, order_id: i32) -> AppResult<OrderDetail> {
        let order = self
            .uow
            .orders()
            .find_for_user(user_id, order_id)
            .await?
            .ok_or_not_found("Order")?;

        let user_name = self.user_name(user_id).await?;
        let items = self
            .lines_by_order(vec![order.id])
            .await?
            .remove(&order.id)
            .unwrap_or_default();

        Ok(OrderDetail::new(order, user_name, items))
    }
}
