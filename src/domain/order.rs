//! Order ledger entities, line totals and history views.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{MAX_MONEY_CENTS, MIN_LINE_QUANTITY};
use crate::errors::{AppError, AppResult};

/// Persisted order header.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub location: Option<String>,
    pub note: Option<String>,
}

/// Persisted line item; `price` is the unit price snapshot taken at order time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
    pub price: Decimal,
}

/// One submitted cart line. The price comes from the client and is trusted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLine {
    pub menu_item_id: i32,
    pub price: Decimal,
    pub quantity: i32,
}

impl NewOrderLine {
    /// `price × quantity`, or `None` when the product overflows.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

fn max_money() -> Decimal {
    Decimal::new(MAX_MONEY_CENTS, 2)
}

/// A cart being placed as an order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewOrder {
    pub lines: Vec<NewOrderLine>,
    pub location: Option<String>,
    pub note: Option<String>,
}

impl NewOrder {
    /// Reject carts that cannot become an order.
    pub fn validate(&self) -> AppResult<()> {
        if self.lines.is_empty() {
            return Err(AppError::validation("Order must contain at least one item"));
        }

        for line in &self.lines {
            if line.quantity < MIN_LINE_QUANTITY {
                return Err(AppError::validation(format!(
                    "Quantity for menu item {} must be at least {}",
                    line.menu_item_id, MIN_LINE_QUANTITY
                )));
            }
            if line.price < Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Price for menu item {} cannot be negative",
                    line.menu_item_id
                )));
            }
            if line.price > max_money() {
                return Err(AppError::validation(format!(
                    "Price for menu item {} exceeds {}",
                    line.menu_item_id,
                    max_money()
                )));
            }
        }

        self.total().map(|_| ())
    }

    /// Σ price × quantity over the submitted lines.
    ///
    /// # Errors
    /// Returns a validation error when the sum leaves the storable range.
    pub fn total(&self) -> AppResult<Decimal> {
        let too_large = || AppError::validation(format!("Order total exceeds {}", max_money()));

        let total = self.lines.iter().try_fold(Decimal::ZERO, |acc, line| {
            line.subtotal()
                .and_then(|subtotal| acc.checked_add(subtotal))
                .ok_or_else(too_large)
        })?;

        if total > max_money() {
            return Err(too_large());
        }
        Ok(total)
    }
}

/// Order as listed in history (line items only counted).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderSummary {
    #[schema(example = 1)]
    pub id: i32,
    /// Owner display name
    #[schema(example = "Alice")]
    pub user_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 36.0)]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    #[schema(example = "Received")]
    pub status: String,
    /// Delivery location label
    #[serde(rename = "pabellon")]
    pub location: Option<String>,
    /// Free-text note
    #[serde(rename = "mensaje")]
    pub note: Option<String>,
    #[schema(example = 1)]
    pub item_count: usize,
}

impl OrderSummary {
    pub fn new(order: Order, user_name: String, item_count: usize) -> Self {
        Self {
            id: order.id,
            user_name,
            total_price: order.total_price,
            created_at: order.created_at,
            status: order.status,
            location: order.location,
            note: order.note,
            item_count,
        }
    }
}

/// Line item with the referenced menu entry resolved.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderLineDetail {
    pub id: i32,
    pub menu_item_id: i32,
    pub menu_item_name: String,
    pub menu_item_image: Option<String>,
    pub category: String,
    /// Unit price at order time
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 18.0)]
    pub price: Decimal,
    pub quantity: i32,
}

/// Order with its full item breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub summary: OrderSummary,
    pub items: Vec<OrderLineDetail>,
}

impl OrderDetail {
    pub fn new(order: Order, user_name: String, items: Vec<OrderLineDetail>) -> Self {
        Self {
            summary: OrderSummary::new(order, user_name, items.len()),
            items,
        }
    }
}
