//! Order handlers.

use axum::{
    extract::{rejection::PathRejection, Extension, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{NewOrder, NewOrderLine, OrderDetail, OrderSummary};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, MessageResponse};

/// One cart line. Extra cart fields sent by the client are ignored.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderLineRequest {
    /// Menu item id (`id` is accepted too)
    #[serde(alias = "id")]
    #[schema(example = 1)]
    pub menu_item_id: i32,
    /// Unit price as shown to the customer
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 18.0)]
    pub price: Decimal,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 2)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderLineRequest>,
    /// Delivery location label
    #[serde(rename = "pabellon", default)]
    #[schema(example = "B")]
    pub location: Option<String>,
    /// Free-text note for the kitchen
    #[serde(rename = "mensaje", default)]
    pub note: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            lines: req
                .items
                .into_iter()
                .map(|line| NewOrderLine {
                    menu_item_id: line.menu_item_id,
                    price: line.price,
                    quantity: line.quantity,
                })
                .collect(),
            location: req.location,
            note: req.note,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOrdersQuery {
    /// Return full line items instead of counts
    #[serde(default)]
    pub include_items: bool,
}

/// Order history in either shape.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OrderListing {
    Summaries(Vec<OrderSummary>),
    Detailed(Vec<OrderDetail>),
}

/// Order routes; mounted behind the auth middleware
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/:id", get(get_order))
}

/// The caller's order history, newest first
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "Order summaries, or details with include_items=true", body = Vec<OrderSummary>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_orders(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> AppResult<Json<OrderListing>> {
    let listing = if query.include_items {
        OrderListing::Detailed(state.order_service.list_orders_detailed(current_user.id).await?)
    } else {
        OrderListing::Summaries(state.order_service.list_orders(current_user.id).await?)
    };

    Ok(Json(listing))
}

/// Place the cart as a new order
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = MessageResponse),
        (status = 400, description = "Empty cart, bad line or unknown menu item"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_order(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<Created<MessageResponse>> {
    state
        .order_service
        .create_order(current_user.id, payload.into())
        .await?;

    Ok(Created(MessageResponse::new("Order created successfully")))
}

/// One of the caller's orders with its items
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order detail", body = OrderDetail),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    order_id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<OrderDetail>> {
    let Path(order_id) = order_id.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let order = state.order_service.get_order(current_user.id, order_id).await?;
    Ok(Json(order))
}
