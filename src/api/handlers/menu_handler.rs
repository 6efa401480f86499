//! Menu handlers.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::MenuCategory;
use crate::errors::AppResult;

pub fn menu_routes() -> Router<AppState> {
    Router::new().route("/menu", get(list_menu))
}

/// Full catalog grouped into sections
#[utoipa::path(
    get,
    path = "/api/menu",
    tag = "Menu",
    responses(
        (status = 200, description = "Menu grouped by category", body = Vec<MenuCategory>),
        (status = 404, description = "Menu is empty")
    )
)]
pub async fn list_menu(State(state): State<AppState>) -> AppResult<Json<Vec<MenuCategory>>> {
    let menu = state.menu_service.list_menu().await?;
    Ok(Json(menu))
}
