//! OpenAPI documentation served through Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, menu_handler, order_handler, user_handler};
use crate::domain::{MenuCategory, MenuItem, OrderDetail, OrderLineDetail, OrderSummary, UserResponse};
use crate::services::LoginResponse;
use crate::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Restaurant Ordering API",
        version = "0.1.0",
        description = "Accounts, menu catalog and order history for a single restaurant",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        user_handler::update_profile,
        menu_handler::list_menu,
        order_handler::list_orders,
        order_handler::create_order,
        order_handler::get_order,
    ),
    components(
        schemas(
            UserResponse,
            MenuItem,
            MenuCategory,
            OrderSummary,
            OrderDetail,
            OrderLineDetail,
            MessageResponse,
            LoginResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            user_handler::UpdateProfileRequest,
            user_handler::ProfileUpdatedResponse,
            order_handler::CreateOrderRequest,
            order_handler::OrderLineRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Profile", description = "Account changes"),
        (name = "Menu", description = "Catalog browsing"),
        (name = "Orders", description = "Placing orders and order history")
    )
)]
pub struct ApiDoc;

/// Registers the JWT bearer scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/user/update",
            "/api/menu",
            "/api/orders",
            "/api/orders/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
