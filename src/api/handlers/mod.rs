//! HTTP request handlers.

pub mod auth_handler;
pub mod menu_handler;
pub mod order_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use menu_handler::menu_routes;
pub use order_handler::order_routes;
pub use user_handler::user_routes;
