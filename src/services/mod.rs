//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure through the
//! Unit of Work and are consumed by handlers through their traits.

mod auth_service;
pub mod container;
mod menu_service;
mod order_service;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse};
pub use menu_service::{MenuCatalog, MenuService};
pub use order_service::{OrderManager, OrderService};
