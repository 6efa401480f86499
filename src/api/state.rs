//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, MenuService, OrderService, ServiceContainer, Services};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub menu_service: Arc<dyn MenuService>,
    pub order_service: Arc<dyn OrderService>,
    /// Used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the production services over the database pool.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    /// Take services from any container (mocked ones included).
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            menu_service: container.menu(),
            order_service: container.orders(),
            database,
        }
    }
}
