//! Service Container - Centralized service access.
//!
//! Handlers depend on the service traits; the container wires the concrete
//! implementations over one shared Unit of Work.

use std::sync::Arc;

use super::{AuthService, Authenticator, MenuCatalog, MenuService, OrderManager, OrderService};
use crate::config::Config;
use crate::infra::Persistence;

pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn menu(&self) -> Arc<dyn MenuService>;

    fn orders(&self) -> Arc<dyn OrderService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    menu_service: Arc<dyn MenuService>,
    order_service: Arc<dyn OrderService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        menu_service: Arc<dyn MenuService>,
        order_service: Arc<dyn OrderService>,
    ) -> Self {
        Self {
            auth_service,
            menu_service,
            order_service,
        }
    }

    /// Build every service over a single connection pool.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self::new(
            Arc::new(Authenticator::new(uow.clone(), config)),
            Arc::new(MenuCatalog::new(uow.clone())),
            Arc::new(OrderManager::new(uow)),
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn menu(&self) -> Arc<dyn MenuService> {
        self.menu_service.clone()
    }

    fn orders(&self) -> Arc<dyn OrderService> {
        self.order_service.clone()
    }
}
