//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and seed data
//! - Repositories over the SeaORM entities
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    MenuRepository, MenuStore, OrderLineRow, OrderRepository, OrderStore, UserRepository,
    UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxFuture, TxOrderRepository, TxUserRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockMenuRepository, MockOrderRepository, MockUserRepository};
