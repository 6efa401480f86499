//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the transaction lifecycle, so
//! multi-row writes (an order header plus its line items, a profile change
//! checked against the stored hash) commit or roll back as one.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use rust_decimal::Decimal;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IsolationLevel, QueryFilter, QuerySelect, Set,
    TransactionTrait,
};

use super::repositories::entities::{menu_item, order, order_item, user};
use super::repositories::{
    MenuRepository, MenuStore, OrderRepository, OrderStore, UserRepository, UserStore,
};
use crate::config::ORDER_STATUS_RECEIVED;
use crate::domain::{NewOrderLine, Order, User, UserChanges};
use crate::errors::{AppError, AppResult, OptionExt};

/// Boxed future returned by transaction closures.
pub type TxFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic transaction methods; unit
/// tests provide a small hand-written implementation over mocked repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn menu(&self) -> Arc<dyn MenuRepository>;

    fn orders(&self) -> Arc<dyn OrderRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back otherwise.
    /// Postgres runs it at ReadCommitted.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access scoped to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn orders(&self) -> TxOrderRepository<'_> {
        TxOrderRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    menu_repo: Arc<MenuStore>,
    order_repo: Arc<OrderStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            menu_repo: Arc::new(MenuStore::new(db.clone())),
            order_repo: Arc::new(OrderStore::new(db.clone())),
            db,
        }
    }

    async fn begin(&self) -> AppResult<DatabaseTransaction> {
        // SQLite rejects SET TRANSACTION; its transactions are serializable anyway.
        let txn = match self.db.get_database_backend() {
            DatabaseBackend::Sqlite => self.db.begin().await,
            _ => {
                self.db
                    .begin_with_config(
                        Some(IsolationLevel::ReadCommitted),
                        Some(AccessMode::ReadWrite),
                    )
                    .await
            }
        };

        txn.map_err(AppError::from)
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn menu(&self) -> Arc<dyn MenuRepository> {
        self.menu_repo.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.order_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self.begin().await?;
        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = user::Entity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    /// Apply the present fields and bump `updated_at`.
    pub async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        let existing = user::Entity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or_not_found("User")?;

        let mut active: user::ActiveModel = existing.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active
            .update(self.txn)
            .await
            .map_err(|e| AppError::unique_violation_as_conflict(e, "Email"))?;

        Ok(User::from(model))
    }
}

/// Transaction-aware order writer.
pub struct TxOrderRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxOrderRepository<'a> {
    /// Which of `ids` do not exist in the catalog.
    pub async fn missing_menu_items(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        let found: HashSet<i32> = menu_item::Entity::find()
            .select_only()
            .column(menu_item::Column::Id)
            .filter(menu_item::Column::Id.is_in(ids.iter().copied()))
            .into_tuple::<i32>()
            .all(self.txn)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .collect();

        let mut missing: Vec<i32> = ids.iter().copied().filter(|id| !found.contains(id)).collect();
        missing.sort_unstable();
        missing.dedup();
        Ok(missing)
    }

    /// Insert the order header with status `Received`; the row id is generated.
    pub async fn insert_order(
        &self,
        user_id: i32,
        total_price: Decimal,
        location: Option<String>,
        note: Option<String>,
    ) -> AppResult<Order> {
        let active_model = order::ActiveModel {
            user_id: Set(user_id),
            total_price: Set(total_price),
            created_at: Set(chrono::Utc::now()),
            status: Set(ORDER_STATUS_RECEIVED.to_string()),
            location: Set(location),
            note: Set(note),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(Order::from(model))
    }

    /// Insert one row per cart line, preserving submission order.
    pub async fn insert_items(&self, order_id: i32, lines: &[NewOrderLine]) -> AppResult<()> {
        if lines.is_empty() {
            return Ok(());
        }

        let models = lines.iter().map(|line| order_item::ActiveModel {
            order_id: Set(order_id),
            menu_item_id: Set(line.menu_item_id),
            quantity: Set(line.quantity),
            price: Set(line.price),
            ..Default::default()
        });

        order_item::Entity::insert_many(models)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }
}

/// Shorthand for running a block inside [`UnitOfWork::transaction`].
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
