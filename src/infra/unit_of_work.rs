//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the transaction lifecycle:
//! commit on `Ok`, rollback on `Err`.
//!
//! Inside a transaction only the repositories handed out by
//! [`TransactionContext`] may be used. The pooled repositories would wait
//! for a second connection, which a single-connection SQLite pool never has.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction,
    IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    BookingQueries, BookingRepository, BookingStore, CatalogRepository, CatalogStore,
    ClientQueries, ClientRepository, ClientStore, StaffQueries, StaffRepository, StaffStore,
};
use crate::errors::AppResult;

/// Transaction-bound repositories
pub type TxBookingRepository<'a> = BookingQueries<'a, DatabaseTransaction>;
pub type TxClientRepository<'a> = ClientQueries<'a, DatabaseTransaction>;
pub type TxStaffRepository<'a> = StaffQueries<'a, DatabaseTransaction>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly due to generic methods; tests supply their own
/// implementation around mocked repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn bookings(&self) -> Arc<dyn BookingRepository>;

    fn clients(&self) -> Arc<dyn ClientRepository>;

    fn staff(&self) -> Arc<dyn StaffRepository>;

    fn catalog(&self) -> Arc<dyn CatalogRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed on success, rolled back on error. ReadCommitted where the
    /// backend supports choosing an isolation level.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn bookings(&self) -> TxBookingRepository<'_> {
        BookingQueries::new(self.txn)
    }

    pub fn clients(&self) -> TxClientRepository<'_> {
        ClientQueries::new(self.txn)
    }

    pub fn staff(&self) -> TxStaffRepository<'_> {
        StaffQueries::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    booking_repo: Arc<BookingStore>,
    client_repo: Arc<ClientStore>,
    staff_repo: Arc<StaffStore>,
    catalog_repo: Arc<CatalogStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            booking_repo: Arc::new(BookingStore::new(db.clone())),
            client_repo: Arc::new(ClientStore::new(db.clone())),
            staff_repo: Arc::new(StaffStore::new(db.clone())),
            catalog_repo: Arc::new(CatalogStore::new(db.clone())),
            db,
        }
    }

    async fn begin(&self, isolation: IsolationLevel) -> AppResult<DatabaseTransaction> {
        let txn = match self.db.get_database_backend() {
            // SQLite transactions are always serializable
            DatabaseBackend::Sqlite => self.db.begin().await?,
            _ => {
                self.db
                    .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
                    .await?
            }
        };
        Ok(txn)
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self.begin(isolation).await?;
        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await?;
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

#[async_trait]
impl UnitOfWork for Persistence {
    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.booking_repo.clone()
    }

    fn clients(&self) -> Arc<dyn ClientRepository> {
        self.client_repo.clone()
    }

    fn staff(&self) -> Arc<dyn StaffRepository> {
        self.staff_repo.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }
}

/// Simpler API for executing transactional operations.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewBooking, NewStaffUser, StaffRole};
    use crate::errors::AppError;
    use crate::infra::Database;

    async fn persistence() -> Persistence {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Persistence::new(db.get_connection())
    }

    fn booking() -> NewBooking {
        NewBooking {
            name: "A".into(),
            phone: "1".into(),
            email: "a@x.com".into(),
            address: "Addr".into(),
            area: 50,
            service_type: "standard".into(),
            comment: String::new(),
            booking_date: None,
            booking_time: None,
        }
    }

    #[tokio::test]
    async fn test_commit_on_success() {
        let uow = persistence().await;

        let id = uow
            .transaction(|ctx| {
                Box::pin(async move { Ok(ctx.bookings().create(booking()).await?.id) })
            })
            .await
            .unwrap();

        assert!(uow.bookings().find_by_id(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_rollback_on_error() {
        let uow = persistence().await;

        let result: AppResult<()> = uow
            .transaction(|ctx| {
                Box::pin(async move {
                    ctx.staff()
                        .create(
                            NewStaffUser {
                                full_name: "Anna".into(),
                                phone: "1".into(),
                                role: StaffRole::Manager,
                                login: "anna".into(),
                                password: "pw".into(),
                            },
                            "hash".into(),
                        )
                        .await?;
                    Err(AppError::validation("abort"))
                })
            })
            .await;

        assert!(result.is_err());
        assert!(uow.staff().find_by_login("anna").await.unwrap().is_none());
    }
}
