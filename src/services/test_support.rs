//! Unit of work over mocked repositories for service unit tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{AppError, AppResult};
use crate::infra::{
    BookingRepository, CatalogRepository, ClientRepository, MockBookingRepository,
    MockCatalogRepository, MockClientRepository, MockStaffRepository, StaffRepository,
    TransactionContext, UnitOfWork,
};

/// Repositories default to mocks with no expectations, so any unexpected
/// call fails the test.
#[derive(Default)]
pub struct TestUnitOfWork {
    pub bookings: Option<MockBookingRepository>,
    pub clients: Option<MockClientRepository>,
    pub staff: Option<MockStaffRepository>,
    pub catalog: Option<MockCatalogRepository>,
}

impl TestUnitOfWork {
    pub fn build(self) -> MockedUnitOfWork {
        MockedUnitOfWork {
            bookings: Arc::new(self.bookings.unwrap_or_default()),
            clients: Arc::new(self.clients.unwrap_or_default()),
            staff: Arc::new(self.staff.unwrap_or_default()),
            catalog: Arc::new(self.catalog.unwrap_or_default()),
        }
    }
}

pub struct MockedUnitOfWork {
    bookings: Arc<MockBookingRepository>,
    clients: Arc<MockClientRepository>,
    staff: Arc<MockStaffRepository>,
    catalog: Arc<MockCatalogRepository>,
}

#[async_trait]
impl UnitOfWork for MockedUnitOfWork {
    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.bookings.clone()
    }

    fn clients(&self) -> Arc<dyn ClientRepository> {
        self.clients.clone()
    }

    fn staff(&self) -> Arc<dyn StaffRepository> {
        self.staff.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transactions need a real connection; covered by the API tests
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}
