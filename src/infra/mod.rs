//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Unit of Work for transaction management
//! - Outbound mail notifications

pub mod db;
pub mod notifier;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use notifier::{build_notifier, MailNotifier, NoopNotifier, Notifier};
pub use repositories::{
    BookingRepository, BookingStore, CatalogRepository, CatalogStore, ClientRepository,
    ClientStore, StaffRepository, StaffStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxBookingRepository, TxClientRepository, TxStaffRepository,
    UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use notifier::MockNotifier;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockBookingRepository, MockCatalogRepository, MockClientRepository, MockStaffRepository,
};
