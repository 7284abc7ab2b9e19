//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! The `*Queries` types run against any connection so the same code
//! serves pooled stores and open transactions.

mod booking_repository;
mod catalog_repository;
mod client_repository;
pub(crate) mod entities;
mod staff_repository;

pub use booking_repository::{BookingQueries, BookingRepository, BookingStore};
pub use catalog_repository::{CatalogRepository, CatalogStore};
pub use client_repository::{ClientQueries, ClientRepository, ClientStore};
pub use staff_repository::{StaffQueries, StaffRepository, StaffStore};

// Export mocks for tests
#[cfg(any(test, feature = "test-utils"))]
pub use booking_repository::MockBookingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use catalog_repository::MockCatalogRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use client_repository::MockClientRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use staff_repository::MockStaffRepository;
