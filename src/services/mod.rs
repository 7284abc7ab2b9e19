//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod booking_service;
mod catalog_service;
mod client_auth_service;
pub mod container;
mod staff_service;

#[cfg(test)]
mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use booking_service::{BookingManager, BookingService};
pub use catalog_service::{CatalogManager, CatalogService};
pub use client_auth_service::{ClientAuthService, ClientAuthenticator};
pub use staff_service::{verify_token, Claims, StaffManager, StaffService, StaffSession};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
