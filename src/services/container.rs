//! Service Container - Centralized service access.
//!
//! Handlers depend on service traits through this container, never on
//! concrete implementations.

use std::sync::Arc;

use super::{
    BookingManager, BookingService, CatalogManager, CatalogService, ClientAuthService,
    ClientAuthenticator, StaffManager, StaffService,
};
use crate::config::Config;
use crate::infra::{Notifier, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn bookings(&self) -> Arc<dyn BookingService>;

    fn catalog(&self) -> Arc<dyn CatalogService>;

    fn client_auth(&self) -> Arc<dyn ClientAuthService>;

    fn staff(&self) -> Arc<dyn StaffService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    booking_service: Arc<dyn BookingService>,
    catalog_service: Arc<dyn CatalogService>,
    client_auth_service: Arc<dyn ClientAuthService>,
    staff_service: Arc<dyn StaffService>,
}

impl Services {
    pub fn new(
        booking_service: Arc<dyn BookingService>,
        catalog_service: Arc<dyn CatalogService>,
        client_auth_service: Arc<dyn ClientAuthService>,
        staff_service: Arc<dyn StaffService>,
    ) -> Self {
        Self {
            booking_service,
            catalog_service,
            client_auth_service,
            staff_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            booking_service: Arc::new(BookingManager::new(uow.clone(), notifier)),
            catalog_service: Arc::new(CatalogManager::new(uow.clone())),
            client_auth_service: Arc::new(ClientAuthenticator::new(uow.clone())),
            staff_service: Arc::new(StaffManager::new(uow, config)),
        }
    }
}

impl ServiceContainer for Services {
    fn bookings(&self) -> Arc<dyn BookingService> {
        self.booking_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    fn client_auth(&self) -> Arc<dyn ClientAuthService> {
        self.client_auth_service.clone()
    }

    fn staff(&self) -> Arc<dyn StaffService> {
        self.staff_service.clone()
    }
}
