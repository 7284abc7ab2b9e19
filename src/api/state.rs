//! Application state - Dependency injection container.
//!
//! Handlers reach services through the container. Without a configured
//! store the container is absent and every store-backed request fails
//! with a configuration error instead of the server refusing to start.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Notifier};
use crate::services::{
    BookingService, CatalogService, ClientAuthService, ServiceContainer, Services, StaffService,
};

const STORE_NOT_CONFIGURED: &str = "DATABASE_URL not configured";

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Database connection, kept for health checks
    pub database: Option<Arc<Database>>,
    services: Option<Arc<dyn ServiceContainer>>,
}

impl AppState {
    /// Wire the default service container on top of `database`, if any.
    pub fn from_config(
        config: Config,
        database: Option<Arc<Database>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let services = database.as_ref().map(|db| {
            Arc::new(Services::from_connection(
                db.get_connection(),
                config.clone(),
                notifier,
            )) as Arc<dyn ServiceContainer>
        });

        Self::new(config, database, services)
    }

    /// Create state with an explicitly injected container.
    pub fn new(
        config: Config,
        database: Option<Arc<Database>>,
        services: Option<Arc<dyn ServiceContainer>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            database,
            services,
        }
    }

    fn container(&self) -> AppResult<&Arc<dyn ServiceContainer>> {
        self.services
            .as_ref()
            .ok_or_else(|| AppError::configuration(STORE_NOT_CONFIGURED))
    }

    pub fn bookings(&self) -> AppResult<Arc<dyn BookingService>> {
        Ok(self.container()?.bookings())
    }

    pub fn catalog(&self) -> AppResult<Arc<dyn CatalogService>> {
        Ok(self.container()?.catalog())
    }

    pub fn client_auth(&self) -> AppResult<Arc<dyn ClientAuthService>> {
        Ok(self.container()?.client_auth())
    }

    pub fn staff(&self) -> AppResult<Arc<dyn StaffService>> {
        Ok(self.container()?.staff())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::NoopNotifier;

    fn config() -> Config {
        Config::new(None, "test-secret-key-that-is-long-enough!!").unwrap()
    }

    #[test]
    fn test_missing_store_is_configuration_error() {
        let state = AppState::from_config(config(), None, Arc::new(NoopNotifier));
        match state.bookings() {
            Err(AppError::Configuration(msg)) => assert_eq!(msg, STORE_NOT_CONFIGURED),
            _ => panic!("expected configuration error"),
        }
        assert!(state.staff().is_err());
    }
}
