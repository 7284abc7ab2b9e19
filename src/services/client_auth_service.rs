//! Client authentication service - self-registration and sign-in for
//! customers of the public site.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{normalize_login, ClientProfile, ClientRegistration, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// Client authentication trait for dependency injection.
#[async_trait]
pub trait ClientAuthService: Send + Sync {
    /// Register a new client; duplicate login or email is a conflict.
    async fn register(&self, registration: ClientRegistration) -> AppResult<ClientProfile>;

    /// Check credentials and return the client profile.
    async fn authenticate(&self, login: &str, password: &str) -> AppResult<ClientProfile>;
}

/// Concrete implementation of ClientAuthService using Unit of Work.
pub struct ClientAuthenticator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ClientAuthenticator<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ClientAuthService for ClientAuthenticator<U> {
    async fn register(&self, registration: ClientRegistration) -> AppResult<ClientProfile> {
        let client = registration.into_new()?;
        let password_hash = Password::new(&client.password)?.into_string();

        let result = with_transaction!(self.uow, |ctx| {
            let clients = ctx.clients();
            if clients
                .find_by_login_or_email(&client.login, &client.email)
                .await?
                .is_some()
            {
                return Err(AppError::conflict("Client"));
            }
            clients.create(client, password_hash).await
        });

        // A concurrent registration that slipped past the check trips the
        // unique index instead
        let client = result.map_err(|e| match e {
            AppError::Conflict(_) => AppError::conflict("Client"),
            other => other,
        })?;

        tracing::info!(client_id = client.id, "Client registered");
        Ok(ClientProfile::from(client))
    }

    async fn authenticate(&self, login: &str, password: &str) -> AppResult<ClientProfile> {
        let login = normalize_login(login);
        let password = password.trim();
        if login.is_empty() || password.is_empty() {
            return Err(AppError::validation("Login and password are required"));
        }

        let client = self.uow.clients().find_by_login(&login).await?;
        let stored = client.as_ref().map(|c| c.password_hash.as_str());

        if !Password::verify_optional(stored, password) {
            tracing::debug!(login = %login, "Client sign-in rejected");
            return Err(AppError::InvalidCredentials);
        }

        client
            .map(ClientProfile::from)
            .ok_or(AppError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Client;
    use crate::infra::MockClientRepository;
    use crate::services::test_support::TestUnitOfWork;
    use chrono::Utc;

    fn client_with_password(password: &str) -> Client {
        Client {
            id: 1,
            full_name: "Ann".into(),
            email: "ann@x.com".into(),
            phone: String::new(),
            login: "ann1".into(),
            password_hash: Password::new(password).unwrap().into_string(),
            created_at: Utc::now(),
        }
    }

    fn service(repo: MockClientRepository) -> impl ClientAuthService {
        let uow = TestUnitOfWork {
            clients: Some(repo),
            ..Default::default()
        };
        ClientAuthenticator::new(Arc::new(uow.build()))
    }

    #[tokio::test]
    async fn test_authenticate_success_normalizes_login() {
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_login()
            .withf(|login| login == "ann1")
            .returning(|_| Ok(Some(client_with_password("secret"))));

        let profile = service(repo).authenticate(" ANN1 ", "secret").await.unwrap();
        assert_eq!(profile.login, "ann1");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_login()
            .returning(|_| Ok(Some(client_with_password("secret"))));

        let result = service(repo).authenticate("ann1", "nope").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_login() {
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_login().returning(|_| Ok(None));

        let result = service(repo).authenticate("ghost", "secret").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_empty_password_never_reaches_store() {
        let result = service(MockClientRepository::new())
            .authenticate("ann1", "")
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_validates_before_transaction() {
        let result = service(MockClientRepository::new())
            .register(ClientRegistration {
                full_name: "Ann".into(),
                email: String::new(),
                login: "ann1".into(),
                password: "secret".into(),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
