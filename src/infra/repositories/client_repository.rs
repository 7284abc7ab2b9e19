//! Client repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};

use super::entities::client::{self, ActiveModel, Entity as ClientEntity};
use crate::domain::{Client, NewClient};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Client repository trait for dependency injection.
///
/// Logins and emails are stored normalized; lookups expect normalized input.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_by_login(&self, login: &str) -> AppResult<Option<Client>>;

    /// Any client holding either the login or the email
    async fn find_by_login_or_email(&self, login: &str, email: &str) -> AppResult<Option<Client>>;

    async fn create(&self, client: NewClient, password_hash: String) -> AppResult<Client>;
}

/// Client queries over any connection, pooled or transactional.
pub struct ClientQueries<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ClientQueries<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_login(&self, login: &str) -> AppResult<Option<Client>> {
        let result = ClientEntity::find()
            .filter(client::Column::Login.eq(login))
            .one(self.db)
            .await?;

        Ok(result.map(Client::from))
    }

    pub async fn find_by_login_or_email(
        &self,
        login: &str,
        email: &str,
    ) -> AppResult<Option<Client>> {
        let result = ClientEntity::find()
            .filter(
                Condition::any()
                    .add(client::Column::Login.eq(login))
                    .add(client::Column::Email.eq(email)),
            )
            .one(self.db)
            .await?;

        Ok(result.map(Client::from))
    }

    pub async fn create(&self, client: NewClient, password_hash: String) -> AppResult<Client> {
        let active_model = ActiveModel {
            full_name: Set(client.full_name),
            email: Set(client.email),
            phone: Set(client.phone),
            login: Set(client.login),
            password_hash: Set(password_hash),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(self.db).await?;
        Ok(Client::from(model))
    }
}

/// Pool-backed implementation of ClientRepository
pub struct ClientStore {
    db: DatabaseConnection,
}

impl ClientStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientRepository for ClientStore {
    async fn find_by_login(&self, login: &str) -> AppResult<Option<Client>> {
        ClientQueries::new(&self.db).find_by_login(login).await
    }

    async fn find_by_login_or_email(&self, login: &str, email: &str) -> AppResult<Option<Client>> {
        ClientQueries::new(&self.db)
            .find_by_login_or_email(login, email)
            .await
    }

    async fn create(&self, client: NewClient, password_hash: String) -> AppResult<Client> {
        ClientQueries::new(&self.db).create(client, password_hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::Database;

    async fn store() -> ClientStore {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        ClientStore::new(db.get_connection())
    }

    fn new_client(login: &str, email: &str) -> NewClient {
        NewClient {
            full_name: "Ann".into(),
            email: email.into(),
            phone: String::new(),
            login: login.into(),
            password: "secret".into(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = store().await;
        let created = store
            .create(new_client("ann1", "ann@x.com"), "hash".into())
            .await
            .unwrap();
        assert_eq!(created.password_hash, "hash");

        let by_login = store.find_by_login("ann1").await.unwrap().unwrap();
        assert_eq!(by_login.id, created.id);
        assert!(store.find_by_login("ann2").await.unwrap().is_none());

        let by_email = store
            .find_by_login_or_email("other", "ann@x.com")
            .await
            .unwrap();
        assert_eq!(by_email.map(|c| c.id), Some(created.id));
        assert!(store
            .find_by_login_or_email("other", "other@x.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_unique_index_rejects_duplicates_as_conflict() {
        let store = store().await;
        store
            .create(new_client("ann1", "ann@x.com"), "hash".into())
            .await
            .unwrap();

        let same_login = ClientQueries::new(&store.db)
            .create(new_client("ann1", "new@x.com"), "hash".into())
            .await;
        assert!(matches!(same_login, Err(AppError::Conflict(_))));

        let same_email = ClientQueries::new(&store.db)
            .create(new_client("ann2", "ann@x.com"), "hash".into())
            .await;
        assert!(matches!(same_email, Err(AppError::Conflict(_))));
    }
}
