//! Staff user repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::staff_user::{self, ActiveModel, Entity as StaffEntity};
use crate::domain::{NewStaffUser, StaffUser, StaffUserChanges};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Staff repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<StaffUser>>;

    async fn find_by_login(&self, login: &str) -> AppResult<Option<StaffUser>>;

    /// All staff accounts, newest first
    async fn list(&self) -> AppResult<Vec<StaffUser>>;

    async fn create(&self, user: NewStaffUser, password_hash: String) -> AppResult<StaffUser>;

    /// Replace profile fields. `password_hash: None` keeps the stored hash.
    async fn update(
        &self,
        id: i32,
        changes: StaffUserChanges,
        password_hash: Option<String>,
    ) -> AppResult<StaffUser>;

    /// Hard delete, returns the number of removed rows
    async fn delete(&self, id: i32) -> AppResult<u64>;
}

/// Staff queries over any connection, pooled or transactional.
pub struct StaffQueries<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StaffQueries<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<StaffUser>> {
        let result = StaffEntity::find_by_id(id).one(self.db).await?;
        Ok(result.map(StaffUser::from))
    }

    pub async fn find_by_login(&self, login: &str) -> AppResult<Option<StaffUser>> {
        let result = StaffEntity::find()
            .filter(staff_user::Column::Login.eq(login))
            .one(self.db)
            .await?;

        Ok(result.map(StaffUser::from))
    }

    pub async fn list(&self) -> AppResult<Vec<StaffUser>> {
        let models = StaffEntity::find()
            .order_by_desc(staff_user::Column::CreatedAt)
            .order_by_desc(staff_user::Column::Id)
            .all(self.db)
            .await?;

        Ok(models.into_iter().map(StaffUser::from).collect())
    }

    pub async fn create(&self, user: NewStaffUser, password_hash: String) -> AppResult<StaffUser> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            full_name: Set(user.full_name),
            phone: Set(user.phone),
            login: Set(Some(user.login)),
            password_hash: Set(Some(password_hash)),
            role: Set(user.role.into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(self.db).await?;
        Ok(StaffUser::from(model))
    }

    pub async fn update(
        &self,
        id: i32,
        changes: StaffUserChanges,
        password_hash: Option<String>,
    ) -> AppResult<StaffUser> {
        let model = StaffEntity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.full_name = Set(changes.full_name);
        active.phone = Set(changes.phone);
        active.role = Set(changes.role.into());
        if let Some(login) = changes.login {
            active.login = Set(Some(login));
        }
        if let Some(hash) = password_hash {
            active.password_hash = Set(Some(hash));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(self.db).await?;
        Ok(StaffUser::from(model))
    }

    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = StaffEntity::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected)
    }
}

/// Pool-backed implementation of StaffRepository
pub struct StaffStore {
    db: DatabaseConnection,
}

impl StaffStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn queries(&self) -> StaffQueries<'_, DatabaseConnection> {
        StaffQueries::new(&self.db)
    }
}

#[async_trait]
impl StaffRepository for StaffStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<StaffUser>> {
        self.queries().find_by_id(id).await
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<StaffUser>> {
        self.queries().find_by_login(login).await
    }

    async fn list(&self) -> AppResult<Vec<StaffUser>> {
        self.queries().list().await
    }

    async fn create(&self, user: NewStaffUser, password_hash: String) -> AppResult<StaffUser> {
        self.queries().create(user, password_hash).await
    }

    async fn update(
        &self,
        id: i32,
        changes: StaffUserChanges,
        password_hash: Option<String>,
    ) -> AppResult<StaffUser> {
        self.queries().update(id, changes, password_hash).await
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        self.queries().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StaffRole;
    use crate::infra::Database;

    async fn store() -> StaffStore {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        StaffStore::new(db.get_connection())
    }

    fn new_user(login: &str) -> NewStaffUser {
        NewStaffUser {
            full_name: "Anna".into(),
            phone: "1".into(),
            role: StaffRole::Manager,
            login: login.into(),
            password: "pw".into(),
        }
    }

    #[tokio::test]
    async fn test_update_without_hash_keeps_it() {
        let store = store().await;
        let user = store.create(new_user("anna"), "hash-1".into()).await.unwrap();

        let changes = StaffUserChanges {
            full_name: "Anna P".into(),
            phone: "2".into(),
            role: StaffRole::Admin,
            login: None,
            password: None,
        };
        let updated = store.update(user.id, changes, None).await.unwrap();

        assert_eq!(updated.full_name, "Anna P");
        assert_eq!(updated.role, StaffRole::Admin);
        assert_eq!(updated.login.as_deref(), Some("anna"));
        assert_eq!(updated.password_hash.as_deref(), Some("hash-1"));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let store = store().await;
        let changes = StaffUserChanges {
            full_name: "X".into(),
            phone: "1".into(),
            role: StaffRole::Operator,
            login: None,
            password: None,
        };

        assert!(matches!(
            store.update(42, changes, None).await,
            Err(AppError::NotFound)
        ));
        assert_eq!(store.delete(42).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_unique_login() {
        let store = store().await;
        store.create(new_user("anna"), "h".into()).await.unwrap();
        store.create(new_user("boris"), "h".into()).await.unwrap();

        let logins: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|u| u.login)
            .collect();
        assert_eq!(logins, vec!["boris", "anna"]);

        assert!(matches!(
            store.create(new_user("anna"), "h".into()).await,
            Err(AppError::Conflict(_))
        ));
    }
}
