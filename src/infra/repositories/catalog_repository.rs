//! Service catalog repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::entities::catalog_service::{self, ActiveModel, Entity as CatalogEntity};
use crate::domain::{CatalogEntry, CatalogEntryChanges, NewCatalogEntry};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Catalog repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All entries in insertion order
    async fn list(&self) -> AppResult<Vec<CatalogEntry>>;

    async fn create(&self, entry: NewCatalogEntry) -> AppResult<CatalogEntry>;

    /// Apply the present fields; `NotFound` for an unknown id.
    async fn update(&self, id: i32, changes: CatalogEntryChanges) -> AppResult<CatalogEntry>;

    /// Hard delete, returns the number of removed rows
    async fn delete(&self, id: i32) -> AppResult<u64>;
}

/// Concrete implementation of CatalogRepository
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn list(&self) -> AppResult<Vec<CatalogEntry>> {
        let models = CatalogEntity::find()
            .order_by_asc(catalog_service::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(CatalogEntry::from).collect())
    }

    async fn create(&self, entry: NewCatalogEntry) -> AppResult<CatalogEntry> {
        let active_model = ActiveModel {
            title: Set(entry.title),
            description: Set(entry.description),
            icon: Set(entry.icon),
            price: Set(entry.price),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(CatalogEntry::from(model))
    }

    async fn update(&self, id: i32, changes: CatalogEntryChanges) -> AppResult<CatalogEntry> {
        let model = CatalogEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        if changes == CatalogEntryChanges::default() {
            return Ok(CatalogEntry::from(model));
        }

        let mut active: ActiveModel = model.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(icon) = changes.icon {
            active.icon = Set(icon);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }

        let model = active.update(&self.db).await?;
        Ok(CatalogEntry::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = CatalogEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Database;

    async fn store() -> CatalogStore {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        CatalogStore::new(db.get_connection())
    }

    fn entry(title: &str) -> NewCatalogEntry {
        NewCatalogEntry {
            title: title.into(),
            description: "Desc".into(),
            icon: "Sparkles".into(),
            price: "2000".into(),
        }
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let store = store().await;
        store.create(entry("First")).await.unwrap();
        store.create(entry("Second")).await.unwrap();

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let store = store().await;
        let created = store.create(entry("First")).await.unwrap();

        let updated = store
            .update(
                created.id,
                CatalogEntryChanges {
                    price: Some("3000".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, "3000");
        assert_eq!(updated.title, "First");
        assert_eq!(updated.icon, "Sparkles");

        let unchanged = store
            .update(created.id, CatalogEntryChanges::default())
            .await
            .unwrap();
        assert_eq!(unchanged.price, "3000");
    }

    #[tokio::test]
    async fn test_missing_rows() {
        let store = store().await;

        let result = store.update(5, CatalogEntryChanges::default()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
        assert_eq!(store.delete(5).await.unwrap(), 0);
    }
}
