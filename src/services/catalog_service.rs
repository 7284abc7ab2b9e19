//! Catalog service - the list of cleaning services offered on the site.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CatalogEntry, CatalogEntryDraft};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// All entries ordered by id
    async fn list(&self) -> AppResult<Vec<CatalogEntry>>;

    async fn create(&self, draft: CatalogEntryDraft) -> AppResult<CatalogEntry>;

    /// Replace the fields present in `draft`
    async fn update(&self, id: i32, draft: CatalogEntryDraft) -> AppResult<CatalogEntry>;

    /// Remove an entry; unknown ids are not an error.
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CatalogService using Unit of Work.
pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn list(&self) -> AppResult<Vec<CatalogEntry>> {
        self.uow.catalog().list().await
    }

    async fn create(&self, draft: CatalogEntryDraft) -> AppResult<CatalogEntry> {
        let entry = self.uow.catalog().create(draft.into_new()?).await?;
        tracing::info!(service_id = entry.id, title = %entry.title, "Catalog entry created");
        Ok(entry)
    }

    async fn update(&self, id: i32, draft: CatalogEntryDraft) -> AppResult<CatalogEntry> {
        let entry = self.uow.catalog().update(id, draft.into_changes()).await?;
        tracing::info!(service_id = entry.id, "Catalog entry updated");
        Ok(entry)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let removed = self.uow.catalog().delete(id).await?;
        tracing::info!(service_id = id, removed, "Catalog entry delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SERVICE_ICON;
    use crate::errors::AppError;
    use crate::infra::MockCatalogRepository;
    use crate::services::test_support::TestUnitOfWork;
    use mockall::predicate::eq;

    fn service(repo: MockCatalogRepository) -> impl CatalogService {
        let uow = TestUnitOfWork {
            catalog: Some(repo),
            ..Default::default()
        };
        CatalogManager::new(Arc::new(uow.build()))
    }

    #[tokio::test]
    async fn test_create_applies_default_icon() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_create()
            .withf(|e| e.icon == DEFAULT_SERVICE_ICON)
            .returning(|e| {
                Ok(CatalogEntry {
                    id: 1,
                    title: e.title,
                    description: e.description,
                    icon: e.icon,
                    price: e.price,
                })
            });

        let entry = service(repo)
            .create(CatalogEntryDraft {
                title: Some("Windows".into()),
                description: Some("Inside and out".into()),
                icon: None,
                price: Some("от 2000 ₽".into()),
            })
            .await
            .unwrap();
        assert_eq!(entry.price, "от 2000 ₽");
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let result = service(MockCatalogRepository::new())
            .create(CatalogEntryDraft::default())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_passes_not_found_through() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_update()
            .with(eq(42), mockall::predicate::always())
            .returning(|_, _| Err(AppError::NotFound));

        let result = service(repo).update(42, CatalogEntryDraft::default()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_unknown_is_ok() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_delete().returning(|_| Ok(0));
        assert!(service(repo).delete(8).await.is_ok());
    }
}
