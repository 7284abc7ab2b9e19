//! Record id extractors that answer malformed ids with the JSON error body.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct IdQuery {
    id: Option<i32>,
}

/// Optional `?id=` query parameter.
#[derive(Debug, Clone, Copy)]
pub struct QueryId(pub Option<i32>);

impl QueryId {
    /// The id, or a validation error naming `entity`.
    pub fn required(self, entity: &str) -> AppResult<i32> {
        self.0
            .ok_or_else(|| AppError::validation(format!("{} ID is required", entity)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<IdQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(QueryId(query.id))
    }
}

/// Single `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(PathId(id))
    }
}
