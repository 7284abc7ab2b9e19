//! Service catalog handlers. The catalog is edited without any role check.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::Json,
    routing::get,
    Router,
};

use super::{method_not_allowed, CreatedResponse, MessageResponse};
use crate::api::extractors::{QueryId, ValidatedJson};
use crate::api::middleware::group_layers;
use crate::api::AppState;
use crate::domain::{CatalogEntry, CatalogEntryDraft};
use crate::errors::AppResult;

const ALLOWED_HEADERS: &[&str] = &["content-type"];

/// Create catalog routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_services)
                .post(create_service)
                .put(update_service)
                .delete(delete_service)
                .fallback(method_not_allowed),
        )
        .layer(group_layers(
            &[Method::GET, Method::POST, Method::PUT, Method::DELETE],
            ALLOWED_HEADERS,
        ))
}

/// List catalog entries in id order
#[utoipa::path(
    get,
    path = "/services",
    tag = "Services",
    responses((status = 200, description = "Catalog entries", body = [CatalogEntry]))
)]
pub async fn list_services(State(state): State<AppState>) -> AppResult<Json<Vec<CatalogEntry>>> {
    Ok(Json(state.catalog()?.list().await?))
}

/// Add a catalog entry
#[utoipa::path(
    post,
    path = "/services",
    tag = "Services",
    request_body = CatalogEntryDraft,
    responses(
        (status = 201, description = "Entry created", body = CreatedResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_service(
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<CatalogEntryDraft>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let entry = state.catalog()?.create(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(entry.id, "Service created")),
    ))
}

/// Replace the supplied fields of a catalog entry
#[utoipa::path(
    put,
    path = "/services",
    tag = "Services",
    params(("id" = i32, Query, description = "Catalog entry ID")),
    request_body = CatalogEntryDraft,
    responses(
        (status = 200, description = "Entry updated", body = CatalogEntry),
        (status = 400, description = "Missing id or validation error"),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn update_service(
    State(state): State<AppState>,
    id: QueryId,
    ValidatedJson(draft): ValidatedJson<CatalogEntryDraft>,
) -> AppResult<Json<CatalogEntry>> {
    let id = id.required("Service")?;
    Ok(Json(state.catalog()?.update(id, draft).await?))
}

/// Remove a catalog entry; unknown ids succeed
#[utoipa::path(
    delete,
    path = "/services",
    tag = "Services",
    params(("id" = i32, Query, description = "Catalog entry ID")),
    responses(
        (status = 200, description = "Entry deleted", body = MessageResponse),
        (status = 400, description = "Missing id")
    )
)]
pub async fn delete_service(
    State(state): State<AppState>,
    id: QueryId,
) -> AppResult<Json<MessageResponse>> {
    let id = id.required("Service")?;
    state.catalog()?.delete(id).await?;
    Ok(Json(MessageResponse::new("Service deleted")))
}
