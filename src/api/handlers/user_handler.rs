//! Staff user handlers.
//!
//! Listing is open. Create, update and delete check the caller's role
//! before the request body is even looked at, so a forbidden caller gets
//! 403 whatever it sent.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::{method_not_allowed, MessageResponse};
use crate::api::extractors::{QueryId, ValidatedJson};
use crate::api::middleware::{group_layers, CallerRole};
use crate::api::AppState;
use crate::domain::{authorize, StaffOperation, StaffUserDraft, StaffUserResponse};
use crate::errors::{AppError, AppResult};
use crate::services::StaffSession;

const ALLOWED_HEADERS: &[&str] = &["content-type", "x-user-role", "x-user-id", "authorization"];

/// Staff sign-in request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct StaffLoginRequest {
    #[serde(default)]
    #[validate(length(max = 64, message = "Login is too long"))]
    #[schema(example = "anna")]
    pub login: String,
    #[serde(default)]
    #[validate(length(max = 128, message = "Password is too long"))]
    #[schema(example = "s3cret")]
    pub password: String,
}

/// Create staff user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .put(update_user)
                .delete(delete_user)
                .fallback(method_not_allowed),
        )
        .route("/login", post(login).fallback(method_not_allowed))
        .layer(group_layers(
            &[Method::GET, Method::POST, Method::PUT, Method::DELETE],
            ALLOWED_HEADERS,
        ))
}

/// List staff users, newest first
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses((status = 200, description = "Staff users", body = [StaffUserResponse]))
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<StaffUserResponse>>> {
    let users = state.staff()?.list().await?;
    Ok(Json(users.into_iter().map(StaffUserResponse::from).collect()))
}

/// Create a staff user (super_admin only)
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = StaffUserDraft,
    params(("X-User-Role" = Option<String>, Header, description = "Caller role when no bearer token is sent")),
    responses(
        (status = 201, description = "Staff user created", body = StaffUserResponse),
        (status = 400, description = "Validation error or login taken"),
        (status = 403, description = "Caller is not super_admin")
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    CallerRole(role): CallerRole,
    payload: Result<ValidatedJson<StaffUserDraft>, AppError>,
) -> AppResult<(StatusCode, Json<StaffUserResponse>)> {
    authorize(role, StaffOperation::Create)?;
    let ValidatedJson(draft) = payload?;

    let user = state.staff()?.create(role, draft).await?;
    Ok((StatusCode::CREATED, Json(StaffUserResponse::from(user))))
}

/// Update a staff user (super_admin only)
///
/// Empty login or password keep the stored values.
#[utoipa::path(
    put,
    path = "/users",
    tag = "Users",
    request_body = StaffUserDraft,
    params(
        ("id" = i32, Query, description = "Staff user ID"),
        ("X-User-Role" = Option<String>, Header, description = "Caller role when no bearer token is sent")
    ),
    responses(
        (status = 200, description = "Staff user updated", body = StaffUserResponse),
        (status = 400, description = "Missing id or validation error"),
        (status = 403, description = "Caller is not super_admin"),
        (status = 404, description = "Staff user not found")
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    CallerRole(role): CallerRole,
    id: Result<QueryId, AppError>,
    payload: Result<ValidatedJson<StaffUserDraft>, AppError>,
) -> AppResult<Json<StaffUserResponse>> {
    authorize(role, StaffOperation::Update)?;
    let id = id?.required("User")?;
    let ValidatedJson(draft) = payload?;

    let user = state.staff()?.update(role, id, draft).await?;
    Ok(Json(StaffUserResponse::from(user)))
}

/// Delete a staff user (super_admin only)
#[utoipa::path(
    delete,
    path = "/users",
    tag = "Users",
    params(
        ("id" = i32, Query, description = "Staff user ID"),
        ("X-User-Role" = Option<String>, Header, description = "Caller role when no bearer token is sent")
    ),
    responses(
        (status = 200, description = "Staff user deleted", body = MessageResponse),
        (status = 400, description = "Missing id"),
        (status = 403, description = "Caller is not super_admin"),
        (status = 404, description = "Staff user not found")
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    CallerRole(role): CallerRole,
    id: Result<QueryId, AppError>,
) -> AppResult<Json<MessageResponse>> {
    authorize(role, StaffOperation::Delete)?;
    let id = id?.required("User")?;

    state.staff()?.delete(role, id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}

/// Staff sign-in; returns a bearer token
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Users",
    request_body = StaffLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = StaffSession),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid login or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<StaffLoginRequest>,
) -> AppResult<Json<StaffSession>> {
    let session = state
        .staff()?
        .login(&payload.login, &payload.password)
        .await?;
    Ok(Json(session))
}
