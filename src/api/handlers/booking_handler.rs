//! Booking handlers.
//!
//! The public form creates bookings; staff read, update and delete them.
//! Update and delete accept the id either as a path segment or as `?id=`.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{method_not_allowed, CreatedResponse, MessageResponse};
use crate::api::extractors::{PathId, QueryId, ValidatedJson};
use crate::api::middleware::group_layers;
use crate::api::AppState;
use crate::domain::{BookingChanges, BookingDraft, BookingResponse, BookingStats};
use crate::errors::AppResult;

const ALLOWED_HEADERS: &[&str] = &["content-type", "x-user-id"];

/// Staff edits to a booking
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct BookingUpdateRequest {
    /// New status; any non-empty value
    #[validate(length(max = 64, message = "Status is too long"))]
    #[schema(example = "done")]
    pub status: Option<String>,
    /// Staff id to assign, `null` to clear
    #[serde(default, alias = "assigneeId", deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i32>, example = 4)]
    pub assignee_id: Option<Option<i32>>,
}

impl From<BookingUpdateRequest> for BookingChanges {
    fn from(request: BookingUpdateRequest) -> Self {
        Self {
            status: request.status,
            assignee_id: request.assignee_id,
        }
    }
}

/// Tells an explicit `null` apart from an absent field.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Result of a booking update
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingUpdated {
    #[schema(example = "Booking updated")]
    pub message: String,
    pub booking: BookingResponse,
}

/// Create booking routes
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_bookings)
                .post(create_booking)
                .put(update_booking_by_query)
                .delete(delete_booking_by_query)
                .fallback(method_not_allowed),
        )
        .route("/stats", get(booking_stats).fallback(method_not_allowed))
        .route(
            "/:id",
            get(get_booking)
                .put(update_booking)
                .delete(delete_booking)
                .fallback(method_not_allowed),
        )
        .layer(group_layers(
            &[Method::GET, Method::POST, Method::PUT, Method::DELETE],
            ALLOWED_HEADERS,
        ))
}

/// List bookings, newest first, or fetch one with `?id=`
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "Bookings",
    params(("id" = Option<i32>, Query, description = "Return only this booking")),
    responses(
        (status = 200, description = "Bookings, or the single booking when id is given", body = [BookingResponse]),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    QueryId(id): QueryId,
) -> AppResult<Response> {
    let bookings = state.bookings()?;

    if let Some(id) = id {
        let booking = bookings.get(id).await?;
        return Ok(Json(BookingResponse::from(booking)).into_response());
    }

    let list: Vec<BookingResponse> = bookings
        .list()
        .await?
        .into_iter()
        .map(BookingResponse::from)
        .collect();
    Ok(Json(list).into_response())
}

/// Get a booking by id
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.bookings()?.get(id).await?;
    Ok(Json(BookingResponse::from(booking)))
}

/// Booking counts per status
#[utoipa::path(
    get,
    path = "/bookings/stats",
    tag = "Bookings",
    responses((status = 200, description = "Booking counts", body = BookingStats))
)]
pub async fn booking_stats(State(state): State<AppState>) -> AppResult<Json<BookingStats>> {
    Ok(Json(state.bookings()?.stats().await?))
}

/// Submit a booking from the public form
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    request_body = BookingDraft,
    responses(
        (status = 201, description = "Booking created", body = CreatedResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<BookingDraft>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let booking = state.bookings()?.create(draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(booking.id, "Booking created successfully")),
    ))
}

/// Change status and/or assignee of a booking
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = BookingUpdateRequest,
    responses(
        (status = 200, description = "Booking updated", body = BookingUpdated),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_booking(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(payload): ValidatedJson<BookingUpdateRequest>,
) -> AppResult<Json<BookingUpdated>> {
    apply_update(&state, id, payload).await
}

/// Same as `PUT /bookings/{id}` with the id in the query string
#[utoipa::path(
    put,
    path = "/bookings",
    tag = "Bookings",
    params(("id" = i32, Query, description = "Booking ID")),
    request_body = BookingUpdateRequest,
    responses(
        (status = 200, description = "Booking updated", body = BookingUpdated),
        (status = 400, description = "Missing id or validation error"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_booking_by_query(
    State(state): State<AppState>,
    id: QueryId,
    ValidatedJson(payload): ValidatedJson<BookingUpdateRequest>,
) -> AppResult<Json<BookingUpdated>> {
    apply_update(&state, id.required("Booking")?, payload).await
}

async fn apply_update(
    state: &AppState,
    id: i32,
    payload: BookingUpdateRequest,
) -> AppResult<Json<BookingUpdated>> {
    let booking = state.bookings()?.update(id, payload.into()).await?;

    Ok(Json(BookingUpdated {
        message: "Booking updated".to_string(),
        booking: BookingResponse::from(booking),
    }))
}

/// Delete a booking; unknown ids succeed
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    responses((status = 200, description = "Booking deleted", body = MessageResponse))
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<MessageResponse>> {
    state.bookings()?.delete(id).await?;
    Ok(Json(MessageResponse::new("Booking deleted")))
}

/// Same as `DELETE /bookings/{id}` with the id in the query string
#[utoipa::path(
    delete,
    path = "/bookings",
    tag = "Bookings",
    params(("id" = i32, Query, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking deleted", body = MessageResponse),
        (status = 400, description = "Missing id")
    )
)]
pub async fn delete_booking_by_query(
    State(state): State<AppState>,
    id: QueryId,
) -> AppResult<Json<MessageResponse>> {
    let id = id.required("Booking")?;
    state.bookings()?.delete(id).await?;
    Ok(Json(MessageResponse::new("Booking deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let absent: BookingUpdateRequest = serde_json::from_str(r#"{"status":"done"}"#).unwrap();
        assert_eq!(absent.assignee_id, None);

        let cleared: BookingUpdateRequest = serde_json::from_str(r#"{"assignee_id":null}"#).unwrap();
        assert_eq!(cleared.assignee_id, Some(None));

        let set: BookingUpdateRequest = serde_json::from_str(r#"{"assigneeId":4}"#).unwrap();
        assert_eq!(set.assignee_id, Some(Some(4)));
    }
}
