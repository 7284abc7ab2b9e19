//! HTTP request handlers, one module per route group.

pub mod booking_handler;
pub mod catalog_handler;
pub mod client_auth_handler;
pub mod user_handler;

pub use booking_handler::booking_routes;
pub use catalog_handler::catalog_routes;
pub use client_auth_handler::client_auth_routes;
pub use user_handler::user_routes;

use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::AppError;

/// Body for a freshly created record
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Booking created successfully")]
    pub message: String,
}

impl CreatedResponse {
    pub fn new(id: i32, message: &str) -> Self {
        Self {
            id,
            message: message.to_string(),
        }
    }
}

/// Plain acknowledgement
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Service deleted")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Fallback for methods a route group does not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
