//! Client self-service sign-up and sign-in on a single endpoint.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use super::method_not_allowed;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::group_layers;
use crate::api::AppState;
use crate::domain::{ClientProfile, ClientRegistration};
use crate::errors::AppResult;

const ALLOWED_HEADERS: &[&str] = &["content-type"];

/// Client sign-in fields
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct ClientLoginRequest {
    #[serde(default)]
    #[validate(length(max = 64, message = "Login is too long"))]
    #[schema(example = "ann1")]
    pub login: String,
    #[serde(default)]
    #[validate(length(max = 128, message = "Password is too long"))]
    #[schema(example = "secret")]
    pub password: String,
}

/// Request body, dispatched on `action`
#[derive(Debug, Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ClientAuthRequest {
    Register(ClientRegistration),
    Login(ClientLoginRequest),
}

impl Validate for ClientAuthRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            ClientAuthRequest::Register(registration) => registration.validate(),
            ClientAuthRequest::Login(login) => login.validate(),
        }
    }
}

/// Result of a register or login action
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientAuthResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    pub user: ClientProfile,
}

/// Create client auth routes
pub fn client_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(client_auth).fallback(method_not_allowed))
        .layer(group_layers(&[Method::POST], ALLOWED_HEADERS))
}

/// Register (`action: register`) or sign in (`action: login`) a client
#[utoipa::path(
    post,
    path = "/client-auth",
    tag = "Client Auth",
    request_body = ClientAuthRequest,
    responses(
        (status = 201, description = "Client registered", body = ClientAuthResponse),
        (status = 200, description = "Login successful", body = ClientAuthResponse),
        (status = 400, description = "Validation error, unknown action or duplicate login/email"),
        (status = 401, description = "Invalid login or password")
    )
)]
pub async fn client_auth(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ClientAuthRequest>,
) -> AppResult<(StatusCode, Json<ClientAuthResponse>)> {
    let service = state.client_auth()?;

    match request {
        ClientAuthRequest::Register(registration) => {
            let user = service.register(registration).await?;
            Ok((
                StatusCode::CREATED,
                Json(ClientAuthResponse {
                    message: "Registration successful".to_string(),
                    user,
                }),
            ))
        }
        ClientAuthRequest::Login(credentials) => {
            let user = service
                .authenticate(&credentials.login, &credentials.password)
                .await?;
            Ok((
                StatusCode::OK,
                Json(ClientAuthResponse {
                    message: "Login successful".to_string(),
                    user,
                }),
            ))
        }
    }
}
