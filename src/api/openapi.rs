//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    booking_handler, catalog_handler, client_auth_handler, user_handler, CreatedResponse,
    MessageResponse,
};
use crate::domain::{
    BookingDraft, BookingResponse, BookingStats, CatalogEntry, CatalogEntryDraft, ClientProfile,
    ClientRegistration, StaffRole, StaffUserDraft, StaffUserResponse,
};
use crate::services::StaffSession;

/// OpenAPI documentation for the cleaning booking API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cleaning Booking API",
        version = "0.1.0",
        description = "Bookings, service catalog, client accounts and staff administration for a cleaning service",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Booking endpoints
        booking_handler::list_bookings,
        booking_handler::get_booking,
        booking_handler::booking_stats,
        booking_handler::create_booking,
        booking_handler::update_booking,
        booking_handler::update_booking_by_query,
        booking_handler::delete_booking,
        booking_handler::delete_booking_by_query,
        // Catalog endpoints
        catalog_handler::list_services,
        catalog_handler::create_service,
        catalog_handler::update_service,
        catalog_handler::delete_service,
        // Client endpoints
        client_auth_handler::client_auth,
        // Staff endpoints
        user_handler::list_users,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::login,
    ),
    components(
        schemas(
            // Domain types
            BookingDraft,
            BookingResponse,
            BookingStats,
            CatalogEntry,
            CatalogEntryDraft,
            ClientRegistration,
            ClientProfile,
            StaffRole,
            StaffUserDraft,
            StaffUserResponse,
            StaffSession,
            // Handler types
            CreatedResponse,
            MessageResponse,
            booking_handler::BookingUpdateRequest,
            booking_handler::BookingUpdated,
            client_auth_handler::ClientAuthRequest,
            client_auth_handler::ClientLoginRequest,
            client_auth_handler::ClientAuthResponse,
            user_handler::StaffLoginRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Bookings", description = "Cleaning requests from the public form"),
        (name = "Services", description = "Service catalog shown to clients"),
        (name = "Client Auth", description = "Client registration and sign-in"),
        (name = "Users", description = "Staff account administration")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /users/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_route_groups() {
        let doc = ApiDoc::openapi();
        for path in ["/bookings", "/bookings/{id}", "/services", "/client-auth", "/users/login"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
