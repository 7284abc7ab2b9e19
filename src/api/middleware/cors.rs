//! CORS policy per route group.
//!
//! Every group answers `OPTIONS` itself with an empty 200 and its own
//! method and header lists; all other responses carry the wildcard origin.

use std::time::Duration;

use axum::http::{header::HeaderName, HeaderValue, Method};
use tower::layer::util::{Identity, Stack};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CORS_MAX_AGE_SECONDS;

/// CORS layer for a route group.
pub fn group_cors(methods: &[Method], headers: &[&'static str]) -> CorsLayer {
    let mut allow_methods = methods.to_vec();
    if !allow_methods.contains(&Method::OPTIONS) {
        allow_methods.push(Method::OPTIONS);
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(allow_methods)
        .allow_headers(
            headers
                .iter()
                .copied()
                .map(HeaderName::from_static)
                .collect::<Vec<_>>(),
        )
        .max_age(Duration::from_secs(u64::from(CORS_MAX_AGE_SECONDS)))
}

/// Group CORS plus a JSON content type on responses that lack one
/// (preflight answers included).
pub fn group_layers(
    methods: &[Method],
    headers: &[&'static str],
) -> ServiceBuilder<Stack<CorsLayer, Stack<SetResponseHeaderLayer<HeaderValue>, Identity>>> {
    ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(group_cors(methods, headers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_preflight_short_circuits() {
        let app: Router = Router::new()
            .route("/", get(|| async { "never" }))
            .layer(group_layers(&[Method::GET], &["content-type", "x-user-id"]));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-max-age"], "86400");
        let methods = headers["access-control-allow-methods"].to_str().unwrap();
        assert!(methods.contains("GET") && methods.contains("OPTIONS"));
        let allowed = headers["access-control-allow-headers"].to_str().unwrap();
        assert!(allowed.contains("x-user-id"));
    }
}
