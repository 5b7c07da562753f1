//! CORS for every route, driven by `CorsConfig`.

use std::str::FromStr;
use std::time::Duration;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::domain::config::CorsConfig;
use crate::domain::REQUEST_ID_HEADER;

/// Build the CORS layer. A `"*"` entry in the origin or header list allows
/// any value; the request id header is always exposed to browsers.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::new();
    }

    let origin = if has_wildcard(&config.allowed_origins) {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>(&config.allowed_origins))
    };
    let headers = if has_wildcard(&config.allowed_headers) {
        AllowHeaders::any()
    } else {
        AllowHeaders::list(parse_all::<HeaderName>(&config.allowed_headers))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(parse_all::<Method>(&config.allowed_methods))
        .allow_headers(headers)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(Duration::from_secs(config.max_age))
}

fn has_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

// Malformed entries are rejected by `GatewayConfig::validate`.
fn parse_all<T: FromStr>(values: &[String]) -> Vec<T> {
    values.iter().filter_map(|v| v.parse().ok()).collect()
}

/// Report every answered OPTIONS request as 204.
///
/// tower-http answers CORS preflights itself with 200; this keeps the
/// status uniform with plain OPTIONS requests that reach the router.
pub async fn preflight_no_content(req: Request, next: Next) -> Response {
    let is_options = req.method() == Method::OPTIONS;
    let mut response = next.run(req).await;
    if is_options && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
