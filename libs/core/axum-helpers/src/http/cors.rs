use axum::http::{HeaderName, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::pagination::X_TOTAL_COUNT;

/// Response headers browsers may read: pagination plus `extra` (alert headers).
fn exposed_headers(extra: &[HeaderName]) -> Vec<HeaderName> {
    let mut exposed = vec![X_TOTAL_COUNT, header::LINK, header::LOCATION];
    exposed.extend_from_slice(extra);
    exposed
}

/// CORS for an explicit origin list, with credentials.
pub fn create_cors_layer(allowed_origins: impl Into<AllowOrigin>, expose: &[HeaderName]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .expose_headers(exposed_headers(expose))
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Any origin. Development only.
pub fn create_permissive_cors_layer(expose: &[HeaderName]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(exposed_headers(expose))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_headers_always_exposed() {
        let alert = HeaderName::from_static("x-processesapp-alert");
        let exposed = exposed_headers(std::slice::from_ref(&alert));

        assert!(exposed.contains(&X_TOTAL_COUNT));
        assert!(exposed.contains(&header::LINK));
        assert!(exposed.contains(&alert));
    }
}
