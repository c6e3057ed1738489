//! Entity alert headers (`X-<app>-alert`, `X-<app>-error`, `X-<app>-params`).
//!
//! Successful mutations return a translation key such as
//! `processesApp.process.created` plus the affected identifier. Rejected
//! requests return `error.<key>` with the entity name as params. Clients use
//! these to render notifications without parsing bodies.

use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, header::InvalidHeaderName},
    response::Response,
};

/// Builds alert headers for one application name.
#[derive(Debug, Clone)]
pub struct HeaderAlerts {
    app_name: String,
    alert: HeaderName,
    error: HeaderName,
    params: HeaderName,
}

impl HeaderAlerts {
    pub fn new(app_name: impl Into<String>) -> Result<Self, InvalidHeaderName> {
        let app_name = app_name.into();
        let header = |suffix: &str| HeaderName::try_from(format!("x-{app_name}-{suffix}"));

        Ok(Self {
            alert: header("alert")?,
            error: header("error")?,
            params: header("params")?,
            app_name,
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Header names to expose through CORS.
    pub fn header_names(&self) -> [HeaderName; 3] {
        [self.alert.clone(), self.error.clone(), self.params.clone()]
    }

    pub fn entity_created(&self, entity_name: &str, param: &str) -> HeaderMap {
        self.alert(&format!("{}.{entity_name}.created", self.app_name), param)
    }

    pub fn entity_updated(&self, entity_name: &str, param: &str) -> HeaderMap {
        self.alert(&format!("{}.{entity_name}.updated", self.app_name), param)
    }

    pub fn entity_deleted(&self, entity_name: &str, param: &str) -> HeaderMap {
        self.alert(&format!("{}.{entity_name}.deleted", self.app_name), param)
    }

    pub fn failure(&self, entity_name: &str, error_key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        insert_encoded(&mut headers, &self.error, &format!("error.{error_key}"));
        insert_encoded(&mut headers, &self.params, entity_name);
        headers
    }

    fn alert(&self, message: &str, param: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        insert_encoded(&mut headers, &self.alert, message);
        insert_encoded(&mut headers, &self.params, param);
        headers
    }
}

/// Percent-encoded values are always visible ASCII.
fn insert_encoded(headers: &mut HeaderMap, name: &HeaderName, value: &str) {
    if let Ok(value) = HeaderValue::from_str(&urlencoding::encode(value)) {
        headers.insert(name.clone(), value);
    }
}

/// Response extension describing a rejected entity operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureAlert {
    pub entity_name: &'static str,
    pub error_key: &'static str,
}

/// Turns a [`FailureAlert`] extension into failure headers.
///
/// ```ignore
/// router.layer(axum::middleware::map_response_with_state(alerts, failure_alert_headers))
/// ```
pub async fn failure_alert_headers(State(alerts): State<HeaderAlerts>, mut response: Response) -> Response {
    if let Some(alert) = response.extensions().get::<FailureAlert>().copied() {
        let headers = alerts.failure(alert.entity_name, alert.error_key);
        response.headers_mut().extend(headers);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        middleware::map_response_with_state,
        routing::post,
    };
    use tower::ServiceExt;

    #[test]
    fn test_created_alert_names_app_and_entity() {
        let alerts = HeaderAlerts::new("processesApp").unwrap();
        let headers = alerts.entity_created("process", "7");

        assert_eq!(headers["x-processesapp-alert"], "processesApp.process.created");
        assert_eq!(headers["x-processesapp-params"], "7");
    }

    #[test]
    fn test_params_are_percent_encoded() {
        let alerts = HeaderAlerts::new("processesApp").unwrap();
        let headers = alerts.entity_updated("process", "a b/ü");

        assert_eq!(headers["x-processesapp-params"], "a%20b%2F%C3%BC");
    }

    #[test]
    fn test_failure_uses_error_key() {
        let alerts = HeaderAlerts::new("processesApp").unwrap();
        let headers = alerts.failure("process", "idnull");

        assert_eq!(headers["x-processesapp-error"], "error.idnull");
        assert_eq!(headers["x-processesapp-params"], "process");
        assert!(headers.get("x-processesapp-alert").is_none());
    }

    #[test]
    fn test_invalid_app_name_is_rejected() {
        assert!(HeaderAlerts::new("bad name").is_err());
    }

    #[tokio::test]
    async fn test_middleware_adds_failure_headers() {
        let alerts = HeaderAlerts::new("processesApp").unwrap();
        let app = Router::new()
            .route(
                "/",
                post(|| async {
                    Err::<(), _>(AppError::BadRequestAlert {
                        message: "A new process cannot already have an ID".to_string(),
                        entity_name: "process",
                        error_key: "idexists",
                    })
                }),
            )
            .layer(map_response_with_state(alerts, failure_alert_headers));

        let response = app
            .oneshot(Request::post("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["x-processesapp-error"], "error.idexists");
        assert_eq!(response.headers()["x-processesapp-params"], "process");
    }
}
