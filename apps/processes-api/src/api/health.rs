//! Readiness probe with a real database check.

use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::json;

/// 503 as soon as shutdown begins so load balancers stop routing here,
/// otherwise the result of pinging PostgreSQL.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    if state.shutdown.is_shutting_down() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "shutting_down" })),
        )
            .into_response();
    }

    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            let status = database::postgres::check_health_detailed(&state.db).await;
            tracing::debug!(response_time_ms = status.response_time_ms, "Database ping");
            if status.healthy {
                Ok(())
            } else {
                Err(status.message.unwrap_or_else(|| "Database ping failed".to_string()))
            }
        }),
    )];

    run_health_checks(checks).await.into_response()
}
