//! Shared application state.

use axum_helpers::{HeaderAlerts, ShutdownCoordinator};

/// Cloned into every router that needs it; every member is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Alert headers built from `APP_NAME`
    pub alerts: HeaderAlerts,
    /// Flipped on SIGINT/SIGTERM; readiness reports 503 from then on
    pub shutdown: ShutdownCoordinator,
}
