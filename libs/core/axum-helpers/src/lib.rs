//! # Axum Helpers
//!
//! Shared building blocks for the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`errors`]**: `AppError` and the structured `ErrorResponse` body
//! - **[`extractors`]**: validated JSON and numeric id path extractors
//! - **[`pagination`]**: `page`/`size`/`sort` extractor and `Link`/`X-Total-Count` headers
//! - **[`alerts`]**: `X-<app>-alert` / `X-<app>-error` entity alert headers
//! - **[`audit`]**: audit events on the `audit` tracing target
//! - **[`http`]**: CORS and security headers
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{ShutdownCoordinator, create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &alerts.header_names())?;
//! create_production_app(router, &config, ShutdownCoordinator::new(), timeout, async {}).await?;
//! ```

pub mod alerts;
pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod pagination;
pub mod server;

pub use alerts::{FailureAlert, HeaderAlerts, failure_alert_headers};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres, create_production_app,
    create_router, health_router, run_health_checks,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, ValidatedJson};

pub use pagination::{Pageable, X_TOTAL_COUNT, pagination_headers};

pub use audit::{AuditAction, AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
