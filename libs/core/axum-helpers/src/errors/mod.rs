pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::alerts::FailureAlert;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1012,
///   "error": "BAD_REQUEST",
///   "message": "A new process cannot already have an ID",
///   "details": { "entityName": "process", "errorKey": "idexists" }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable identifier
    pub error: String,
    /// Human-readable message
    pub message: String,
    /// Structured details such as field errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Application error rendered as a JSON [`ErrorResponse`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Client error about an entity; the response carries a [`FailureAlert`]
    /// extension that [`crate::alerts::failure_alert_headers`] turns into headers.
    #[error("Bad Request: {message}")]
    BadRequestAlert {
        message: String,
        entity_name: &'static str,
        error_key: &'static str,
    },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

struct Rendered {
    status: StatusCode,
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl Rendered {
    fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut alert = None;

        let rendered = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = ErrorCode::JsonExtraction.code(), "JSON extraction error: {}", e);
                let status = match e {
                    JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    _ => StatusCode::BAD_REQUEST,
                };
                Rendered::new(status, ErrorCode::JsonExtraction, e.body_text())
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), "Validation error: {}", e);
                Rendered::new(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError,
                    ErrorCode::ValidationError.default_message(),
                )
                .with_details(serde_json::to_value(&e).unwrap_or(Value::Null))
            }
            AppError::Database(e) => map_db_error(&e),
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", msg);
                Rendered::new(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg)
            }
            AppError::BadRequestAlert {
                message,
                entity_name,
                error_key,
            } => {
                tracing::info!(
                    error_code = ErrorCode::BadRequest.code(),
                    entity = entity_name,
                    error_key,
                    "Bad request: {}",
                    message
                );
                alert = Some(FailureAlert {
                    entity_name,
                    error_key,
                });
                Rendered::new(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, message)
                    .with_details(json!({ "entityName": entity_name, "errorKey": error_key }))
            }
            AppError::InvalidQuery(msg) => {
                tracing::info!(error_code = ErrorCode::InvalidQuery.code(), "Invalid query: {}", msg);
                Rendered::new(StatusCode::BAD_REQUEST, ErrorCode::InvalidQuery, msg)
            }
            AppError::InvalidId(msg) => {
                tracing::info!(error_code = ErrorCode::InvalidId.code(), "Invalid id: {}", msg);
                Rendered::new(StatusCode::BAD_REQUEST, ErrorCode::InvalidId, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                Rendered::new(StatusCode::NOT_FOUND, ErrorCode::NotFound, msg)
            }
            AppError::Conflict(msg) => {
                tracing::info!(error_code = ErrorCode::Conflict.code(), "Conflict: {}", msg);
                Rendered::new(StatusCode::CONFLICT, ErrorCode::Conflict, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = ErrorCode::InternalError.code(), "Internal server error: {}", msg);
                Rendered::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError, msg)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = ErrorCode::ServiceUnavailable.code(), "Service unavailable: {}", msg);
                Rendered::new(StatusCode::SERVICE_UNAVAILABLE, ErrorCode::ServiceUnavailable, msg)
            }
        };

        let mut response = error_body(rendered);
        if let Some(alert) = alert {
            response.extensions_mut().insert(alert);
        }
        response
    }
}

/// Persistence failures are server errors and never expose driver messages.
fn map_db_error(error: &DbErr) -> Rendered {
    if matches!(error, DbErr::ConnectionAcquire(_) | DbErr::Conn(_)) {
        let code = ErrorCode::DatabaseUnavailable;
        tracing::error!(error_code = code.code(), "Database unavailable: {}", error);
        return Rendered::new(StatusCode::SERVICE_UNAVAILABLE, code, code.default_message());
    }

    let code = ErrorCode::DatabaseError;
    match error.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail) | SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::error!(error_code = code.code(), "Constraint violation: {}", detail);
        }
        _ => tracing::error!(error_code = code.code(), "Database error: {:?}", error),
    }
    Rendered::new(StatusCode::INTERNAL_SERVER_ERROR, code, code.default_message())
}

fn error_body(rendered: Rendered) -> Response {
    let body = Json(ErrorResponse {
        code: rendered.code.code(),
        error: rendered.code.as_str().to_string(),
        message: rendered.message,
        details: rendered.details,
    });

    (rendered.status, body).into_response()
}

/// Build an error response without going through [`AppError`].
pub fn error_response(status: StatusCode, message: impl Into<String>, error_code: ErrorCode) -> Response {
    error_body(Rendered::new(status, error_code, message))
}
