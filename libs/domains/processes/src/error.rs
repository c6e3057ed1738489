use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

use crate::filter::FilterError;

/// Entity name used in alert headers and structured error bodies
pub const ENTITY_NAME: &str = "process";

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Process not found: {0}")]
    NotFound(i64),

    #[error("A new process cannot already have an ID")]
    IdExists,

    #[error("Invalid id")]
    IdNull,

    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No process ids left to assign")]
    IdSpaceExhausted,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProcessResult<T> = Result<T, ProcessError>;

/// Convert ProcessError to AppError for standardized error responses
impl From<ProcessError> for AppError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::NotFound(id) => AppError::NotFound(format!("Process {} not found", id)),
            err @ ProcessError::IdExists => AppError::BadRequestAlert {
                message: err.to_string(),
                entity_name: ENTITY_NAME,
                error_key: "idexists",
            },
            err @ ProcessError::IdNull => AppError::BadRequestAlert {
                message: err.to_string(),
                entity_name: ENTITY_NAME,
                error_key: "idnull",
            },
            ProcessError::Filter(e) => AppError::InvalidQuery(e.to_string()),
            ProcessError::Validation(msg) => AppError::BadRequest(msg),
            err @ ProcessError::IdSpaceExhausted => AppError::InternalServerError(err.to_string()),
            ProcessError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProcessError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
