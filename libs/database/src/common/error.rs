use std::time::Duration;

/// Failure of a connection-level operation outside any repository call
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// The probe query did not answer in time
    #[error("Health check timed out after {0:?}")]
    HealthCheckTimeout(Duration),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
