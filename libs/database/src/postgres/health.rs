use std::time::{Duration, Instant};

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::{DatabaseError, DatabaseResult};

/// Longest a readiness probe waits for `SELECT 1`
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Run `SELECT 1` against the pool, bounded by [`HEALTH_CHECK_TIMEOUT`]
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    tokio::time::timeout(HEALTH_CHECK_TIMEOUT, db.query_one_raw(stmt))
        .await
        .map_err(|_| DatabaseError::HealthCheckTimeout(HEALTH_CHECK_TIMEOUT))??;

    debug!("PostgreSQL health check passed");
    Ok(())
}

/// Outcome of a timed health probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthStatus {
    fn from_result(result: DatabaseResult<()>, elapsed: Duration) -> Self {
        Self {
            healthy: result.is_ok(),
            message: result.err().map(|e| e.to_string()),
            response_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// [`check_health`] with timing, never failing
pub async fn check_health_detailed(db: &DatabaseConnection) -> HealthStatus {
    let start = Instant::now();
    let result = check_health(db).await;
    HealthStatus::from_result(result, start.elapsed())
}
