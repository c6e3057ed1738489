//! Connection cleanup run after the server has drained.

use tracing::{error, info};

/// Close a sea-orm pool, logging the outcome.
///
/// ```ignore
/// create_production_app(router, &config, coordinator, timeout, close_postgres(db, "main")).await?;
/// ```
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(()) => info!("PostgreSQL connection '{}' closed successfully", name),
        Err(e) => error!("Error closing PostgreSQL connection '{}': {}", name, e),
    }
}
