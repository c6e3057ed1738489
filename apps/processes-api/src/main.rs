use axum_helpers::{
    HeaderAlerts, ShutdownCoordinator, close_postgres, create_production_app, create_router, health_router,
};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = connect_from_config_with_retry(config.database.clone(), Some(config.database_retry.clone()))
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
    }

    let alerts = HeaderAlerts::new(config.app_name.clone())
        .map_err(|e| eyre::eyre!("APP_NAME '{}' is not a valid header prefix: {}", config.app_name, e))?;

    let state = AppState {
        config,
        db,
        alerts,
        shutdown: ShutdownCoordinator::new(),
    };

    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.alerts.header_names())?;

    // - /health: liveness with app name/version
    // - /ready: database ping, 503 once shutdown has begun
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!(app = state.config.app.name, "Starting processes API");

    let shutdown = state.shutdown.clone();
    let server_config = state.config.server.clone();
    create_production_app(
        app,
        &server_config,
        shutdown,
        Duration::from_secs(30),
        async move { close_postgres(state.db, "PostgreSQL").await },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Processes API shutdown complete");
    Ok(())
}
