//! PostgreSQL connection management, migrations and transaction scopes

mod config;
mod connector;
mod health;
pub mod transaction;

pub use config::PostgresConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry, run_migrations};
pub use health::{HEALTH_CHECK_TIMEOUT, HealthStatus, check_health, check_health_detailed};

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
