use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse_or, server::ServerConfig};
use database::{RetryConfig, postgres::PostgresConfig};

pub use core_config::Environment;

/// Prefix of the `X-<app>-alert` response headers unless `APP_NAME` is set
pub const DEFAULT_APP_NAME: &str = "processesApp";

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    /// Alert header prefix and alert message namespace
    pub app_name: String,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
    pub database: PostgresConfig,
    /// Backoff for the initial connection
    pub database_retry: RetryConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            app_name: env_or_default("APP_NAME", DEFAULT_APP_NAME),
            run_migrations: env_parse_or("RUN_MIGRATIONS", "true")?,
            database: PostgresConfig::from_env()?, // Required - will fail if not set
            database_retry: RetryConfig::from_env()?,
            server: ServerConfig::from_env()?,     // Uses defaults: HOST=0.0.0.0, PORT=8080
            environment: Environment::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/processes")),
                ("APP_NAME", None),
                ("RUN_MIGRATIONS", None),
                ("PORT", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app_name, DEFAULT_APP_NAME);
                assert!(config.run_migrations);
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.app.name, "processes_api");
            },
        );
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/processes")),
                ("APP_NAME", Some("workflowApp")),
                ("RUN_MIGRATIONS", Some("false")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app_name, "workflowApp");
                assert!(!config.run_migrations);
            },
        );
    }

    #[test]
    fn test_database_url_is_required() {
        temp_env::with_var_unset("DATABASE_URL", || {
            assert!(matches!(Config::from_env(), Err(ConfigError::MissingEnvVar(_))));
        });
    }

    #[test]
    fn test_run_migrations_must_be_boolean() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/processes")),
                ("RUN_MIGRATIONS", Some("sometimes")),
            ],
            || {
                assert!(matches!(Config::from_env(), Err(ConfigError::ParseError { .. })));
            },
        );
    }
}
