//! Database library: PostgreSQL connectivity, transactions and paging primitives
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Examples
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "processes_api").await?;
//!
//! let txn = postgres::transaction::read_only(&db).await?;
//! // ... queries against &txn ...
//! txn.commit().await?;
//! ```

pub mod common;
pub mod pagination;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
pub use pagination::{Page, PageRequest, PaginationError, Sort, SortDirection};
