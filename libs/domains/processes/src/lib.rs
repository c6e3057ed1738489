//! Processes Domain
//!
//! CRUD and criteria-based search for `Process` records.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, identity checks, pagination headers
//! └──────┬──────┘
//!        │
//! ┌──────▼──────────────────────────┐
//! │ ProcessService / QueryService   │  ← save/find/delete, criteria → Specification
//! └──────┬──────────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / PostgreSQL adapters)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, filters, predicates
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::HeaderAlerts;
//! use domain_processes::{
//!     handlers,
//!     repository::InMemoryProcessRepository,
//!     ProcessQueryService, ProcessService,
//! };
//!
//! let repository = InMemoryProcessRepository::new();
//! let service = ProcessService::new(repository.clone());
//! let query_service = ProcessQueryService::new(repository);
//! let alerts = HeaderAlerts::new("processesApp").unwrap();
//!
//! let router = axum::Router::new().nest(handlers::PATH, handlers::router(service, query_service, alerts));
//! ```

pub mod entity;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod query_service;
pub mod repository;
pub mod service;
pub mod specification;

// Re-export commonly used types
pub use error::{ProcessError, ProcessResult};
pub use filter::{FilterError, Operator, ProcessCriteria, RangeFilter, StringFilter};
pub use handlers::ApiDoc;
pub use models::{Process, ProcessPayload, ProcessSortField};
pub use postgres::PgProcessRepository;
pub use query_service::ProcessQueryService;
pub use repository::{InMemoryProcessRepository, ProcessRepository};
pub use service::ProcessService;
pub use specification::{FieldValue, Predicate, ProcessField, Specification};
