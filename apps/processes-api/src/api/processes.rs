use axum::Router;
use domain_processes::{PgProcessRepository, ProcessQueryService, ProcessService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgProcessRepository::new(state.db.clone());
    let service = ProcessService::new(repository.clone());
    let query_service = ProcessQueryService::new(repository);
    handlers::router(service, query_service, state.alerts.clone())
}
