use axum::{
    Json, Router,
    extract::{OriginalUri, RawQuery, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::map_response_with_state,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditAction, AuditEvent, AuditOutcome, HeaderAlerts, IdPath, Pageable, ValidatedJson,
    errors::responses::{
        BadRequestAlertResponse, BadRequestIdResponse, BadRequestQueryResponse,
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        ServiceUnavailableResponse,
    },
    failure_alert_headers, pagination_headers,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ENTITY_NAME, ProcessError, ProcessResult};
use crate::filter::ProcessCriteria;
use crate::models::{Process, ProcessPayload, ProcessSortField};
use crate::query_service::ProcessQueryService;
use crate::repository::ProcessRepository;
use crate::service::ProcessService;

/// Mount point of [`router`] below the API prefix
pub const PATH: &str = "/processes";

const TAG: &str = "processes";

/// OpenAPI documentation for the Processes API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_all_processes,
        create_process,
        update_process,
        count_processes,
        get_process,
        delete_process,
    ),
    components(
        schemas(Process, ProcessPayload),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestAlertResponse,
            BadRequestQueryResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = TAG, description = "Process management and criteria search")
    )
)]
pub struct ApiDoc;

struct ProcessState<R: ProcessRepository> {
    service: ProcessService<R>,
    query_service: ProcessQueryService<R>,
    alerts: HeaderAlerts,
}

type SharedState<R> = State<Arc<ProcessState<R>>>;

/// Create the process router with all HTTP endpoints
pub fn router<R: ProcessRepository + 'static>(
    service: ProcessService<R>,
    query_service: ProcessQueryService<R>,
    alerts: HeaderAlerts,
) -> Router {
    let state = Arc::new(ProcessState {
        service,
        query_service,
        alerts: alerts.clone(),
    });

    Router::new()
        .route(
            "/",
            get(get_all_processes)
                .post(create_process)
                .put(update_process),
        )
        .route("/count", get(count_processes))
        .route("/{id}", get(get_process).delete(delete_process))
        .with_state(state)
        .layer(map_response_with_state(alerts, failure_alert_headers))
}

fn parse_criteria(query: Option<String>) -> ProcessResult<ProcessCriteria> {
    Ok(ProcessCriteria::from_query(query.as_deref())?)
}

/// Create a new process
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ProcessPayload,
    responses(
        (status = 201, description = "Process created", body = Process,
            headers(("Location" = String, description = "URI of the new process"))),
        (status = 400, response = BadRequestAlertResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_process<R: ProcessRepository>(
    State(state): SharedState<R>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<ProcessPayload>,
) -> ProcessResult<impl IntoResponse> {
    if payload.id.is_some() {
        AuditEvent::entity(ENTITY_NAME, AuditAction::Create, payload.id, AuditOutcome::Failure)
            .with_request_headers(&headers)
            .with_details(serde_json::json!({ "errorKey": "idexists" }))
            .log();
        return Err(ProcessError::IdExists);
    }

    let process = state.service.save(payload.into_process()?).await?;
    let id = process.id.map(|id| id.to_string()).unwrap_or_default();

    AuditEvent::entity(ENTITY_NAME, AuditAction::Create, process.id, AuditOutcome::Success)
        .with_request_headers(&headers)
        .log();

    let mut response_headers = state.alerts.entity_created(ENTITY_NAME, &id);
    let location = format!("{}/{id}", uri.path().trim_end_matches('/'));
    if let Ok(location) = HeaderValue::from_str(&location) {
        response_headers.insert(header::LOCATION, location);
    }

    Ok((StatusCode::CREATED, response_headers, Json(process)))
}

/// Update (or create with a caller-chosen id) a process
#[utoipa::path(
    put,
    path = "",
    tag = TAG,
    request_body = ProcessPayload,
    responses(
        (status = 200, description = "Process updated", body = Process),
        (status = 400, response = BadRequestAlertResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_process<R: ProcessRepository>(
    State(state): SharedState<R>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<ProcessPayload>,
) -> ProcessResult<impl IntoResponse> {
    let Some(id) = payload.id else {
        AuditEvent::entity(ENTITY_NAME, AuditAction::Update, None, AuditOutcome::Failure)
            .with_request_headers(&headers)
            .with_details(serde_json::json!({ "errorKey": "idnull" }))
            .log();
        return Err(ProcessError::IdNull);
    };

    let process = state.service.save(payload.into_process()?).await?;

    AuditEvent::entity(ENTITY_NAME, AuditAction::Update, Some(id), AuditOutcome::Success)
        .with_request_headers(&headers)
        .log();

    let response_headers = state.alerts.entity_updated(ENTITY_NAME, &id.to_string());
    Ok((response_headers, Json(process)))
}

/// Search processes by criteria, one page at a time
///
/// Filters use `<field>.<operator>=<value>`: `id` accepts `equals`,
/// `notEquals`, `in`, `notIn`, `specified`, `greaterThan`, `lessThan`,
/// `greaterThanOrEqual`, `lessThanOrEqual`; `title` and `code` accept
/// `equals`, `notEquals`, `in`, `notIn`, `specified`, `contains`,
/// `doesNotContain`.
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index (default 0)"),
        ("size" = Option<u64>, Query, description = "Page size, 1-2000 (default 20)"),
        ("sort" = Option<Vec<String>>, Query, description = "`id`, `title` or `code`, optionally followed by `,asc` or `,desc`"),
        ("id.greaterThan" = Option<i64>, Query, description = "Example range filter"),
        ("title.contains" = Option<String>, Query, description = "Example string filter"),
        ("code.specified" = Option<bool>, Query, description = "Example presence filter")
    ),
    responses(
        (status = 200, description = "One page of matching processes", body = Vec<Process>,
            headers(
                ("X-Total-Count" = u64, description = "Number of matches across all pages"),
                ("Link" = String, description = "next/prev/last/first page links")
            )),
        (status = 400, response = BadRequestQueryResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_all_processes<R: ProcessRepository>(
    State(state): SharedState<R>,
    OriginalUri(uri): OriginalUri,
    RawQuery(query): RawQuery,
    Pageable(page): Pageable<ProcessSortField>,
) -> ProcessResult<impl IntoResponse> {
    let criteria = parse_criteria(query)?;
    let result = state
        .query_service
        .find_page_by_criteria(Some(&criteria), &page)
        .await?;

    let headers = pagination_headers(&uri, &result);
    Ok((headers, Json(result.into_content())))
}

/// Count processes matching the criteria
#[utoipa::path(
    get,
    path = "/count",
    tag = TAG,
    params(
        ("title.equals" = Option<String>, Query, description = "Any filter accepted by the search endpoint")
    ),
    responses(
        (status = 200, description = "Number of matching processes", body = u64),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_processes<R: ProcessRepository>(
    State(state): SharedState<R>,
    RawQuery(query): RawQuery,
) -> ProcessResult<Json<u64>> {
    let criteria = parse_criteria(query)?;
    let count = state.query_service.count_by_criteria(Some(&criteria)).await?;
    Ok(Json(count))
}

/// Get a process by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Process id")
    ),
    responses(
        (status = 200, description = "Process found", body = Process),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_process<R: ProcessRepository>(
    State(state): SharedState<R>,
    IdPath(id): IdPath,
) -> ProcessResult<Json<Process>> {
    state
        .service
        .find_one(id)
        .await?
        .map(Json)
        .ok_or(ProcessError::NotFound(id))
}

/// Delete a process; unknown ids are accepted
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Process id")
    ),
    responses(
        (status = 204, description = "Process deleted or never existed"),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_process<R: ProcessRepository>(
    State(state): SharedState<R>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> ProcessResult<impl IntoResponse> {
    let existed = state.service.delete(id).await?;

    AuditEvent::entity(ENTITY_NAME, AuditAction::Delete, Some(id), AuditOutcome::Success)
        .with_request_headers(&headers)
        .with_details(serde_json::json!({ "existed": existed }))
        .log();

    let response_headers = state.alerts.entity_deleted(ENTITY_NAME, &id.to_string());
    Ok((StatusCode::NO_CONTENT, response_headers))
}
