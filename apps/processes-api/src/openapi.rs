use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Processes API",
        version = "0.1.0",
        description = "CRUD and criteria search for processes"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = domain_processes::handlers::PATH, api = domain_processes::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_paths_are_nested() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        assert!(paths.contains(&"/processes".to_string()), "{paths:?}");
        assert!(paths.contains(&"/processes/count".to_string()), "{paths:?}");
        assert!(paths.contains(&"/processes/{id}".to_string()), "{paths:?}");
    }
}
