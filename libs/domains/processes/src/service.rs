use database::{Page, PageRequest};
use std::sync::Arc;
use validator::Validate;

use crate::error::{ProcessError, ProcessResult};
use crate::models::{Process, ProcessSortField};
use crate::repository::ProcessRepository;
use crate::specification::Specification;

/// Transactional CRUD over processes
#[derive(Clone)]
pub struct ProcessService<R: ProcessRepository> {
    repository: Arc<R>,
}

impl<R: ProcessRepository> ProcessService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Insert when `id` is absent, otherwise insert-or-update that identity.
    pub async fn save(&self, process: Process) -> ProcessResult<Process> {
        tracing::debug!(?process, "save process");
        process
            .validate()
            .map_err(|e| ProcessError::Validation(e.to_string()))?;

        self.repository.save(process).await
    }

    pub async fn find_all(&self, page: &PageRequest<ProcessSortField>) -> ProcessResult<Page<Process>> {
        tracing::debug!(page = page.page(), size = page.size(), "find all processes");
        self.repository
            .find_page(&Specification::unrestricted(), page)
            .await
    }

    /// `None` when no process has `id`
    pub async fn find_one(&self, id: i64) -> ProcessResult<Option<Process>> {
        tracing::debug!(process_id = id, "find process");
        self.repository.find_by_id(id).await
    }

    /// Deleting an unknown id is not an error; returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> ProcessResult<bool> {
        tracing::debug!(process_id = id, "delete process");
        self.repository.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryProcessRepository, MockProcessRepository};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_save_then_find_one_round_trips() {
        let service = ProcessService::new(InMemoryProcessRepository::new());

        let saved = service
            .save(Process::new("AAAAAAAAAA", Some("AAAAAAAAAA".to_string())))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        assert_eq!(service.find_one(id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_save_rejects_overlong_title_without_touching_store() {
        let mut mock_repo = MockProcessRepository::new();
        mock_repo.expect_save().never();

        let service = ProcessService::new(mock_repo);
        let err = service.save(Process::new("x".repeat(256), None)).await.unwrap_err();

        assert!(matches!(err, ProcessError::Validation(_)));
    }

    #[tokio::test]
    async fn test_find_one_absent_is_none() {
        let mut mock_repo = MockProcessRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = ProcessService::new(mock_repo);
        assert_eq!(service.find_one(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_all_is_unrestricted_page() {
        let mut mock_repo = MockProcessRepository::new();
        mock_repo
            .expect_find_page()
            .withf(|spec, page| spec.is_unrestricted() && page.page() == 1)
            .returning(|_, page| Ok(Page::new(vec![], page, 0)));

        let service = ProcessService::new(mock_repo);
        let page = service.find_all(&PageRequest::new(1, 5).unwrap()).await.unwrap();

        assert_eq!(page.page(), 1);
        assert_eq!(page.size(), 5);
    }

    #[tokio::test]
    async fn test_repeated_delete_is_not_an_error() {
        let service = ProcessService::new(InMemoryProcessRepository::new());
        let id = service.save(Process::new("gone", None)).await.unwrap().id.unwrap();

        assert!(service.delete(id).await.unwrap());
        assert!(!service.delete(id).await.unwrap());
        assert!(!service.delete(id).await.unwrap());
        assert_eq!(service.find_one(id).await.unwrap(), None);
    }
}
