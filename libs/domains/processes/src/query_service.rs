//! Criteria-based reads.
//!
//! List, page and count are all built from [`ProcessQueryService::create_specification`],
//! so for the same criteria the count always equals the number of listed rows
//! and the total reported alongside any page.

use database::{Page, PageRequest};
use std::sync::Arc;

use crate::error::ProcessResult;
use crate::filter::ProcessCriteria;
use crate::models::{Process, ProcessSortField};
use crate::repository::ProcessRepository;
use crate::specification::{
    ProcessField, Specification, build_range_specification, build_string_specification,
};

#[derive(Clone)]
pub struct ProcessQueryService<R: ProcessRepository> {
    repository: Arc<R>,
}

impl<R: ProcessRepository> ProcessQueryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// AND of every populated filter; `None` is unrestricted.
    pub fn create_specification(criteria: Option<&ProcessCriteria>) -> Specification {
        let Some(criteria) = criteria else {
            return Specification::unrestricted();
        };

        let mut spec = Specification::unrestricted();
        if let Some(filter) = &criteria.id {
            spec = spec.and_all(build_range_specification(filter, ProcessField::Id));
        }
        if let Some(filter) = &criteria.title {
            spec = spec.and_all(build_string_specification(filter, ProcessField::Title));
        }
        if let Some(filter) = &criteria.code {
            spec = spec.and_all(build_string_specification(filter, ProcessField::Code));
        }
        spec
    }

    pub async fn find_by_criteria(&self, criteria: Option<&ProcessCriteria>) -> ProcessResult<Vec<Process>> {
        tracing::debug!(?criteria, "find by criteria");
        let spec = Self::create_specification(criteria);
        self.repository.find_all(&spec).await
    }

    pub async fn find_page_by_criteria(
        &self,
        criteria: Option<&ProcessCriteria>,
        page: &PageRequest<ProcessSortField>,
    ) -> ProcessResult<Page<Process>> {
        tracing::debug!(?criteria, page = page.page(), size = page.size(), "find page by criteria");
        let spec = Self::create_specification(criteria);
        self.repository.find_page(&spec, page).await
    }

    pub async fn count_by_criteria(&self, criteria: Option<&ProcessCriteria>) -> ProcessResult<u64> {
        tracing::debug!(?criteria, "count by criteria");
        let spec = Self::create_specification(criteria);
        self.repository.count(&spec).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{RangeFilter, StringFilter};
    use crate::repository::{InMemoryProcessRepository, MockProcessRepository};
    use crate::service::ProcessService;
    use crate::specification::Predicate;
    use database::pagination::MAX_PAGE_SIZE;

    fn title_equals(value: &str) -> ProcessCriteria {
        ProcessCriteria {
            title: Some(StringFilter {
                equals: Some(value.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_criteria_is_unrestricted() {
        let spec = ProcessQueryService::<InMemoryProcessRepository>::create_specification(None);
        assert!(spec.is_unrestricted());

        let empty = ProcessCriteria::default();
        let spec = ProcessQueryService::<InMemoryProcessRepository>::create_specification(Some(&empty));
        assert!(spec.is_unrestricted());
    }

    #[test]
    fn test_filters_across_fields_are_combined() {
        let criteria = ProcessCriteria {
            id: Some(RangeFilter {
                greater_than: Some(3),
                ..Default::default()
            }),
            code: Some(StringFilter {
                specified: Some(true),
                contains: Some("AB".to_string()),
                ..Default::default()
            }),
            ..title_equals("AAAAAAAAAA")
        };

        let spec = ProcessQueryService::<InMemoryProcessRepository>::create_specification(Some(&criteria));

        assert_eq!(
            spec.predicates(),
            &[
                Predicate::GreaterThan(ProcessField::Id, 3.into()),
                Predicate::Equals(ProcessField::Title, "AAAAAAAAAA".into()),
                Predicate::Specified(ProcessField::Code, true),
                Predicate::Contains(ProcessField::Code, "AB".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_count_uses_same_specification_as_list() {
        let mut mock_repo = MockProcessRepository::new();
        let expected = ProcessQueryService::<MockProcessRepository>::create_specification(Some(&title_equals("X")));

        let for_count = expected.clone();
        mock_repo
            .expect_count()
            .withf(move |spec| *spec == for_count)
            .times(1)
            .returning(|_| Ok(2));
        mock_repo
            .expect_find_all()
            .withf(move |spec| *spec == expected)
            .times(1)
            .returning(|_| Ok(vec![Process::new("X", None).with_id(1), Process::new("X", None).with_id(2)]));

        let service = ProcessQueryService::new(mock_repo);
        let criteria = title_equals("X");

        let count = service.count_by_criteria(Some(&criteria)).await.unwrap();
        let all = service.find_by_criteria(Some(&criteria)).await.unwrap();
        assert_eq!(count, all.len() as u64);
    }

    #[tokio::test]
    async fn test_page_total_equals_count() {
        let repo = InMemoryProcessRepository::new();
        for i in 0..7 {
            let title = if i % 2 == 0 { "even" } else { "odd" };
            repo.save(Process::new(title, None)).await.unwrap();
        }
        let service = ProcessQueryService::new(repo);
        let criteria = title_equals("even");

        let page = service
            .find_page_by_criteria(Some(&criteria), &PageRequest::new(1, 3).unwrap())
            .await
            .unwrap();
        let count = service.count_by_criteria(Some(&criteria)).await.unwrap();

        assert_eq!(page.total_elements(), count);
        assert_eq!(count, 4);
        assert_eq!(page.content().len(), 1);
    }

    #[tokio::test]
    async fn test_null_criteria_lists_everything() {
        let repo = InMemoryProcessRepository::new();
        repo.save(Process::new("b", Some("B".to_string()))).await.unwrap();
        repo.save(Process::new("a", None)).await.unwrap();
        repo.save(Process::new("c", Some("C".to_string())).with_id(40)).await.unwrap();
        let crud = ProcessService::new(repo.clone());
        let service = ProcessQueryService::new(repo);

        let mut listed = service.find_by_criteria(None).await.unwrap();
        listed.sort_by_key(|p| p.id);
        let mut all = crud
            .find_all(&PageRequest::new(0, MAX_PAGE_SIZE).unwrap())
            .await
            .unwrap()
            .into_content();
        all.sort_by_key(|p| p.id);

        assert_eq!(listed, all);
        assert_eq!(service.count_by_criteria(None).await.unwrap(), all.len() as u64);
    }
}
