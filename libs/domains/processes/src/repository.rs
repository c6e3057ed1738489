use async_trait::async_trait;
use database::{Page, PageRequest, SortDirection};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProcessError, ProcessResult};
use crate::models::{Process, ProcessSortField};
use crate::specification::Specification;

/// Persistence port for processes
///
/// Each call is one transaction scope: reads are read-only, `save` and
/// `delete_by_id` are read-write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessRepository: Send + Sync {
    /// Insert when `id` is `None`, otherwise insert-or-update that identity
    async fn save(&self, process: Process) -> ProcessResult<Process>;

    async fn find_by_id(&self, id: i64) -> ProcessResult<Option<Process>>;

    /// All matches, ordered by id
    async fn find_all(&self, spec: &Specification) -> ProcessResult<Vec<Process>>;

    /// One page of matches plus the total match count
    async fn find_page(
        &self,
        spec: &Specification,
        page: &PageRequest<ProcessSortField>,
    ) -> ProcessResult<Page<Process>>;

    async fn count(&self, spec: &Specification) -> ProcessResult<u64>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i64) -> ProcessResult<bool>;
}

/// In-memory implementation of ProcessRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProcessRepository {
    store: Arc<RwLock<Store>>,
}

#[derive(Debug, Default)]
struct Store {
    processes: BTreeMap<i64, Process>,
    last_id: i64,
}

impl InMemoryProcessRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Requested sort keys, then id ascending.
fn compare(a: &Process, b: &Process, page: &PageRequest<ProcessSortField>) -> Ordering {
    page.sort()
        .iter()
        .map(|sort| {
            let ordering = match sort.field {
                ProcessSortField::Id => a.id.cmp(&b.id),
                ProcessSortField::Title => a.title.cmp(&b.title),
                ProcessSortField::Code => compare_nulls_last(&a.code, &b.code),
            };
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.id.cmp(&b.id))
}

/// PostgreSQL sorts NULL as larger than any value.
fn compare_nulls_last(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl ProcessRepository for InMemoryProcessRepository {
    async fn save(&self, process: Process) -> ProcessResult<Process> {
        let mut store = self.store.write().await;

        let id = match process.id {
            Some(id) => id,
            None => store.last_id.checked_add(1).ok_or(ProcessError::IdSpaceExhausted)?,
        };
        store.last_id = store.last_id.max(id);

        let saved = process.with_id(id);
        let existed = store.processes.insert(id, saved.clone()).is_some();

        if existed {
            tracing::info!(process_id = id, "Updated process");
        } else {
            tracing::info!(process_id = id, "Created process");
        }
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> ProcessResult<Option<Process>> {
        let store = self.store.read().await;
        Ok(store.processes.get(&id).cloned())
    }

    async fn find_all(&self, spec: &Specification) -> ProcessResult<Vec<Process>> {
        let store = self.store.read().await;
        Ok(store
            .processes
            .values()
            .filter(|p| spec.matches(p))
            .cloned()
            .collect())
    }

    async fn find_page(
        &self,
        spec: &Specification,
        page: &PageRequest<ProcessSortField>,
    ) -> ProcessResult<Page<Process>> {
        let store = self.store.read().await;

        let mut matches: Vec<&Process> = store.processes.values().filter(|p| spec.matches(p)).collect();
        let total = matches.len() as u64;
        matches.sort_by(|a, b| compare(a, b, page));

        let content = matches
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.size()).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(Page::new(content, page, total))
    }

    async fn count(&self, spec: &Specification) -> ProcessResult<u64> {
        let store = self.store.read().await;
        Ok(store.processes.values().filter(|p| spec.matches(p)).count() as u64)
    }

    async fn delete_by_id(&self, id: i64) -> ProcessResult<bool> {
        let mut store = self.store.write().await;

        if store.processes.remove(&id).is_some() {
            tracing::info!(process_id = id, "Deleted process");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
