//! Offset pagination primitives shared by repositories and HTTP layers.
//!
//! A [`PageRequest`] carries a zero-based page index, a page size and an
//! ordered list of [`Sort`] keys over a caller-defined field type `F`
//! (usually a `strum` enum of sortable columns). Repositories answer with a
//! [`Page`] holding one slice of content plus the total element count.

use std::str::FromStr;

use serde::Serialize;
use strum::{Display, EnumString};
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 2000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page size must be between 1 and {max}, got {size}")]
    InvalidSize { size: u64, max: u64 },

    #[error("invalid value '{value}' for '{key}'")]
    InvalidParameter { key: &'static str, value: String },

    #[error("invalid sort '{0}'")]
    InvalidSort(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F> Sort<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

impl<F: FromStr> Sort<F> {
    /// Parse `field` or `field,asc|desc`.
    pub fn parse(raw: &str) -> Result<Self, PaginationError> {
        let invalid = || PaginationError::InvalidSort(raw.to_string());

        let (field, direction) = match raw.split_once(',') {
            Some((field, direction)) => (
                field,
                SortDirection::from_str(direction.trim()).map_err(|_| invalid())?,
            ),
            None => (raw, SortDirection::Asc),
        };
        let field = F::from_str(field.trim()).map_err(|_| invalid())?;

        Ok(Self { field, direction })
    }
}

/// Requested slice of a result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<F> {
    page: u64,
    size: u64,
    sort: Vec<Sort<F>>,
}

impl<F> PageRequest<F> {
    pub fn new(page: u64, size: u64) -> Result<Self, PaginationError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(PaginationError::InvalidSize {
                size,
                max: MAX_PAGE_SIZE,
            });
        }
        // Offsets are bound as signed 64-bit integers
        if page.checked_mul(size).is_none_or(|offset| offset > i64::MAX as u64) {
            return Err(PaginationError::InvalidParameter {
                key: "page",
                value: page.to_string(),
            });
        }
        Ok(Self {
            page,
            size,
            sort: Vec::new(),
        })
    }

    pub fn with_sort(mut self, sort: Sort<F>) -> Self {
        self.sort.push(sort);
        self
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn sort(&self) -> &[Sort<F>] {
        &self.sort
    }

    /// Number of rows to skip; never above `i64::MAX`
    pub fn offset(&self) -> u64 {
        self.page * self.size
    }
}

impl<F> Default for PageRequest<F> {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

/// One page of results together with the size of the whole result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    content: Vec<T>,
    page: u64,
    size: u64,
    total_elements: u64,
}

impl<T> Page<T> {
    pub fn new<F>(content: Vec<T>, request: &PageRequest<F>, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total_elements.div_ceil(self.size)
        }
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
    #[strum(serialize_all = "lowercase")]
    enum Column {
        Id,
        Name,
    }

    #[test]
    fn test_sort_parse_defaults_to_ascending() {
        assert_eq!(Sort::<Column>::parse("name").unwrap(), Sort::asc(Column::Name));
        assert_eq!(Sort::<Column>::parse("id,desc").unwrap(), Sort::desc(Column::Id));
        assert_eq!(Sort::<Column>::parse("id,DESC").unwrap(), Sort::desc(Column::Id));
    }

    #[test]
    fn test_sort_parse_rejects_unknown_field_or_direction() {
        assert_eq!(
            Sort::<Column>::parse("owner,asc").unwrap_err(),
            PaginationError::InvalidSort("owner,asc".to_string())
        );
        assert!(Sort::<Column>::parse("id,sideways").is_err());
    }

    #[test]
    fn test_page_request_bounds_size() {
        assert!(PageRequest::<Column>::new(0, 0).is_err());
        assert!(PageRequest::<Column>::new(0, MAX_PAGE_SIZE + 1).is_err());
        assert_eq!(PageRequest::<Column>::new(3, 25).unwrap().offset(), 75);
    }

    #[test]
    fn test_default_request_is_first_page_of_twenty() {
        let request = PageRequest::<Column>::default();
        assert_eq!((request.page(), request.size()), (0, DEFAULT_PAGE_SIZE));
        assert!(request.sort().is_empty());
    }

    #[test]
    fn test_page_navigation() {
        let request = PageRequest::<Column>::new(1, 10).unwrap();
        let page = Page::new(vec![1, 2, 3], &request, 25);

        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());

        let last = Page::new(vec![1], &PageRequest::<Column>::new(2, 10).unwrap(), 25);
        assert!(!last.has_next());
    }

    #[test]
    fn test_empty_result_has_no_pages() {
        let page: Page<u8> = Page::new(vec![], &PageRequest::<Column>::default(), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_page_request_rejects_offset_beyond_i64() {
        assert_eq!(
            PageRequest::<Column>::new(u64::MAX, 20).unwrap_err(),
            PaginationError::InvalidParameter {
                key: "page",
                value: u64::MAX.to_string(),
            }
        );
        assert!(PageRequest::<Column>::new(i64::MAX as u64, 1).is_ok());
        assert!(PageRequest::<Column>::new(i64::MAX as u64, 2).is_err());

        let largest = PageRequest::<Column>::new(i64::MAX as u64 / 2, 2).unwrap();
        assert!(largest.offset() <= i64::MAX as u64);
    }

    #[test]
    fn test_has_next_on_last_possible_page() {
        let request = PageRequest::<Column>::new(i64::MAX as u64, 1).unwrap();
        let page: Page<u8> = Page::new(vec![], &request, 5);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }
}
