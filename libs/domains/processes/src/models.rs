use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ProcessError, ProcessResult};

/// Process entity
///
/// `id` is assigned by the store on first save and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Process {
    /// Unique identifier, `null` until persisted
    pub id: Option<i64>,
    /// Process title
    #[validate(length(max = 255))]
    pub title: String,
    /// Optional short code
    #[validate(length(max = 255))]
    pub code: Option<String>,
}

impl Process {
    /// Create a transient process (no identity yet)
    pub fn new(title: impl Into<String>, code: Option<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            code,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Request body for `POST /processes` and `PUT /processes`
///
/// Every member is optional on the wire so that a missing `title` is reported
/// as a field validation error rather than a JSON syntax error.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ProcessPayload {
    pub id: Option<i64>,
    #[validate(required(message = "must not be null"), length(max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub code: Option<String>,
}

impl ProcessPayload {
    pub fn into_process(self) -> ProcessResult<Process> {
        let title = self
            .title
            .ok_or_else(|| ProcessError::Validation("title must not be null".to_string()))?;

        Ok(Process {
            id: self.id,
            title,
            code: self.code,
        })
    }
}

impl From<Process> for ProcessPayload {
    fn from(process: Process) -> Self {
        Self {
            id: process.id,
            title: Some(process.title),
            code: process.code,
        }
    }
}

/// Columns a process listing can be sorted by (`sort=<field>,<direction>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, ToSchema)]
#[strum(serialize_all = "lowercase")]
pub enum ProcessSortField {
    Id,
    Title,
    Code,
}
