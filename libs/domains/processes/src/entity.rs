use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::Process;

/// Sea-ORM entity for the `process` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "process")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Process {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            title: model.title,
            code: model.code,
        }
    }
}

/// A process without identity leaves `id` to the sequence.
impl From<Process> for ActiveModel {
    fn from(process: Process) -> Self {
        ActiveModel {
            id: process.id.map_or(NotSet, Set),
            title: Set(process.title),
            code: Set(process.code),
        }
    }
}
