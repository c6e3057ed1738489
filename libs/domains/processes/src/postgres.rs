//! PostgreSQL adapter for [`ProcessRepository`].
//!
//! Every method runs in its own explicit transaction and commits on success;
//! an early return drops the transaction, which rolls it back.

use async_trait::async_trait;
use database::postgres::transaction;
use database::{Page, PageRequest, SortDirection};
use sea_orm::sea_query::{LikeExpr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    entity,
    error::ProcessResult,
    models::{Process, ProcessSortField},
    repository::ProcessRepository,
    specification::{FieldValue, Predicate, ProcessField, Specification},
};

/// Moves the id sequence past rows inserted with explicit ids.
const SYNC_ID_SEQUENCE: &str =
    "SELECT setval(pg_get_serial_sequence('process', 'id'), GREATEST((SELECT MAX(id) FROM process), 1))";

#[derive(Clone)]
pub struct PgProcessRepository {
    db: DatabaseConnection,
}

impl PgProcessRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn column(field: ProcessField) -> entity::Column {
    match field {
        ProcessField::Id => entity::Column::Id,
        ProcessField::Title => entity::Column::Title,
        ProcessField::Code => entity::Column::Code,
    }
}

fn sort_column(field: ProcessSortField) -> entity::Column {
    match field {
        ProcessSortField::Id => entity::Column::Id,
        ProcessSortField::Title => entity::Column::Title,
        ProcessSortField::Code => entity::Column::Code,
    }
}

fn value(value: &FieldValue) -> sea_orm::Value {
    match value {
        FieldValue::Int(v) => (*v).into(),
        FieldValue::Text(v) => v.clone().into(),
    }
}

/// `%needle%` with LIKE wildcards in the needle taken literally.
fn contains_pattern(needle: &str) -> LikeExpr {
    LikeExpr::new(escape_like(needle)).escape('\\')
}

fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn and_predicate(condition: Condition, predicate: &Predicate) -> Condition {
    let col = column(predicate.field());
    match predicate {
        Predicate::Equals(_, v) => condition.add(col.eq(value(v))),
        Predicate::NotEquals(_, v) => condition.add(col.ne(value(v))),
        Predicate::In(_, vs) => condition.add(col.is_in(vs.iter().map(value))),
        Predicate::NotIn(_, vs) => condition.add(col.is_not_in(vs.iter().map(value))),
        Predicate::Specified(_, true) => condition.add(col.is_not_null()),
        Predicate::Specified(_, false) => condition.add(col.is_null()),
        Predicate::GreaterThan(_, v) => condition.add(col.gt(value(v))),
        Predicate::LessThan(_, v) => condition.add(col.lt(value(v))),
        Predicate::GreaterThanOrEqual(_, v) => condition.add(col.gte(value(v))),
        Predicate::LessThanOrEqual(_, v) => condition.add(col.lte(value(v))),
        Predicate::Contains(_, needle) => condition.add(col.like(contains_pattern(needle))),
        Predicate::DoesNotContain(_, needle) => condition.add(col.not_like(contains_pattern(needle))),
    }
}

/// Render a specification as a `WHERE` condition.
///
/// SQL comparison semantics give the same NULL handling as
/// [`Specification::matches`].
pub fn to_condition(spec: &Specification) -> Condition {
    spec.predicates().iter().fold(Condition::all(), and_predicate)
}

#[async_trait]
impl ProcessRepository for PgProcessRepository {
    async fn save(&self, process: Process) -> ProcessResult<Process> {
        let txn = transaction::read_write(&self.db).await?;

        let model = match process.id {
            None => entity::ActiveModel::from(process).insert(&txn).await?,
            Some(_) => {
                let model = entity::Entity::insert(entity::ActiveModel::from(process))
                    .on_conflict(
                        OnConflict::column(entity::Column::Id)
                            .update_columns([entity::Column::Title, entity::Column::Code])
                            .to_owned(),
                    )
                    .exec_with_returning(&txn)
                    .await?;
                txn.execute_unprepared(SYNC_ID_SEQUENCE).await?;
                model
            }
        };

        txn.commit().await?;
        tracing::info!(process_id = model.id, "Saved process");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> ProcessResult<Option<Process>> {
        let txn = transaction::read_only(&self.db).await?;
        let model = entity::Entity::find_by_id(id).one(&txn).await?;
        txn.commit().await?;

        Ok(model.map(Into::into))
    }

    async fn find_all(&self, spec: &Specification) -> ProcessResult<Vec<Process>> {
        let txn = transaction::read_only(&self.db).await?;
        let models = entity::Entity::find()
            .filter(to_condition(spec))
            .order_by_asc(entity::Column::Id)
            .all(&txn)
            .await?;
        txn.commit().await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_page(
        &self,
        spec: &Specification,
        page: &PageRequest<ProcessSortField>,
    ) -> ProcessResult<Page<Process>> {
        let condition = to_condition(spec);
        let txn = transaction::read_only(&self.db).await?;

        let total = entity::Entity::find().filter(condition.clone()).count(&txn).await?;

        let mut query = entity::Entity::find().filter(condition);
        for sort in page.sort() {
            let order = match sort.direction {
                SortDirection::Asc => Order::Asc,
                SortDirection::Desc => Order::Desc,
            };
            query = query.order_by(sort_column(sort.field), order);
        }
        let models = query
            .order_by_asc(entity::Column::Id)
            .limit(page.size())
            .offset(page.offset())
            .all(&txn)
            .await?;

        txn.commit().await?;

        Ok(Page::new(models.into_iter().map(Into::into).collect(), page, total))
    }

    async fn count(&self, spec: &Specification) -> ProcessResult<u64> {
        let txn = transaction::read_only(&self.db).await?;
        let total = entity::Entity::find().filter(to_condition(spec)).count(&txn).await?;
        txn.commit().await?;

        Ok(total)
    }

    async fn delete_by_id(&self, id: i64) -> ProcessResult<bool> {
        let txn = transaction::read_write(&self.db).await?;
        let result = entity::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(process_id = id, "Deleted process");
        }
        Ok(deleted)
    }
}
