//! Transaction scopes.
//!
//! Repositories open one transaction per operation: read-only for queries,
//! read-write for mutations. Commit explicitly; a dropped transaction rolls
//! back.

use sea_orm::{AccessMode, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

/// Begin a `READ ONLY` transaction
pub async fn read_only(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    db.begin_with_config(None, Some(AccessMode::ReadOnly)).await
}

/// Begin a `READ WRITE` transaction
pub async fn read_write(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    db.begin_with_config(None, Some(AccessMode::ReadWrite)).await
}
