use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Process::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Process::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Process::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Process::Code).string_len(255).null())
                    .to_owned(),
            )
            .await?;

        // Equality and range filters hit these columns
        manager
            .create_index(
                Index::create()
                    .name("idx_process_title")
                    .table(Process::Table)
                    .col(Process::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_process_code")
                    .table(Process::Table)
                    .col(Process::Code)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Process::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Process {
    Table,
    Id,
    Title,
    Code,
}
