use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProgressHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProgressHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProgressHistory::User)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProgressHistory::Document)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProgressHistory::Percentage)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProgressHistory::Progress)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProgressHistory::Device).string().not_null())
                    .col(
                        ColumnDef::new(ProgressHistory::DeviceId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProgressHistory::Timestamp)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_progress_history_user_document")
                    .table(ProgressHistory::Table)
                    .col(ProgressHistory::User)
                    .col(ProgressHistory::Document)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProgressHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProgressHistory {
    Table,
    Id,
    User,
    Document,
    Percentage,
    Progress,
    Device,
    DeviceId,
    Timestamp,
}
