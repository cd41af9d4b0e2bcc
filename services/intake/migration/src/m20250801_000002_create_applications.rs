use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // Unique constraint backs the retry-on-conflict minting in
                    // the intake usecase.
                    .col(
                        ColumnDef::new(Applications::ApplicationId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Applications::PassportType).string())
                    .col(ColumnDef::new(Applications::OnlineRegistrationNumber).string())
                    .col(ColumnDef::new(Applications::FullName).string())
                    .col(ColumnDef::new(Applications::DateOfBirth).string())
                    .col(ColumnDef::new(Applications::MobileNumber).string())
                    .col(ColumnDef::new(Applications::Extra).json_binary().not_null())
                    .col(
                        ColumnDef::new(Applications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Applications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Applications::Table)
                    .col(Applications::CreatedAt)
                    .name("idx_applications_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Applications {
    Table,
    Id,
    ApplicationId,
    PassportType,
    OnlineRegistrationNumber,
    FullName,
    DateOfBirth,
    MobileNumber,
    Extra,
    CreatedAt,
    UpdatedAt,
}
