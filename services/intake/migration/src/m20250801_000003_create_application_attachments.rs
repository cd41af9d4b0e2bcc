use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApplicationAttachments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApplicationAttachments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ApplicationAttachments::ApplicationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationAttachments::Category)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationAttachments::FileName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationAttachments::Data)
                            .binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationAttachments::ContentType)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_attachments_application_id")
                            .from(
                                ApplicationAttachments::Table,
                                ApplicationAttachments::ApplicationId,
                            )
                            .to(Applications::Table, Applications::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One attachment per category within an application.
        manager
            .create_index(
                Index::create()
                    .table(ApplicationAttachments::Table)
                    .col(ApplicationAttachments::ApplicationId)
                    .col(ApplicationAttachments::Category)
                    .name("idx_application_attachments_application_id_category")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(ApplicationAttachments::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum ApplicationAttachments {
    Table,
    Id,
    ApplicationId,
    Category,
    FileName,
    Data,
    ContentType,
}

#[derive(Iden)]
enum Applications {
    Table,
    Id,
}
