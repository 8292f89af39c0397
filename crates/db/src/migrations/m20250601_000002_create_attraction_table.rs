//! Create attraction table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attraction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attraction::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Attraction::Title)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attraction::Description).text().not_null())
                    .col(ColumnDef::new(Attraction::City).string_len(120).not_null())
                    .col(
                        ColumnDef::new(Attraction::Address)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attraction::DurationHours)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attraction::PhotoUrl).string().null())
                    .col(ColumnDef::new(Attraction::CreatedBy).string().null())
                    .col(
                        ColumnDef::new(Attraction::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attraction::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attraction::IsArchived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Attraction::ArchivedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attraction_created_by")
                            .from(Attraction::Table, Attraction::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attraction_title")
                    .table(Attraction::Table)
                    .col(Attraction::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attraction_is_archived")
                    .table(Attraction::Table)
                    .col(Attraction::IsArchived)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attraction::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Attraction {
    Table,
    Id,
    Title,
    Description,
    City,
    Address,
    DurationHours,
    PhotoUrl,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
    IsArchived,
    ArchivedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
