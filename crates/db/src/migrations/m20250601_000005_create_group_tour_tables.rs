//! Create group_tour, group_tour_day and group_tour_media tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create group_tour table
        manager
            .create_table(
                Table::create()
                    .table(GroupTour::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GroupTour::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GroupTour::Title).string_len(255).not_null())
                    .col(
                        ColumnDef::new(GroupTour::ShortDescription)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GroupTour::Description).text().not_null())
                    .col(ColumnDef::new(GroupTour::GroupSize).integer().not_null())
                    .col(ColumnDef::new(GroupTour::CreatedBy).string().null())
                    .col(
                        ColumnDef::new(GroupTour::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupTour::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupTour::IsArchived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GroupTour::ArchivedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_tour_created_by")
                            .from(GroupTour::Table, GroupTour::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_group_tour_is_archived")
                    .table(GroupTour::Table)
                    .col(GroupTour::IsArchived)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_group_tour_created_at")
                    .table(GroupTour::Table)
                    .col(GroupTour::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Create group_tour_day table
        manager
            .create_table(
                Table::create()
                    .table(GroupTourDay::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GroupTourDay::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GroupTourDay::GroupTourId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GroupTourDay::TourDayId).string().not_null())
                    .col(
                        ColumnDef::new(GroupTourDay::DayNumber)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_tour_day_tour")
                            .from(GroupTourDay::Table, GroupTourDay::GroupTourId)
                            .to(GroupTour::Table, GroupTour::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_tour_day_day")
                            .from(GroupTourDay::Table, GroupTourDay::TourDayId)
                            .to(TourDay::Table, TourDay::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // No duplicate day links per tour
        manager
            .create_index(
                Index::create()
                    .name("idx_group_tour_day_unique")
                    .table(GroupTourDay::Table)
                    .col(GroupTourDay::GroupTourId)
                    .col(GroupTourDay::TourDayId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create group_tour_media table
        manager
            .create_table(
                Table::create()
                    .table(GroupTourMedia::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GroupTourMedia::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GroupTourMedia::GroupTourId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupTourMedia::FilePath)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GroupTourMedia::Url).string().not_null())
                    .col(
                        ColumnDef::new(GroupTourMedia::MediaKind)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupTourMedia::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_tour_media_tour")
                            .from(GroupTourMedia::Table, GroupTourMedia::GroupTourId)
                            .to(GroupTour::Table, GroupTour::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_group_tour_media_tour_id")
                    .table(GroupTourMedia::Table)
                    .col(GroupTourMedia::GroupTourId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroupTourMedia::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GroupTourDay::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GroupTour::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum GroupTour {
    Table,
    Id,
    Title,
    ShortDescription,
    Description,
    GroupSize,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
    IsArchived,
    ArchivedAt,
}

#[derive(Iden)]
enum GroupTourDay {
    Table,
    Id,
    GroupTourId,
    TourDayId,
    DayNumber,
}

#[derive(Iden)]
enum GroupTourMedia {
    Table,
    Id,
    GroupTourId,
    FilePath,
    Url,
    MediaKind,
    CreatedAt,
}

#[derive(Iden)]
enum TourDay {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
