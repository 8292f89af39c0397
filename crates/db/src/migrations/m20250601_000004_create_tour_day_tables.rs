//! Create tour_day, tour_day_attraction and tour_day_include tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create tour_day table
        manager
            .create_table(
                Table::create()
                    .table(TourDay::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TourDay::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TourDay::Title).string_len(255).not_null())
                    .col(ColumnDef::new(TourDay::Description).text().not_null())
                    .col(ColumnDef::new(TourDay::City).string_len(120).not_null())
                    .col(ColumnDef::new(TourDay::Address).string_len(255).not_null())
                    .col(
                        ColumnDef::new(TourDay::DurationHours)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TourDay::PhotoUrl).string().null())
                    .col(ColumnDef::new(TourDay::CreatedBy).string().null())
                    .col(
                        ColumnDef::new(TourDay::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TourDay::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TourDay::IsArchived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TourDay::ArchivedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_day_created_by")
                            .from(TourDay::Table, TourDay::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tour_day_is_archived")
                    .table(TourDay::Table)
                    .col(TourDay::IsArchived)
                    .to_owned(),
            )
            .await?;

        // Create tour_day_attraction table
        manager
            .create_table(
                Table::create()
                    .table(TourDayAttraction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TourDayAttraction::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TourDayAttraction::TourDayId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TourDayAttraction::AttractionId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TourDayAttraction::Position)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_day_attraction_day")
                            .from(TourDayAttraction::Table, TourDayAttraction::TourDayId)
                            .to(TourDay::Table, TourDay::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_day_attraction_attraction")
                            .from(TourDayAttraction::Table, TourDayAttraction::AttractionId)
                            .to(Attraction::Table, Attraction::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // No duplicate links per day
        manager
            .create_index(
                Index::create()
                    .name("idx_tour_day_attraction_unique")
                    .table(TourDayAttraction::Table)
                    .col(TourDayAttraction::TourDayId)
                    .col(TourDayAttraction::AttractionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create tour_day_include table
        manager
            .create_table(
                Table::create()
                    .table(TourDayInclude::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TourDayInclude::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TourDayInclude::TourDayId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TourDayInclude::IncludeId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TourDayInclude::Position)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_day_include_day")
                            .from(TourDayInclude::Table, TourDayInclude::TourDayId)
                            .to(TourDay::Table, TourDay::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_day_include_include")
                            .from(TourDayInclude::Table, TourDayInclude::IncludeId)
                            .to(Include::Table, Include::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tour_day_include_unique")
                    .table(TourDayInclude::Table)
                    .col(TourDayInclude::TourDayId)
                    .col(TourDayInclude::IncludeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TourDayInclude::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TourDayAttraction::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TourDay::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum TourDay {
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
enum TourDayAttraction {
    Table,
    Id,
    TourDayId,
    AttractionId,
    Position,
}

#[derive(Iden)]
enum TourDayInclude {
    Table,
    Id,
    TourDayId,
    IncludeId,
    Position,
}

#[derive(Iden)]
enum Attraction {
    Table,
    Id,
}

#[derive(Iden)]
enum Include {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
