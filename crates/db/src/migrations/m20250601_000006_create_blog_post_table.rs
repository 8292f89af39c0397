//! Create blog_post table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPost::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPost::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogPost::Title).string_len(255).not_null())
                    .col(ColumnDef::new(BlogPost::Body).text().not_null())
                    .col(ColumnDef::new(BlogPost::PublishedAt).date().null())
                    .col(ColumnDef::new(BlogPost::ImageUrl).string().null())
                    .col(ColumnDef::new(BlogPost::CreatedBy).string().null())
                    .col(
                        ColumnDef::new(BlogPost::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogPost::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogPost::IsArchived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BlogPost::ArchivedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_created_by")
                            .from(BlogPost::Table, BlogPost::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_post_published_at")
                    .table(BlogPost::Table)
                    .col(BlogPost::PublishedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_post_is_archived")
                    .table(BlogPost::Table)
                    .col(BlogPost::IsArchived)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPost::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum BlogPost {
    Table,
    Id,
    Title,
    Body,
    PublishedAt,
    ImageUrl,
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
