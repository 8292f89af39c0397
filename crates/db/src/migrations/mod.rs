//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_user_table;
mod m20250601_000002_create_attraction_table;
mod m20250601_000003_create_include_table;
mod m20250601_000004_create_tour_day_tables;
mod m20250601_000005_create_group_tour_tables;
mod m20250601_000006_create_blog_post_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_user_table::Migration),
            Box::new(m20250601_000002_create_attraction_table::Migration),
            Box::new(m20250601_000003_create_include_table::Migration),
            Box::new(m20250601_000004_create_tour_day_tables::Migration),
            Box::new(m20250601_000005_create_group_tour_tables::Migration),
            Box::new(m20250601_000006_create_blog_post_table::Migration),
        ]
    }
}
