//! Attraction entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attraction entity - a visitable place offered inside tour days.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attraction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub city: String,

    pub address: String,

    /// Visit duration in hours.
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub duration_hours: Decimal,

    /// Photo URL (optional).
    #[sea_orm(nullable)]
    pub photo_url: Option<String>,

    /// Editor who created the record, if any.
    #[sea_orm(nullable)]
    pub created_by: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,

    /// Soft-delete flag; archived rows are hidden from default listings.
    #[sea_orm(default_value = false)]
    pub is_archived: bool,

    #[sea_orm(nullable)]
    pub archived_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Creator,
    #[sea_orm(has_many = "super::tour_day_attraction::Entity")]
    DayLinks,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::tour_day_attraction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DayLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
