//! Group tour entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Group tour entity - a multi-day packaged tour built from tour days.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "group_tour")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    /// One-line teaser shown on cards.
    pub short_description: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Number of travellers per departure.
    pub group_size: i32,

    /// Editor who created the record, if any.
    #[sea_orm(nullable)]
    pub created_by: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,

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
    #[sea_orm(has_many = "super::group_tour_day::Entity")]
    DayLinks,
    #[sea_orm(has_many = "super::group_tour_media::Entity")]
    Media,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::group_tour_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DayLinks.def()
    }
}

impl Related<super::group_tour_media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Media.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
