//! Include entity - a "what's included" line item shown on tour pages.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Include entity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "include")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Icon path relative to the media root. May be empty.
    #[sea_orm(default_value = "")]
    pub icon_path: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,

    #[sea_orm(default_value = false)]
    pub is_archived: bool,

    #[sea_orm(nullable)]
    pub archived_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tour_day_include::Entity")]
    DayLinks,
}

impl Related<super::tour_day_include::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DayLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
