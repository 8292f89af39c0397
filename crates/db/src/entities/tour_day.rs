//! Tour day entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tour day entity - one reusable day of sightseeing, with ordered
/// attractions and includes attached through join tables.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tour_day")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub city: String,

    pub address: String,

    /// Day duration in hours.
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
    AttractionLinks,
    #[sea_orm(has_many = "super::tour_day_include::Entity")]
    IncludeLinks,
    #[sea_orm(has_many = "super::group_tour_day::Entity")]
    TourLinks,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::tour_day_attraction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttractionLinks.def()
    }
}

impl Related<super::tour_day_include::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncludeLinks.def()
    }
}

impl Related<super::group_tour_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TourLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
