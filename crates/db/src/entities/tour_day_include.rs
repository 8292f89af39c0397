//! Tour day / include join entity.

use sea_orm::entity::prelude::*;

/// Ordered link between a tour day and an include.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tour_day_include")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub tour_day_id: String,

    pub include_id: String,

    /// Display order within the day.
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tour_day::Entity",
        from = "Column::TourDayId",
        to = "super::tour_day::Column::Id",
        on_delete = "Cascade"
    )]
    TourDay,
    #[sea_orm(
        belongs_to = "super::include::Entity",
        from = "Column::IncludeId",
        to = "super::include::Column::Id",
        on_delete = "Cascade"
    )]
    Include,
}

impl Related<super::tour_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TourDay.def()
    }
}

impl Related<super::include::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Include.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
