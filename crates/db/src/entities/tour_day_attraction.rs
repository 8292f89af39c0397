//! Tour day / attraction join entity.

use sea_orm::entity::prelude::*;

/// Ordered link between a tour day and an attraction.
///
/// Positions are dense and 1-based in the order the editor submitted them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tour_day_attraction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub tour_day_id: String,

    pub attraction_id: String,

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
        belongs_to = "super::attraction::Entity",
        from = "Column::AttractionId",
        to = "super::attraction::Column::Id",
        on_delete = "Cascade"
    )]
    Attraction,
}

impl Related<super::tour_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TourDay.def()
    }
}

impl Related<super::attraction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attraction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
