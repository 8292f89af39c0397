//! Group tour / tour day join entity.

use sea_orm::entity::prelude::*;

/// Ordered link between a group tour and a tour day.
///
/// Day numbers are dense and 1-based in the order the editor submitted them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "group_tour_day")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub group_tour_id: String,

    pub tour_day_id: String,

    /// Position of the day within the tour, starting at 1.
    pub day_number: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::group_tour::Entity",
        from = "Column::GroupTourId",
        to = "super::group_tour::Column::Id",
        on_delete = "Cascade"
    )]
    GroupTour,
    #[sea_orm(
        belongs_to = "super::tour_day::Entity",
        from = "Column::TourDayId",
        to = "super::tour_day::Column::Id",
        on_delete = "Cascade"
    )]
    TourDay,
}

impl Related<super::group_tour::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupTour.def()
    }
}

impl Related<super::tour_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TourDay.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
