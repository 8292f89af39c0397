//! Group tour media attachment entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of an uploaded media attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "video")]
    Video,
}

/// Media attachment entity - an uploaded image or video owned by exactly
/// one group tour. Deleted along with its tour.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "group_tour_media")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub group_tour_id: String,

    /// Storage key relative to the media root.
    pub file_path: String,

    /// Public URL the file is served from.
    pub url: String,

    pub media_kind: MediaKind,

    pub created_at: DateTimeWithTimeZone,
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
}

impl Related<super::group_tour::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupTour.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
