//! Editor account entity.
//!
//! Authentication itself lives outside this service; this table only exists
//! so catalog records can carry a creator reference and the blog list can
//! sort by author.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Editor account entity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Login name, unique.
    #[sea_orm(unique)]
    pub username: String,

    /// Bearer token resolved by the auth middleware.
    #[sea_orm(unique, nullable)]
    pub token: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attraction::Entity")]
    Attractions,
    #[sea_orm(has_many = "super::tour_day::Entity")]
    TourDays,
    #[sea_orm(has_many = "super::group_tour::Entity")]
    GroupTours,
    #[sea_orm(has_many = "super::blog_post::Entity")]
    BlogPosts,
}

impl Related<super::attraction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attractions.def()
    }
}

impl Related<super::blog_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BlogPosts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
