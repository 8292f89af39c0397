//! Group tour media repository.

use std::sync::Arc;

use crate::entities::{GroupTourMedia, group_tour_media};
use potours_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Group tour media repository for database operations.
#[derive(Clone)]
pub struct GroupTourMediaRepository {
    db: Arc<DatabaseConnection>,
}

impl GroupTourMediaRepository {
    /// Create a new media repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a media attachment by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<group_tour_media::Model>> {
        GroupTourMedia::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a media attachment by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<group_tour_media::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Media attachment: {id}")))
    }

    /// Find the attachments of a group tour, newest first.
    pub async fn find_by_tour(
        &self,
        group_tour_id: &str,
    ) -> AppResult<Vec<group_tour_media::Model>> {
        GroupTourMedia::find()
            .filter(group_tour_media::Column::GroupTourId.eq(group_tour_id))
            .order_by_desc(group_tour_media::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new media attachment.
    pub async fn create(
        &self,
        model: group_tour_media::ActiveModel,
    ) -> AppResult<group_tour_media::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a media attachment. Fails with `NotFound` if it does not exist.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = GroupTourMedia::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Media attachment: {id}")));
        }

        Ok(())
    }
}
