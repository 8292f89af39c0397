//! Attraction repository.

use std::sync::Arc;

use crate::entities::{Attraction, attraction};
use potours_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Attraction repository for database operations.
#[derive(Clone)]
pub struct AttractionRepository {
    db: Arc<DatabaseConnection>,
}

impl AttractionRepository {
    /// Create a new attraction repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an attraction by ID, archived or not.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<attraction::Model>> {
        Attraction::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an attraction by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<attraction::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attraction: {id}")))
    }

    /// Find active attractions ordered by title.
    pub async fn find_active(&self) -> AppResult<Vec<attraction::Model>> {
        Attraction::find()
            .filter(attraction::Column::IsArchived.eq(false))
            .order_by_asc(attraction::Column::Title)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find archived attractions ordered by title.
    pub async fn find_archived(&self) -> AppResult<Vec<attraction::Model>> {
        Attraction::find()
            .filter(attraction::Column::IsArchived.eq(true))
            .order_by_asc(attraction::Column::Title)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find ids of active attractions in title order.
    ///
    /// Used by the public detail page to offer prev/next navigation.
    pub async fn find_active_ids(&self) -> AppResult<Vec<String>> {
        Attraction::find()
            .filter(attraction::Column::IsArchived.eq(false))
            .order_by_asc(attraction::Column::Title)
            .select_only()
            .column(attraction::Column::Id)
            .into_tuple::<String>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count active attractions.
    pub async fn count_active(&self) -> AppResult<u64> {
        Attraction::find()
            .filter(attraction::Column::IsArchived.eq(false))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count archived attractions.
    pub async fn count_archived(&self) -> AppResult<u64> {
        Attraction::find()
            .filter(attraction::Column::IsArchived.eq(true))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new attraction.
    pub async fn create(&self, model: attraction::ActiveModel) -> AppResult<attraction::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an attraction.
    pub async fn update(&self, model: attraction::ActiveModel) -> AppResult<attraction::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Archive an attraction. Reapplying keeps it archived.
    pub async fn archive(&self, id: &str) -> AppResult<attraction::Model> {
        let row = self.get_by_id(id).await?;
        let now = chrono::Utc::now();
        let mut active: attraction::ActiveModel = row.into();
        active.is_archived = Set(true);
        active.archived_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        self.update(active).await
    }

    /// Restore an archived attraction.
    pub async fn restore(&self, id: &str) -> AppResult<attraction::Model> {
        let row = self.get_by_id(id).await?;
        let now = chrono::Utc::now();
        let mut active: attraction::ActiveModel = row.into();
        active.is_archived = Set(false);
        active.archived_at = Set(None);
        active.updated_at = Set(now.into());
        self.update(active).await
    }
}
