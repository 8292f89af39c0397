//! Include repository.

use std::sync::Arc;

use crate::entities::{Include, include};
use potours_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

/// Include repository for database operations.
#[derive(Clone)]
pub struct IncludeRepository {
    db: Arc<DatabaseConnection>,
}

impl IncludeRepository {
    /// Create a new include repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an include by ID, archived or not.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<include::Model>> {
        Include::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an include by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<include::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Include: {id}")))
    }

    /// Find active includes ordered by description.
    pub async fn find_active(&self) -> AppResult<Vec<include::Model>> {
        Include::find()
            .filter(include::Column::IsArchived.eq(false))
            .order_by_asc(include::Column::Description)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find archived includes ordered by description.
    pub async fn find_archived(&self) -> AppResult<Vec<include::Model>> {
        Include::find()
            .filter(include::Column::IsArchived.eq(true))
            .order_by_asc(include::Column::Description)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count active includes.
    pub async fn count_active(&self) -> AppResult<u64> {
        Include::find()
            .filter(include::Column::IsArchived.eq(false))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count archived includes.
    pub async fn count_archived(&self) -> AppResult<u64> {
        Include::find()
            .filter(include::Column::IsArchived.eq(true))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new include.
    pub async fn create(&self, model: include::ActiveModel) -> AppResult<include::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an include.
    pub async fn update(&self, model: include::ActiveModel) -> AppResult<include::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Archive an include. Reapplying keeps it archived.
    pub async fn archive(&self, id: &str) -> AppResult<include::Model> {
        let row = self.get_by_id(id).await?;
        let now = chrono::Utc::now();
        let mut active: include::ActiveModel = row.into();
        active.is_archived = Set(true);
        active.archived_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        self.update(active).await
    }

    /// Restore an archived include.
    pub async fn restore(&self, id: &str) -> AppResult<include::Model> {
        let row = self.get_by_id(id).await?;
        let now = chrono::Utc::now();
        let mut active: include::ActiveModel = row.into();
        active.is_archived = Set(false);
        active.archived_at = Set(None);
        active.updated_at = Set(now.into());
        self.update(active).await
    }
}
