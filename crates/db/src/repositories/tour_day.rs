//! Tour day repository.

use std::sync::Arc;

use crate::entities::{
    Attraction, Include, TourDay, TourDayAttraction, TourDayInclude, attraction, include, tour_day,
    tour_day_attraction, tour_day_include,
};
use potours_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// Replace every attraction link row of a day within the given connection.
async fn replace_attraction_rows<C: ConnectionTrait>(
    conn: &C,
    tour_day_id: &str,
    rows: Vec<tour_day_attraction::ActiveModel>,
) -> AppResult<()> {
    TourDayAttraction::delete_many()
        .filter(tour_day_attraction::Column::TourDayId.eq(tour_day_id))
        .exec(conn)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    for row in rows {
        row.insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    Ok(())
}

/// Replace every include link row of a day within the given connection.
async fn replace_include_rows<C: ConnectionTrait>(
    conn: &C,
    tour_day_id: &str,
    rows: Vec<tour_day_include::ActiveModel>,
) -> AppResult<()> {
    TourDayInclude::delete_many()
        .filter(tour_day_include::Column::TourDayId.eq(tour_day_id))
        .exec(conn)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    for row in rows {
        row.insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    Ok(())
}

/// Tour day repository for database operations.
#[derive(Clone)]
pub struct TourDayRepository {
    db: Arc<DatabaseConnection>,
}

impl TourDayRepository {
    /// Create a new tour day repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a tour day by ID, archived or not.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<tour_day::Model>> {
        TourDay::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a tour day by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<tour_day::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tour day: {id}")))
    }

    /// Find active tour days ordered by title.
    pub async fn find_active(&self) -> AppResult<Vec<tour_day::Model>> {
        TourDay::find()
            .filter(tour_day::Column::IsArchived.eq(false))
            .order_by_asc(tour_day::Column::Title)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find archived tour days ordered by title.
    pub async fn find_archived(&self) -> AppResult<Vec<tour_day::Model>> {
        TourDay::find()
            .filter(tour_day::Column::IsArchived.eq(true))
            .order_by_asc(tour_day::Column::Title)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count active tour days.
    pub async fn count_active(&self) -> AppResult<u64> {
        TourDay::find()
            .filter(tour_day::Column::IsArchived.eq(false))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count archived tour days.
    pub async fn count_archived(&self) -> AppResult<u64> {
        TourDay::find()
            .filter(tour_day::Column::IsArchived.eq(true))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a tour day together with its link rows, atomically.
    pub async fn create_with_links(
        &self,
        model: tour_day::ActiveModel,
        attraction_rows: Vec<tour_day_attraction::ActiveModel>,
        include_rows: Vec<tour_day_include::ActiveModel>,
    ) -> AppResult<tour_day::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let day = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        replace_attraction_rows(&txn, &day.id, attraction_rows).await?;
        replace_include_rows(&txn, &day.id, include_rows).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(day)
    }

    /// Update a tour day and replace its link rows, atomically.
    pub async fn update_with_links(
        &self,
        model: tour_day::ActiveModel,
        attraction_rows: Vec<tour_day_attraction::ActiveModel>,
        include_rows: Vec<tour_day_include::ActiveModel>,
    ) -> AppResult<tour_day::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let day = model
            .update(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        replace_attraction_rows(&txn, &day.id, attraction_rows).await?;
        replace_include_rows(&txn, &day.id, include_rows).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(day)
    }

    /// Update a tour day.
    pub async fn update(&self, model: tour_day::ActiveModel) -> AppResult<tour_day::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Archive a tour day. Reapplying keeps it archived.
    pub async fn archive(&self, id: &str) -> AppResult<tour_day::Model> {
        let row = self.get_by_id(id).await?;
        let now = chrono::Utc::now();
        let mut active: tour_day::ActiveModel = row.into();
        active.is_archived = Set(true);
        active.archived_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        self.update(active).await
    }

    /// Restore an archived tour day.
    pub async fn restore(&self, id: &str) -> AppResult<tour_day::Model> {
        let row = self.get_by_id(id).await?;
        let now = chrono::Utc::now();
        let mut active: tour_day::ActiveModel = row.into();
        active.is_archived = Set(false);
        active.archived_at = Set(None);
        active.updated_at = Set(now.into());
        self.update(active).await
    }

    // ==================== Association Operations ====================

    /// Replace the attraction links of a tour day.
    ///
    /// Deletes every existing link row for the day and inserts the given
    /// rows, all inside one transaction so readers never observe a partial
    /// set.
    pub async fn replace_attractions(
        &self,
        tour_day_id: &str,
        rows: Vec<tour_day_attraction::ActiveModel>,
    ) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        replace_attraction_rows(&txn, tour_day_id, rows).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Replace the include links of a tour day.
    pub async fn replace_includes(
        &self,
        tour_day_id: &str,
        rows: Vec<tour_day_include::ActiveModel>,
    ) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        replace_include_rows(&txn, tour_day_id, rows).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the attraction link rows of a tour day in stored order.
    pub async fn find_attraction_links(
        &self,
        tour_day_id: &str,
    ) -> AppResult<Vec<tour_day_attraction::Model>> {
        TourDayAttraction::find()
            .filter(tour_day_attraction::Column::TourDayId.eq(tour_day_id))
            .order_by_asc(tour_day_attraction::Column::Position)
            .order_by_asc(tour_day_attraction::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the include link rows of a tour day in stored order.
    pub async fn find_include_links(
        &self,
        tour_day_id: &str,
    ) -> AppResult<Vec<tour_day_include::Model>> {
        TourDayInclude::find()
            .filter(tour_day_include::Column::TourDayId.eq(tour_day_id))
            .order_by_asc(tour_day_include::Column::Position)
            .order_by_asc(tour_day_include::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the active attractions of a tour day in stored order.
    pub async fn find_attractions(&self, tour_day_id: &str) -> AppResult<Vec<attraction::Model>> {
        let rows = TourDayAttraction::find()
            .filter(tour_day_attraction::Column::TourDayId.eq(tour_day_id))
            .order_by_asc(tour_day_attraction::Column::Position)
            .order_by_asc(tour_day_attraction::Column::Id)
            .find_also_related(Attraction)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, a)| a)
            .filter(|a| !a.is_archived)
            .collect())
    }

    /// Find the active includes of a tour day in stored order.
    pub async fn find_includes(&self, tour_day_id: &str) -> AppResult<Vec<include::Model>> {
        let rows = TourDayInclude::find()
            .filter(tour_day_include::Column::TourDayId.eq(tour_day_id))
            .order_by_asc(tour_day_include::Column::Position)
            .order_by_asc(tour_day_include::Column::Id)
            .find_also_related(Include)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, i)| i)
            .filter(|i| !i.is_archived)
            .collect())
    }
}
