//! Group tour repository.

use std::sync::Arc;

use crate::entities::{GroupTour, GroupTourDay, TourDay, group_tour, group_tour_day, tour_day};
use potours_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait, sea_query::Expr,
};

/// Replace every day link row of a tour within the given connection.
async fn replace_day_rows<C: ConnectionTrait>(
    conn: &C,
    group_tour_id: &str,
    rows: Vec<group_tour_day::ActiveModel>,
) -> AppResult<()> {
    GroupTourDay::delete_many()
        .filter(group_tour_day::Column::GroupTourId.eq(group_tour_id))
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

/// Group tour repository for database operations.
#[derive(Clone)]
pub struct GroupTourRepository {
    db: Arc<DatabaseConnection>,
}

impl GroupTourRepository {
    /// Create a new group tour repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a group tour by ID, archived or not.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<group_tour::Model>> {
        GroupTour::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a group tour by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<group_tour::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group tour: {id}")))
    }

    /// Get an active group tour by ID (public detail pages).
    pub async fn get_active_by_id(&self, id: &str) -> AppResult<group_tour::Model> {
        GroupTour::find_by_id(id)
            .filter(group_tour::Column::IsArchived.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("Group tour: {id}")))
    }

    /// Find active group tours ordered by title (catalog listing).
    pub async fn find_active(&self) -> AppResult<Vec<group_tour::Model>> {
        GroupTour::find()
            .filter(group_tour::Column::IsArchived.eq(false))
            .order_by_asc(group_tour::Column::Title)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find archived group tours ordered by title.
    pub async fn find_archived(&self) -> AppResult<Vec<group_tour::Model>> {
        GroupTour::find()
            .filter(group_tour::Column::IsArchived.eq(true))
            .order_by_asc(group_tour::Column::Title)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find active group tours, newest first (public tours page).
    pub async fn find_recent(&self) -> AppResult<Vec<group_tour::Model>> {
        GroupTour::find()
            .filter(group_tour::Column::IsArchived.eq(false))
            .order_by_desc(group_tour::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all group tours including archived, newest first.
    pub async fn find_all_recent(&self) -> AppResult<Vec<group_tour::Model>> {
        GroupTour::find()
            .order_by_desc(group_tour::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Pick random active group tours for the home page.
    pub async fn find_featured(&self, limit: u64) -> AppResult<Vec<group_tour::Model>> {
        GroupTour::find()
            .filter(group_tour::Column::IsArchived.eq(false))
            .order_by(Expr::cust("RANDOM()"), Order::Asc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count active group tours.
    pub async fn count_active(&self) -> AppResult<u64> {
        GroupTour::find()
            .filter(group_tour::Column::IsArchived.eq(false))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count archived group tours.
    pub async fn count_archived(&self) -> AppResult<u64> {
        GroupTour::find()
            .filter(group_tour::Column::IsArchived.eq(true))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a group tour together with its day link rows, atomically.
    pub async fn create_with_days(
        &self,
        model: group_tour::ActiveModel,
        day_rows: Vec<group_tour_day::ActiveModel>,
    ) -> AppResult<group_tour::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let tour = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        replace_day_rows(&txn, &tour.id, day_rows).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(tour)
    }

    /// Update a group tour and replace its day link rows, atomically.
    pub async fn update_with_days(
        &self,
        model: group_tour::ActiveModel,
        day_rows: Vec<group_tour_day::ActiveModel>,
    ) -> AppResult<group_tour::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let tour = model
            .update(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        replace_day_rows(&txn, &tour.id, day_rows).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(tour)
    }

    /// Update a group tour.
    pub async fn update(&self, model: group_tour::ActiveModel) -> AppResult<group_tour::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Archive a group tour. Reapplying keeps it archived.
    pub async fn archive(&self, id: &str) -> AppResult<group_tour::Model> {
        let row = self.get_by_id(id).await?;
        let now = chrono::Utc::now();
        let mut active: group_tour::ActiveModel = row.into();
        active.is_archived = Set(true);
        active.archived_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        self.update(active).await
    }

    /// Restore an archived group tour.
    pub async fn restore(&self, id: &str) -> AppResult<group_tour::Model> {
        let row = self.get_by_id(id).await?;
        let now = chrono::Utc::now();
        let mut active: group_tour::ActiveModel = row.into();
        active.is_archived = Set(false);
        active.archived_at = Set(None);
        active.updated_at = Set(now.into());
        self.update(active).await
    }

    // ==================== Day Link Operations ====================

    /// Replace the day links of a group tour.
    ///
    /// Deletes every existing link row for the tour and inserts the given
    /// rows, all inside one transaction so readers never observe a partial
    /// itinerary.
    pub async fn replace_days(
        &self,
        group_tour_id: &str,
        rows: Vec<group_tour_day::ActiveModel>,
    ) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        replace_day_rows(&txn, group_tour_id, rows).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the day link rows of a group tour ordered by day number.
    pub async fn find_day_links(
        &self,
        group_tour_id: &str,
    ) -> AppResult<Vec<group_tour_day::Model>> {
        GroupTourDay::find()
            .filter(group_tour_day::Column::GroupTourId.eq(group_tour_id))
            .order_by_asc(group_tour_day::Column::DayNumber)
            .order_by_asc(group_tour_day::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the day links of a group tour together with their tour days,
    /// ordered by day number.
    pub async fn find_days(
        &self,
        group_tour_id: &str,
    ) -> AppResult<Vec<(group_tour_day::Model, tour_day::Model)>> {
        let rows = GroupTourDay::find()
            .filter(group_tour_day::Column::GroupTourId.eq(group_tour_id))
            .order_by_asc(group_tour_day::Column::DayNumber)
            .order_by_asc(group_tour_day::Column::Id)
            .find_also_related(TourDay)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, day)| day.map(|d| (link, d)))
            .collect())
    }
}
