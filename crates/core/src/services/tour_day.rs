//! Tour day catalog service.

use potours_common::{AppError, AppResult, IdGenerator};
use potours_db::entities::{tour_day, tour_day_attraction, tour_day_include};
use potours_db::repositories::TourDayRepository;
use rust_decimal::Decimal;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

use super::EntityCounts;

/// Input for creating or editing a tour day.
///
/// The attraction and include id sequences fully replace the day's links;
/// stored order follows the submitted order.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTourDayInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 120))]
    pub city: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    pub duration_hours: Decimal,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub attraction_ids: Vec<String>,
    #[serde(default)]
    pub include_ids: Vec<String>,
}

/// Catalog response for a tour day.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDayResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub city: String,
    pub address: String,
    pub duration_hours: Decimal,
    pub photo_url: Option<String>,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub is_archived: bool,
    pub archived_at: Option<String>,
    /// Linked attraction ids in stored order; populated on single-record
    /// reads, empty in listings.
    #[serde(default)]
    pub attraction_ids: Vec<String>,
    /// Linked include ids in stored order; populated on single-record
    /// reads, empty in listings.
    #[serde(default)]
    pub include_ids: Vec<String>,
}

impl From<tour_day::Model> for TourDayResponse {
    fn from(d: tour_day::Model) -> Self {
        Self {
            id: d.id,
            title: d.title,
            description: d.description,
            city: d.city,
            address: d.address,
            duration_hours: d.duration_hours,
            photo_url: d.photo_url,
            created_by: d.created_by,
            created_at: d.created_at.to_rfc3339(),
            updated_at: d.updated_at.to_rfc3339(),
            is_archived: d.is_archived,
            archived_at: d.archived_at.map(|t| t.to_rfc3339()),
            attraction_ids: Vec::new(),
            include_ids: Vec::new(),
        }
    }
}

/// Catalog listing: active and archived tour days.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDayListResponse {
    pub items: Vec<TourDayResponse>,
    pub archived_items: Vec<TourDayResponse>,
}

/// Build attraction link rows for a day: duplicates collapse to their first
/// occurrence, positions are dense and 1-based in submitted order.
fn attraction_rows(
    tour_day_id: &str,
    attraction_ids: &[String],
    id_gen: &IdGenerator,
) -> Vec<tour_day_attraction::ActiveModel> {
    let mut seen = HashSet::new();
    attraction_ids
        .iter()
        .filter(|id| seen.insert((*id).clone()))
        .enumerate()
        .map(|(idx, attraction_id)| tour_day_attraction::ActiveModel {
            id: Set(id_gen.generate()),
            tour_day_id: Set(tour_day_id.to_string()),
            attraction_id: Set(attraction_id.clone()),
            position: Set(i32::try_from(idx).unwrap_or(i32::MAX) + 1),
        })
        .collect()
}

/// Build include link rows for a day, same rules as [`attraction_rows`].
fn include_rows(
    tour_day_id: &str,
    include_ids: &[String],
    id_gen: &IdGenerator,
) -> Vec<tour_day_include::ActiveModel> {
    let mut seen = HashSet::new();
    include_ids
        .iter()
        .filter(|id| seen.insert((*id).clone()))
        .enumerate()
        .map(|(idx, include_id)| tour_day_include::ActiveModel {
            id: Set(id_gen.generate()),
            tour_day_id: Set(tour_day_id.to_string()),
            include_id: Set(include_id.clone()),
            position: Set(i32::try_from(idx).unwrap_or(i32::MAX) + 1),
        })
        .collect()
}

/// Service for managing tour days.
#[derive(Clone)]
pub struct TourDayService {
    repo: TourDayRepository,
    id_gen: IdGenerator,
}

impl TourDayService {
    /// Create a new tour day service.
    #[must_use]
    pub const fn new(repo: TourDayRepository) -> Self {
        Self {
            repo,
            id_gen: IdGenerator::new(),
        }
    }

    fn validate(input: &CreateTourDayInput) -> AppResult<()> {
        input.validate()?;
        if input.duration_hours <= Decimal::ZERO {
            return Err(AppError::Validation(
                "Duration must be a positive number of hours".to_string(),
            ));
        }
        Ok(())
    }

    /// Catalog listing of active and archived tour days.
    pub async fn list(&self) -> AppResult<TourDayListResponse> {
        let items = self.repo.find_active().await?;
        let archived_items = self.repo.find_archived().await?;
        Ok(TourDayListResponse {
            items: items.into_iter().map(Into::into).collect(),
            archived_items: archived_items.into_iter().map(Into::into).collect(),
        })
    }

    /// Get one tour day with its link ids in stored order.
    pub async fn get(&self, id: &str) -> AppResult<TourDayResponse> {
        let row = self.repo.get_by_id(id).await?;
        let attraction_links = self.repo.find_attraction_links(id).await?;
        let include_links = self.repo.find_include_links(id).await?;

        let mut response = TourDayResponse::from(row);
        response.attraction_ids = attraction_links
            .into_iter()
            .map(|l| l.attraction_id)
            .collect();
        response.include_ids = include_links.into_iter().map(|l| l.include_id).collect();
        Ok(response)
    }

    /// Create a tour day with its attraction and include links, atomically.
    pub async fn create(
        &self,
        actor: Option<&str>,
        input: CreateTourDayInput,
    ) -> AppResult<TourDayResponse> {
        Self::validate(&input)?;

        let now = chrono::Utc::now();
        let day_id = self.id_gen.generate();
        let model = tour_day::ActiveModel {
            id: Set(day_id.clone()),
            title: Set(input.title),
            description: Set(input.description),
            city: Set(input.city),
            address: Set(input.address),
            duration_hours: Set(input.duration_hours),
            photo_url: Set(input.photo_url),
            created_by: Set(actor.map(ToOwned::to_owned)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            is_archived: Set(false),
            archived_at: Set(None),
        };

        let day = self
            .repo
            .create_with_links(
                model,
                attraction_rows(&day_id, &input.attraction_ids, &self.id_gen),
                include_rows(&day_id, &input.include_ids, &self.id_gen),
            )
            .await?;

        self.get(&day.id).await
    }

    /// Update a tour day, replacing its links with the submitted sequences.
    pub async fn update(
        &self,
        id: &str,
        actor: Option<&str>,
        input: CreateTourDayInput,
    ) -> AppResult<TourDayResponse> {
        Self::validate(&input)?;

        let row = self.repo.get_by_id(id).await?;
        let created_by = row.created_by.clone().or_else(|| actor.map(ToOwned::to_owned));

        let mut model: tour_day::ActiveModel = row.into();
        model.title = Set(input.title);
        model.description = Set(input.description);
        model.city = Set(input.city);
        model.address = Set(input.address);
        model.duration_hours = Set(input.duration_hours);
        model.photo_url = Set(input.photo_url);
        model.created_by = Set(created_by);
        model.updated_at = Set(chrono::Utc::now().into());

        let day = self
            .repo
            .update_with_links(
                model,
                attraction_rows(id, &input.attraction_ids, &self.id_gen),
                include_rows(id, &input.include_ids, &self.id_gen),
            )
            .await?;

        self.get(&day.id).await
    }

    /// Move a tour day to the archive.
    pub async fn archive(&self, id: &str) -> AppResult<TourDayResponse> {
        Ok(self.repo.archive(id).await?.into())
    }

    /// Restore a tour day from the archive.
    pub async fn restore(&self, id: &str) -> AppResult<TourDayResponse> {
        Ok(self.repo.restore(id).await?.into())
    }

    /// Active/archived counts for the catalog dashboard.
    pub async fn counts(&self) -> AppResult<EntityCounts> {
        Ok(EntityCounts {
            active: self.repo.count_active().await?,
            archived: self.repo.count_archived().await?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    fn unwrap_set<T: Clone + Into<sea_orm::Value>>(value: &ActiveValue<T>) -> T {
        match value {
            ActiveValue::Set(v) => v.clone(),
            _ => panic!("expected Set"),
        }
    }

    #[test]
    fn test_attraction_rows_positions_follow_input_order() {
        let id_gen = IdGenerator::new();
        let ids = vec!["b".to_string(), "a".to_string(), "c".to_string()];

        let rows = attraction_rows("day1", &ids, &id_gen);

        assert_eq!(rows.len(), 3);
        assert_eq!(unwrap_set(&rows[0].attraction_id), "b");
        assert_eq!(unwrap_set(&rows[0].position), 1);
        assert_eq!(unwrap_set(&rows[1].attraction_id), "a");
        assert_eq!(unwrap_set(&rows[1].position), 2);
        assert_eq!(unwrap_set(&rows[2].attraction_id), "c");
        assert_eq!(unwrap_set(&rows[2].position), 3);
    }

    #[test]
    fn test_attraction_rows_collapse_duplicates() {
        let id_gen = IdGenerator::new();
        let ids = vec!["a".to_string(), "b".to_string(), "a".to_string()];

        let rows = attraction_rows("day1", &ids, &id_gen);

        assert_eq!(rows.len(), 2);
        assert_eq!(unwrap_set(&rows[0].attraction_id), "a");
        assert_eq!(unwrap_set(&rows[1].attraction_id), "b");
        assert_eq!(unwrap_set(&rows[1].position), 2);
    }

    #[test]
    fn test_include_rows_empty_input() {
        let id_gen = IdGenerator::new();
        let rows = include_rows("day1", &[], &id_gen);
        assert!(rows.is_empty());
    }
}
