//! Attraction catalog service.

use potours_common::{AppError, AppResult, IdGenerator};
use potours_db::entities::attraction;
use potours_db::repositories::AttractionRepository;
use rust_decimal::Decimal;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::EntityCounts;

/// Fallback photo shown for attractions without one.
pub(crate) const ATTRACTION_PLACEHOLDER: &str = "working/test1/origOf1icon.jpg";

/// Input for creating or editing an attraction.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttractionInput {
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
}

/// Catalog response for an attraction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionResponse {
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
}

impl From<attraction::Model> for AttractionResponse {
    fn from(a: attraction::Model) -> Self {
        Self {
            id: a.id,
            title: a.title,
            description: a.description,
            city: a.city,
            address: a.address,
            duration_hours: a.duration_hours,
            photo_url: a.photo_url,
            created_by: a.created_by,
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
            is_archived: a.is_archived,
            archived_at: a.archived_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Catalog listing: active and archived attractions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionListResponse {
    pub items: Vec<AttractionResponse>,
    pub archived_items: Vec<AttractionResponse>,
}

/// Public card for an attraction, photo fallback already applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub city: String,
    pub address: String,
    pub duration_hours: Decimal,
    pub photo_url: String,
}

/// Public detail page payload with prev/next navigation in title order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionDetail {
    pub attraction: AttractionCard,
    pub prev_attraction_id: Option<String>,
    pub next_attraction_id: Option<String>,
}

/// Resolve a card photo, falling back to the stock image.
fn card_photo(photo_url: Option<&str>, media_url: &str) -> String {
    photo_url.map_or_else(
        || format!("{media_url}{ATTRACTION_PLACEHOLDER}"),
        ToOwned::to_owned,
    )
}

/// Find the neighbours of `id` inside an ordered id list.
fn neighbours(ordered: &[String], id: &str) -> (Option<String>, Option<String>) {
    let idx = ordered.iter().position(|x| x == id).unwrap_or(0);
    let prev = if idx > 0 {
        ordered.get(idx - 1).cloned()
    } else {
        None
    };
    let next = ordered.get(idx + 1).cloned();
    (prev, next)
}

/// Service for managing attractions.
#[derive(Clone)]
pub struct AttractionService {
    repo: AttractionRepository,
    id_gen: IdGenerator,
    media_url: String,
}

impl AttractionService {
    /// Create a new attraction service.
    #[must_use]
    pub fn new(repo: AttractionRepository, media_url: String) -> Self {
        Self {
            repo,
            id_gen: IdGenerator::new(),
            media_url,
        }
    }

    fn validate(input: &CreateAttractionInput) -> AppResult<()> {
        input.validate()?;
        if input.duration_hours <= Decimal::ZERO {
            return Err(AppError::Validation(
                "Duration must be a positive number of hours".to_string(),
            ));
        }
        Ok(())
    }

    /// Catalog listing of active and archived attractions.
    pub async fn list(&self) -> AppResult<AttractionListResponse> {
        let items = self.repo.find_active().await?;
        let archived_items = self.repo.find_archived().await?;
        Ok(AttractionListResponse {
            items: items.into_iter().map(Into::into).collect(),
            archived_items: archived_items.into_iter().map(Into::into).collect(),
        })
    }

    /// Get one attraction, archived or not (catalog edit form).
    pub async fn get(&self, id: &str) -> AppResult<AttractionResponse> {
        Ok(self.repo.get_by_id(id).await?.into())
    }

    /// Create a new attraction, owned by the acting editor if present.
    pub async fn create(
        &self,
        actor: Option<&str>,
        input: CreateAttractionInput,
    ) -> AppResult<AttractionResponse> {
        Self::validate(&input)?;

        let now = chrono::Utc::now();
        let model = attraction::ActiveModel {
            id: Set(self.id_gen.generate()),
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

        Ok(self.repo.create(model).await?.into())
    }

    /// Update an attraction. An existing creator is kept; a record without
    /// one is attributed to the acting editor.
    pub async fn update(
        &self,
        id: &str,
        actor: Option<&str>,
        input: CreateAttractionInput,
    ) -> AppResult<AttractionResponse> {
        Self::validate(&input)?;

        let row = self.repo.get_by_id(id).await?;
        let created_by = row.created_by.clone().or_else(|| actor.map(ToOwned::to_owned));

        let mut model: attraction::ActiveModel = row.into();
        model.title = Set(input.title);
        model.description = Set(input.description);
        model.city = Set(input.city);
        model.address = Set(input.address);
        model.duration_hours = Set(input.duration_hours);
        model.photo_url = Set(input.photo_url);
        model.created_by = Set(created_by);
        model.updated_at = Set(chrono::Utc::now().into());

        Ok(self.repo.update(model).await?.into())
    }

    /// Move an attraction to the archive.
    pub async fn archive(&self, id: &str) -> AppResult<AttractionResponse> {
        Ok(self.repo.archive(id).await?.into())
    }

    /// Restore an attraction from the archive.
    pub async fn restore(&self, id: &str) -> AppResult<AttractionResponse> {
        Ok(self.repo.restore(id).await?.into())
    }

    /// Active/archived counts for the catalog dashboard.
    pub async fn counts(&self) -> AppResult<EntityCounts> {
        Ok(EntityCounts {
            active: self.repo.count_active().await?,
            archived: self.repo.count_archived().await?,
        })
    }

    /// Public payload: active attractions in title order, photo fallback
    /// applied.
    pub async fn public_list(&self) -> AppResult<Vec<AttractionCard>> {
        let rows = self.repo.find_active().await?;
        Ok(rows
            .into_iter()
            .map(|a| self.card_from_model(a))
            .collect())
    }

    /// Public detail page payload with prev/next ids in title order.
    pub async fn public_detail(&self, id: &str) -> AppResult<AttractionDetail> {
        let row = self.repo.get_by_id(id).await?;
        if row.is_archived {
            return Err(AppError::NotFound(format!("Attraction: {id}")));
        }

        let ordered = self.repo.find_active_ids().await?;
        let (prev, next) = neighbours(&ordered, id);

        Ok(AttractionDetail {
            attraction: self.card_from_model(row),
            prev_attraction_id: prev,
            next_attraction_id: next,
        })
    }

    fn card_from_model(&self, a: attraction::Model) -> AttractionCard {
        AttractionCard {
            id: a.id,
            title: a.title,
            description: a.description,
            city: a.city,
            address: a.address,
            duration_hours: a.duration_hours,
            photo_url: card_photo(a.photo_url.as_deref(), &self.media_url),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_attraction(id: &str, title: &str) -> attraction::Model {
        attraction::Model {
            id: id.to_string(),
            title: title.to_string(),
            description: "A place worth seeing".to_string(),
            city: "Gdansk".to_string(),
            address: "Main Square 1".to_string(),
            duration_hours: Decimal::new(25, 1),
            photo_url: None,
            created_by: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
            is_archived: false,
            archived_at: None,
        }
    }

    fn service_with(results: Vec<Vec<attraction::Model>>) -> AttractionService {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(results)
                .into_connection(),
        );
        AttractionService::new(AttractionRepository::new(db), "/media/".to_string())
    }

    #[tokio::test]
    async fn test_get_returns_attraction() {
        let service = service_with(vec![vec![create_test_attraction("a1", "Old Town")]]);

        let result = service.get("a1").await.unwrap();
        assert_eq!(result.title, "Old Town");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = service_with(vec![vec![]]);

        let err = service.get("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let service = service_with(vec![]);

        let input = CreateAttractionInput {
            title: String::new(),
            description: "desc".to_string(),
            city: "Gdansk".to_string(),
            address: "Main Square 1".to_string(),
            duration_hours: Decimal::ONE,
            photo_url: None,
        };

        let err = service.create(None, input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_duration() {
        let service = service_with(vec![]);

        let input = CreateAttractionInput {
            title: "Old Town".to_string(),
            description: "desc".to_string(),
            city: "Gdansk".to_string(),
            address: "Main Square 1".to_string(),
            duration_hours: Decimal::ZERO,
            photo_url: None,
        };

        let err = service.create(None, input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_archive_then_restore_round_trip() {
        let original = create_test_attraction("a1", "Old Town");

        let mut archived = original.clone();
        archived.is_archived = true;
        archived.archived_at = Some(Utc::now().into());

        let mut restored = original.clone();
        restored.is_archived = false;
        restored.archived_at = None;

        // archive: find + returning update; restore: find + returning update
        let service = service_with(vec![
            vec![original],
            vec![archived.clone()],
            vec![archived],
            vec![restored],
        ]);

        let after_archive = service.archive("a1").await.unwrap();
        assert!(after_archive.is_archived);
        assert!(after_archive.archived_at.is_some());

        let after_restore = service.restore("a1").await.unwrap();
        assert!(!after_restore.is_archived);
        assert!(after_restore.archived_at.is_none());
        assert_eq!(after_restore.title, "Old Town");
        assert_eq!(after_restore.city, "Gdansk");
    }

    #[test]
    fn test_card_photo_fallback() {
        assert_eq!(
            card_photo(None, "/media/"),
            "/media/working/test1/origOf1icon.jpg"
        );
        assert_eq!(card_photo(Some("/media/x.jpg"), "/media/"), "/media/x.jpg");
    }

    #[test]
    fn test_neighbours() {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(neighbours(&ids, "a"), (None, Some("b".to_string())));
        assert_eq!(
            neighbours(&ids, "b"),
            (Some("a".to_string()), Some("c".to_string()))
        );
        assert_eq!(neighbours(&ids, "c"), (Some("b".to_string()), None));
    }
}
