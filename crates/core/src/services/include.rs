//! Include catalog service.

use potours_common::{AppResult, IdGenerator};
use potours_db::entities::include;
use potours_db::repositories::IncludeRepository;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::EntityCounts;

/// Input for creating or editing an include.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncludeInput {
    #[validate(length(min = 1))]
    pub description: String,
    /// Icon path relative to the media root, may be empty.
    #[serde(default)]
    #[validate(length(max = 500))]
    pub icon_path: String,
}

/// Catalog response for an include.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeResponse {
    pub id: String,
    pub description: String,
    pub icon_path: String,
    pub created_at: String,
    pub updated_at: String,
    pub is_archived: bool,
    pub archived_at: Option<String>,
}

impl From<include::Model> for IncludeResponse {
    fn from(i: include::Model) -> Self {
        Self {
            id: i.id,
            description: i.description,
            icon_path: i.icon_path,
            created_at: i.created_at.to_rfc3339(),
            updated_at: i.updated_at.to_rfc3339(),
            is_archived: i.is_archived,
            archived_at: i.archived_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Catalog listing: active and archived includes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeListResponse {
    pub items: Vec<IncludeResponse>,
    pub archived_items: Vec<IncludeResponse>,
}

/// Service for managing includes.
#[derive(Clone)]
pub struct IncludeService {
    repo: IncludeRepository,
    id_gen: IdGenerator,
}

impl IncludeService {
    /// Create a new include service.
    #[must_use]
    pub const fn new(repo: IncludeRepository) -> Self {
        Self {
            repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Catalog listing of active and archived includes.
    pub async fn list(&self) -> AppResult<IncludeListResponse> {
        let items = self.repo.find_active().await?;
        let archived_items = self.repo.find_archived().await?;
        Ok(IncludeListResponse {
            items: items.into_iter().map(Into::into).collect(),
            archived_items: archived_items.into_iter().map(Into::into).collect(),
        })
    }

    /// Get one include, archived or not (catalog edit form).
    pub async fn get(&self, id: &str) -> AppResult<IncludeResponse> {
        Ok(self.repo.get_by_id(id).await?.into())
    }

    /// Create a new include.
    pub async fn create(&self, input: CreateIncludeInput) -> AppResult<IncludeResponse> {
        input.validate()?;

        let now = chrono::Utc::now();
        let model = include::ActiveModel {
            id: Set(self.id_gen.generate()),
            description: Set(input.description),
            icon_path: Set(input.icon_path),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            is_archived: Set(false),
            archived_at: Set(None),
        };

        Ok(self.repo.create(model).await?.into())
    }

    /// Update an include.
    pub async fn update(&self, id: &str, input: CreateIncludeInput) -> AppResult<IncludeResponse> {
        input.validate()?;

        let row = self.repo.get_by_id(id).await?;
        let mut model: include::ActiveModel = row.into();
        model.description = Set(input.description);
        model.icon_path = Set(input.icon_path);
        model.updated_at = Set(chrono::Utc::now().into());

        Ok(self.repo.update(model).await?.into())
    }

    /// Move an include to the archive.
    pub async fn archive(&self, id: &str) -> AppResult<IncludeResponse> {
        Ok(self.repo.archive(id).await?.into())
    }

    /// Restore an include from the archive.
    pub async fn restore(&self, id: &str) -> AppResult<IncludeResponse> {
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
    use chrono::Utc;
    use potours_common::AppError;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_include(id: &str, description: &str) -> include::Model {
        include::Model {
            id: id.to_string(),
            description: description.to_string(),
            icon_path: "working/icons/bus.svg".to_string(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
            is_archived: false,
            archived_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_returns_include() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_include("i1", "Transport")]])
                .into_connection(),
        );
        let service = IncludeService::new(IncludeRepository::new(db));

        let result = service.get("i1").await.unwrap();
        assert_eq!(result.description, "Transport");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_description() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );
        let service = IncludeService::new(IncludeRepository::new(db));

        let input = CreateIncludeInput {
            description: String::new(),
            icon_path: String::new(),
        };

        let err = service.create(input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
