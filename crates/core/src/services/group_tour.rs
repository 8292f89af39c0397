//! Group tour catalog service.

use std::collections::HashSet;
use std::sync::Arc;

use potours_common::{AppResult, IdGenerator, StorageBackend, generate_storage_key};
use potours_db::entities::{
    group_tour, group_tour_day, group_tour_media, group_tour_media::MediaKind, tour_day,
};
use potours_db::repositories::{GroupTourMediaRepository, GroupTourRepository};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::EntityCounts;
use super::tour_detail::GALLERY_PLACEHOLDER;

/// Storage prefix for uploaded group tour media.
const MEDIA_PREFIX: &str = "catalog/group_tours/media";

/// Cards per row on the public group tours page, repeating.
const CARD_ROW_PATTERN: [usize; 2] = [2, 3];

/// Input for creating or editing a group tour.
///
/// The day id sequence fully replaces the tour's itinerary; day numbers
/// follow the submitted order.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupTourInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub short_description: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 1))]
    pub group_size: i32,
    #[serde(default)]
    pub tour_day_ids: Vec<String>,
}

/// One uploaded media file.
pub struct MediaUpload {
    /// Original file name, used for the storage key extension.
    pub file_name: String,
    /// Declared MIME type; `video/*` files become video attachments.
    pub content_type: String,
    /// Raw file bytes.
    pub data: Vec<u8>,
}

/// Response for a media attachment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTourMediaResponse {
    pub id: String,
    pub group_tour_id: String,
    pub url: String,
    pub media_kind: MediaKind,
    pub created_at: String,
}

impl From<group_tour_media::Model> for GroupTourMediaResponse {
    fn from(m: group_tour_media::Model) -> Self {
        Self {
            id: m.id,
            group_tour_id: m.group_tour_id,
            url: m.url,
            media_kind: m.media_kind,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

/// Catalog response for a group tour.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTourResponse {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub group_size: i32,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub is_archived: bool,
    pub archived_at: Option<String>,
    /// Linked day ids in itinerary order; populated on single-record reads.
    #[serde(default)]
    pub tour_day_ids: Vec<String>,
    /// Attachments, newest first; populated on single-record reads.
    #[serde(default)]
    pub media_items: Vec<GroupTourMediaResponse>,
}

impl From<group_tour::Model> for GroupTourResponse {
    fn from(t: group_tour::Model) -> Self {
        Self {
            id: t.id,
            title: t.title,
            short_description: t.short_description,
            description: t.description,
            group_size: t.group_size,
            created_by: t.created_by,
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
            is_archived: t.is_archived,
            archived_at: t.archived_at.map(|t| t.to_rfc3339()),
            tour_day_ids: Vec::new(),
            media_items: Vec::new(),
        }
    }
}

/// Catalog listing: active and archived group tours.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTourListResponse {
    pub items: Vec<GroupTourResponse>,
    pub archived_items: Vec<GroupTourResponse>,
}

/// Public card for a group tour.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTourCard {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub tour_days_count: usize,
    pub cities_count: usize,
    pub cover_url: String,
}

/// One display row of the public group tours page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTourCardRow {
    pub size: usize,
    pub cards: Vec<GroupTourCard>,
}

/// Classify an upload by its declared content type.
fn media_kind_for(content_type: &str) -> MediaKind {
    if content_type.starts_with("video/") {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}

/// Build day link rows for a tour: duplicates collapse to their first
/// occurrence, day numbers are dense and 1-based in submitted order.
fn day_rows(
    group_tour_id: &str,
    tour_day_ids: &[String],
    id_gen: &IdGenerator,
) -> Vec<group_tour_day::ActiveModel> {
    let mut seen = HashSet::new();
    tour_day_ids
        .iter()
        .filter(|id| seen.insert((*id).clone()))
        .enumerate()
        .map(|(idx, tour_day_id)| group_tour_day::ActiveModel {
            id: Set(id_gen.generate()),
            group_tour_id: Set(group_tour_id.to_string()),
            tour_day_id: Set(tour_day_id.clone()),
            day_number: Set(i32::try_from(idx).unwrap_or(i32::MAX) + 1),
        })
        .collect()
}

/// Build a public card from loaded rows. Archived days do not count.
fn build_card(
    tour: &group_tour::Model,
    days: &[(group_tour_day::Model, tour_day::Model)],
    media: &[group_tour_media::Model],
    media_url: &str,
) -> GroupTourCard {
    let active_days: Vec<&tour_day::Model> = days
        .iter()
        .map(|(_, day)| day)
        .filter(|day| !day.is_archived)
        .collect();

    let cities: HashSet<String> = active_days
        .iter()
        .filter(|day| !day.city.is_empty())
        .map(|day| day.city.trim().to_lowercase())
        .collect();

    let cover_url = media
        .iter()
        .find(|m| m.media_kind == MediaKind::Image)
        .map_or_else(
            || format!("{media_url}{GALLERY_PLACEHOLDER}"),
            |m| m.url.clone(),
        );

    GroupTourCard {
        id: tour.id.clone(),
        title: tour.title.clone(),
        short_description: tour.short_description.clone(),
        tour_days_count: active_days.len(),
        cities_count: cities.len(),
        cover_url,
    }
}

/// Group cards into display rows of alternating width.
fn card_rows(cards: Vec<GroupTourCard>) -> Vec<GroupTourCardRow> {
    let mut rows = Vec::new();
    let mut size_idx = 0;
    let mut cursor = 0;

    while cursor < cards.len() {
        let row_size = CARD_ROW_PATTERN[size_idx % CARD_ROW_PATTERN.len()];
        let end = (cursor + row_size).min(cards.len());
        rows.push(GroupTourCardRow {
            size: row_size,
            cards: cards[cursor..end].to_vec(),
        });
        cursor = end;
        size_idx += 1;
    }

    rows
}

/// Service for managing group tours and their media.
#[derive(Clone)]
pub struct GroupTourService {
    repo: GroupTourRepository,
    media_repo: GroupTourMediaRepository,
    storage: Arc<dyn StorageBackend>,
    id_gen: IdGenerator,
    media_url: String,
}

impl GroupTourService {
    /// Create a new group tour service.
    #[must_use]
    pub fn new(
        repo: GroupTourRepository,
        media_repo: GroupTourMediaRepository,
        storage: Arc<dyn StorageBackend>,
        media_url: String,
    ) -> Self {
        Self {
            repo,
            media_repo,
            storage,
            id_gen: IdGenerator::new(),
            media_url,
        }
    }

    /// Catalog listing of active and archived group tours.
    pub async fn list(&self) -> AppResult<GroupTourListResponse> {
        let items = self.repo.find_active().await?;
        let archived_items = self.repo.find_archived().await?;
        Ok(GroupTourListResponse {
            items: items.into_iter().map(Into::into).collect(),
            archived_items: archived_items.into_iter().map(Into::into).collect(),
        })
    }

    /// Get one group tour with its day ids and attachments.
    pub async fn get(&self, id: &str) -> AppResult<GroupTourResponse> {
        let row = self.repo.get_by_id(id).await?;
        let day_links = self.repo.find_day_links(id).await?;
        let media = self.media_repo.find_by_tour(id).await?;

        let mut response = GroupTourResponse::from(row);
        response.tour_day_ids = day_links.into_iter().map(|l| l.tour_day_id).collect();
        response.media_items = media.into_iter().map(Into::into).collect();
        Ok(response)
    }

    /// Create a group tour with its itinerary, then attach any uploads.
    pub async fn create(
        &self,
        actor: Option<&str>,
        input: CreateGroupTourInput,
        uploads: Vec<MediaUpload>,
    ) -> AppResult<GroupTourResponse> {
        input.validate()?;

        let now = chrono::Utc::now();
        let tour_id = self.id_gen.generate();
        let model = group_tour::ActiveModel {
            id: Set(tour_id.clone()),
            title: Set(input.title),
            short_description: Set(input.short_description),
            description: Set(input.description),
            group_size: Set(input.group_size),
            created_by: Set(actor.map(ToOwned::to_owned)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            is_archived: Set(false),
            archived_at: Set(None),
        };

        let tour = self
            .repo
            .create_with_days(model, day_rows(&tour_id, &input.tour_day_ids, &self.id_gen))
            .await?;

        self.attach_media(&tour.id, uploads).await?;

        self.get(&tour.id).await
    }

    /// Update a group tour, replacing its itinerary; uploads are additive.
    pub async fn update(
        &self,
        id: &str,
        actor: Option<&str>,
        input: CreateGroupTourInput,
        uploads: Vec<MediaUpload>,
    ) -> AppResult<GroupTourResponse> {
        input.validate()?;

        let row = self.repo.get_by_id(id).await?;
        let created_by = row.created_by.clone().or_else(|| actor.map(ToOwned::to_owned));

        let mut model: group_tour::ActiveModel = row.into();
        model.title = Set(input.title);
        model.short_description = Set(input.short_description);
        model.description = Set(input.description);
        model.group_size = Set(input.group_size);
        model.created_by = Set(created_by);
        model.updated_at = Set(chrono::Utc::now().into());

        let tour = self
            .repo
            .update_with_days(model, day_rows(id, &input.tour_day_ids, &self.id_gen))
            .await?;

        self.attach_media(&tour.id, uploads).await?;

        self.get(&tour.id).await
    }

    /// Move a group tour to the archive.
    pub async fn archive(&self, id: &str) -> AppResult<GroupTourResponse> {
        Ok(self.repo.archive(id).await?.into())
    }

    /// Restore a group tour from the archive.
    pub async fn restore(&self, id: &str) -> AppResult<GroupTourResponse> {
        Ok(self.repo.restore(id).await?.into())
    }

    /// Active/archived counts for the catalog dashboard.
    pub async fn counts(&self) -> AppResult<EntityCounts> {
        Ok(EntityCounts {
            active: self.repo.count_active().await?,
            archived: self.repo.count_archived().await?,
        })
    }

    // ==================== Media Operations ====================

    /// Attach uploaded files to a group tour.
    ///
    /// Files whose declared content type starts with `video/` become video
    /// attachments, everything else an image. Attachments are additive;
    /// removal is a separate per-item delete.
    pub async fn attach_media(
        &self,
        group_tour_id: &str,
        uploads: Vec<MediaUpload>,
    ) -> AppResult<Vec<GroupTourMediaResponse>> {
        if uploads.is_empty() {
            return Ok(Vec::new());
        }

        // Ensure the owner exists before writing any file
        self.repo.get_by_id(group_tour_id).await?;

        let mut attached = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let key = generate_storage_key(MEDIA_PREFIX, &upload.file_name);
            let stored = self
                .storage
                .upload(&key, &upload.data, &upload.content_type)
                .await?;

            let model = group_tour_media::ActiveModel {
                id: Set(self.id_gen.generate()),
                group_tour_id: Set(group_tour_id.to_string()),
                file_path: Set(stored.key),
                url: Set(stored.url),
                media_kind: Set(media_kind_for(&upload.content_type)),
                created_at: Set(chrono::Utc::now().into()),
            };

            attached.push(self.media_repo.create(model).await?.into());
        }

        Ok(attached)
    }

    /// Delete one media attachment; fails with `NotFound` if absent.
    /// Returns the id of the owning tour.
    pub async fn delete_media(&self, media_id: &str) -> AppResult<String> {
        let media = self.media_repo.get_by_id(media_id).await?;
        self.media_repo.delete(media_id).await?;

        // The row is gone; a stale blob is not worth failing the request over
        if let Err(e) = self.storage.delete(&media.file_path).await {
            tracing::warn!(error = %e, key = %media.file_path, "Failed to delete stored media file");
        }

        Ok(media.group_tour_id)
    }

    // ==================== Public Cards ====================

    async fn cards_for(&self, tours: Vec<group_tour::Model>) -> AppResult<Vec<GroupTourCard>> {
        let mut cards = Vec::with_capacity(tours.len());
        for tour in tours {
            let days = self.repo.find_days(&tour.id).await?;
            let media = self.media_repo.find_by_tour(&tour.id).await?;
            cards.push(build_card(&tour, &days, &media, &self.media_url));
        }
        Ok(cards)
    }

    /// Cards for the public tours page, newest tours first.
    pub async fn public_cards(&self) -> AppResult<Vec<GroupTourCard>> {
        let tours = self.repo.find_recent().await?;
        self.cards_for(tours).await
    }

    /// Random featured cards for the home page.
    pub async fn featured_cards(&self, limit: u64) -> AppResult<Vec<GroupTourCard>> {
        let tours = self.repo.find_featured(limit).await?;
        self.cards_for(tours).await
    }

    /// Card rows for the all-records group tours page, in the alternating
    /// 2/3 display pattern.
    pub async fn all_card_rows(&self) -> AppResult<Vec<GroupTourCardRow>> {
        let tours = self.repo.find_all_recent().await?;
        let cards = self.cards_for(tours).await?;
        Ok(card_rows(cards))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use potours_common::{AppError, UploadedFile};
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    /// Storage stub that records nothing and always succeeds.
    struct NullStorage;

    #[async_trait::async_trait]
    impl StorageBackend for NullStorage {
        async fn upload(
            &self,
            key: &str,
            data: &[u8],
            content_type: &str,
        ) -> AppResult<UploadedFile> {
            Ok(UploadedFile {
                key: key.to_string(),
                url: format!("/media/{key}"),
                size: data.len() as u64,
                content_type: content_type.to_string(),
                md5: String::new(),
            })
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("/media/{key}")
        }

        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Ok(false)
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> GroupTourService {
        let db = std::sync::Arc::new(db);
        GroupTourService::new(
            GroupTourRepository::new(std::sync::Arc::clone(&db)),
            GroupTourMediaRepository::new(db),
            std::sync::Arc::new(NullStorage),
            "/media/".to_string(),
        )
    }

    fn test_tour(id: &str) -> group_tour::Model {
        group_tour::Model {
            id: id.to_string(),
            title: "North-South Poland Tour".to_string(),
            short_description: "Historic cities to mountain peaks".to_string(),
            description: "Long description".to_string(),
            group_size: 12,
            created_by: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
            is_archived: false,
            archived_at: None,
        }
    }

    fn test_day(id: &str, city: &str) -> tour_day::Model {
        tour_day::Model {
            id: id.to_string(),
            title: format!("Day {id}"),
            description: "desc".to_string(),
            city: city.to_string(),
            address: "addr".to_string(),
            duration_hours: Decimal::new(80, 1),
            photo_url: None,
            created_by: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
            is_archived: false,
            archived_at: None,
        }
    }

    fn test_link(id: &str, tour_id: &str, day_id: &str, day_number: i32) -> group_tour_day::Model {
        group_tour_day::Model {
            id: id.to_string(),
            group_tour_id: tour_id.to_string(),
            tour_day_id: day_id.to_string(),
            day_number,
        }
    }

    fn test_media(id: &str, tour_id: &str, kind: MediaKind) -> group_tour_media::Model {
        group_tour_media::Model {
            id: id.to_string(),
            group_tour_id: tour_id.to_string(),
            file_path: format!("catalog/group_tours/media/{id}.bin"),
            url: format!("/media/catalog/group_tours/media/{id}.bin"),
            media_kind: kind,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_attach_media_classifies_video_upload() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_tour("t1")]])
            .append_query_results([[test_media("m1", "t1", MediaKind::Video)]])
            .into_connection();
        let service = service_with(db);

        let uploads = vec![MediaUpload {
            file_name: "clip.mp4".to_string(),
            content_type: "video/mp4".to_string(),
            data: vec![1, 2, 3],
        }];

        let attached = service.attach_media("t1", uploads).await.unwrap();

        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].media_kind, MediaKind::Video);
    }

    #[tokio::test]
    async fn test_attach_media_missing_tour_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<group_tour::Model>::new()])
            .into_connection();
        let service = service_with(db);

        let uploads = vec![MediaUpload {
            file_name: "photo.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![1],
        }];

        let err = service.attach_media("missing", uploads).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_media_missing_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<group_tour_media::Model>::new()])
            .into_connection();
        let service = service_with(db);

        let err = service.delete_media("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_media_returns_owner_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_media("m1", "t1", MediaKind::Image)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let service = service_with(db);

        let owner = service.delete_media("m1").await.unwrap();
        assert_eq!(owner, "t1");
    }

    #[test]
    fn test_media_kind_for_video_prefix() {
        assert_eq!(media_kind_for("video/mp4"), MediaKind::Video);
        assert_eq!(media_kind_for("video/webm"), MediaKind::Video);
    }

    #[test]
    fn test_media_kind_for_everything_else_is_image() {
        assert_eq!(media_kind_for("image/png"), MediaKind::Image);
        assert_eq!(media_kind_for("application/pdf"), MediaKind::Image);
        assert_eq!(media_kind_for(""), MediaKind::Image);
    }

    #[test]
    fn test_build_card_counts_normalized_cities() {
        let tour = test_tour("t1");
        let days = vec![
            (test_link("l1", "t1", "d1", 1), test_day("d1", "Paris")),
            (test_link("l2", "t1", "d2", 2), test_day("d2", "paris ")),
            (test_link("l3", "t1", "d3", 3), test_day("d3", "Lyon")),
        ];

        let card = build_card(&tour, &days, &[], "/media/");

        assert_eq!(card.tour_days_count, 3);
        assert_eq!(card.cities_count, 2);
    }

    #[test]
    fn test_build_card_cover_prefers_first_image() {
        let tour = test_tour("t1");
        let media = vec![
            test_media("m1", "t1", MediaKind::Video),
            test_media("m2", "t1", MediaKind::Image),
        ];

        let card = build_card(&tour, &[], &media, "/media/");

        assert_eq!(card.cover_url, "/media/catalog/group_tours/media/m2.bin");
    }

    #[test]
    fn test_build_card_cover_placeholder_without_images() {
        let tour = test_tour("t1");
        let media = vec![test_media("m1", "t1", MediaKind::Video)];

        let card = build_card(&tour, &[], &media, "/media/");

        assert_eq!(
            card.cover_url,
            "/media/working/test1/I965-5797-449-1298-368-149.png"
        );
    }

    #[test]
    fn test_build_card_skips_archived_days() {
        let tour = test_tour("t1");
        let mut archived = test_day("d2", "Krakow");
        archived.is_archived = true;
        let days = vec![
            (test_link("l1", "t1", "d1", 1), test_day("d1", "Gdansk")),
            (test_link("l2", "t1", "d2", 2), archived),
        ];

        let card = build_card(&tour, &days, &[], "/media/");

        assert_eq!(card.tour_days_count, 1);
        assert_eq!(card.cities_count, 1);
    }

    #[test]
    fn test_card_rows_alternate_two_three() {
        let cards: Vec<GroupTourCard> = (0..7)
            .map(|i| GroupTourCard {
                id: i.to_string(),
                title: String::new(),
                short_description: String::new(),
                tour_days_count: 0,
                cities_count: 0,
                cover_url: String::new(),
            })
            .collect();

        let rows = card_rows(cards);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].size, 2);
        assert_eq!(rows[0].cards.len(), 2);
        assert_eq!(rows[1].size, 3);
        assert_eq!(rows[1].cards.len(), 3);
        assert_eq!(rows[2].size, 2);
        assert_eq!(rows[2].cards.len(), 2);
    }

    #[test]
    fn test_card_rows_empty() {
        assert!(card_rows(Vec::new()).is_empty());
    }

    #[test]
    fn test_day_rows_positions() {
        let id_gen = IdGenerator::new();
        let ids = vec!["d2".to_string(), "d1".to_string(), "d2".to_string()];

        let rows = day_rows("t1", &ids, &id_gen);

        assert_eq!(rows.len(), 2);
        match (&rows[0].day_number, &rows[1].day_number) {
            (sea_orm::ActiveValue::Set(a), sea_orm::ActiveValue::Set(b)) => {
                assert_eq!(*a, 1);
                assert_eq!(*b, 2);
            }
            _ => panic!("expected Set day numbers"),
        }
    }
}
