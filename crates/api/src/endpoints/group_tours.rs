//! Group tour catalog endpoints.
//!
//! Create and update accept multipart form data: the scalar fields of the
//! tour, repeated `tourDayIds` fields in itinerary order, and repeated
//! `mediaFiles` file fields that become attachments.

use axum::{
    Router,
    extract::{Multipart, Path, State},
    routing::{get, post},
};
use potours_common::{AppError, AppResult};
use potours_core::{
    CreateGroupTourInput, GroupTourListResponse, GroupTourResponse, MediaUpload,
};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Parse the multipart body of a create/update request.
async fn parse_form(mut multipart: Multipart) -> AppResult<(CreateGroupTourInput, Vec<MediaUpload>)> {
    let mut title = String::new();
    let mut short_description = String::new();
    let mut description = String::new();
    let mut group_size: i32 = 0;
    let mut tour_day_ids = Vec::new();
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => {
                title = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "shortDescription" => {
                short_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "description" => {
                description = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "groupSize" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                group_size = raw.trim().parse().map_err(|_| {
                    AppError::Validation("Group size must be a whole number".to_string())
                })?;
            }
            "tourDayIds" => {
                let id = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !id.trim().is_empty() {
                    tour_day_ids.push(id.trim().to_string());
                }
            }
            "mediaFiles" => {
                let file_name = field
                    .file_name()
                    .map_or_else(|| "upload.bin".to_string(), ToOwned::to_owned);
                let content_type = field
                    .content_type()
                    .map_or_else(String::new, ToOwned::to_owned);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec();
                if !data.is_empty() {
                    uploads.push(MediaUpload {
                        file_name,
                        content_type,
                        data,
                    });
                }
            }
            _ => {}
        }
    }

    let input = CreateGroupTourInput {
        title,
        short_description,
        description,
        group_size,
        tour_day_ids,
    };

    Ok((input, uploads))
}

/// Catalog listing: active and archived group tours.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<GroupTourListResponse>> {
    let list = state.group_tour_service.list().await?;
    Ok(ApiResponse::ok(list))
}

/// Fetch one group tour, days and media included, for the edit form.
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<GroupTourResponse>> {
    let tour = state.group_tour_service.get(&id).await?;
    Ok(ApiResponse::ok(tour))
}

/// Create a group tour with its itinerary and uploaded media.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<ApiResponse<GroupTourResponse>> {
    let (input, uploads) = parse_form(multipart).await?;
    let tour = state
        .group_tour_service
        .create(Some(&user.id), input, uploads)
        .await?;
    Ok(ApiResponse::ok(tour))
}

/// Update a group tour; uploaded media is added to the existing set.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<ApiResponse<GroupTourResponse>> {
    let (input, uploads) = parse_form(multipart).await?;
    let tour = state
        .group_tour_service
        .update(&id, Some(&user.id), input, uploads)
        .await?;
    Ok(ApiResponse::ok(tour))
}

/// Archive a group tour and return the refreshed listing.
async fn archive(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<GroupTourListResponse>> {
    state.group_tour_service.archive(&id).await?;
    let list = state.group_tour_service.list().await?;
    Ok(ApiResponse::ok(list))
}

/// Restore a group tour and return the refreshed listing.
async fn restore(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<GroupTourListResponse>> {
    state.group_tour_service.restore(&id).await?;
    let list = state.group_tour_service.list().await?;
    Ok(ApiResponse::ok(list))
}

/// Delete one media attachment and return the refreshed owning tour.
async fn delete_media(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<GroupTourResponse>> {
    let tour_id = state.group_tour_service.delete_media(&id).await?;
    let tour = state.group_tour_service.get(&tour_id).await?;
    Ok(ApiResponse::ok(tour))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/create", post(create))
        .route("/{id}", get(get_one))
        .route("/{id}/update", post(update))
        .route("/{id}/archive", post(archive))
        .route("/{id}/restore", post(restore))
        .route("/media/{id}/delete", post(delete_media))
}
