//! Admin photo management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use vitrine_core::{CreatePhotoRequest, Photo};

use crate::handlers::albums::{MoveRequest, ReorderRequest, SetPublishedRequest};
use crate::{AppResult, AppState};

pub async fn create_photo(
    State(state): State<AppState>,
    Json(request): Json<CreatePhotoRequest>,
) -> AppResult<(StatusCode, Json<Photo>)> {
    let photo = state.gallery.create_photo(request).await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

pub async fn list_orphans(State(state): State<AppState>) -> AppResult<Json<Vec<Photo>>> {
    Ok(Json(state.gallery.list_orphan_photos().await?))
}

pub async fn set_published(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetPublishedRequest>,
) -> AppResult<Json<Photo>> {
    Ok(Json(
        state
            .gallery
            .set_photo_published(id.into(), request.published)
            .await?,
    ))
}

pub async fn reorder_photos(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    let ids: Vec<_> = request.ids.into_iter().map(Into::into).collect();
    state.gallery.reorder_photos(&ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn move_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MoveRequest>,
) -> AppResult<StatusCode> {
    state.gallery.move_photo(id.into(), request.direction).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.gallery.delete_photo(id.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}
