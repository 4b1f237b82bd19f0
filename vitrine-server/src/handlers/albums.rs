//! Admin album management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitrine_core::{Album, AlbumChanges, MoveDirection, Photo};

use crate::{AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateAlbumRequest {
    pub title: String,
    pub event_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SetPublishedRequest {
    pub published: bool,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

#[derive(Debug, Serialize)]
pub struct AttachedResponse {
    pub moved: u64,
}

pub async fn create_album(
    State(state): State<AppState>,
    Json(request): Json<CreateAlbumRequest>,
) -> AppResult<(StatusCode, Json<Album>)> {
    let album = state
        .gallery
        .create_album(&request.title, request.event_date)
        .await?;
    Ok((StatusCode::CREATED, Json(album)))
}

pub async fn list_albums(State(state): State<AppState>) -> AppResult<Json<Vec<Album>>> {
    Ok(Json(state.gallery.list_albums().await?))
}

pub async fn get_album(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Album>> {
    Ok(Json(state.gallery.get_album(id.into()).await?))
}

pub async fn update_album(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<AlbumChanges>,
) -> AppResult<Json<Album>> {
    Ok(Json(state.gallery.update_album(id.into(), changes).await?))
}

pub async fn set_published(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetPublishedRequest>,
) -> AppResult<Json<Album>> {
    Ok(Json(
        state
            .gallery
            .set_album_published(id.into(), request.published)
            .await?,
    ))
}

pub async fn reorder_albums(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    let ids: Vec<_> = request.ids.into_iter().map(Into::into).collect();
    state.gallery.reorder_albums(&ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn move_album(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MoveRequest>,
) -> AppResult<StatusCode> {
    state.gallery.move_album(id.into(), request.direction).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_album(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.gallery.delete_album(id.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_album_photos(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Photo>>> {
    Ok(Json(state.gallery.list_album_photos(id.into()).await?))
}

pub async fn attach_orphans(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AttachedResponse>> {
    let moved = state.gallery.attach_orphans(id.into()).await?;
    Ok(Json(AttachedResponse { moved }))
}
