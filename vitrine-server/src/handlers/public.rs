//! Unauthenticated reads of the published catalog.

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use vitrine_core::{AlbumSummary, Photo};

use crate::{AppResult, AppState};

pub async fn list_albums(State(state): State<AppState>) -> AppResult<Json<Vec<AlbumSummary>>> {
    Ok(Json(state.gallery.list_public_albums().await?))
}

pub async fn list_album_photos(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Photo>>> {
    Ok(Json(
        state.gallery.list_public_album_photos(id.into()).await?,
    ))
}
