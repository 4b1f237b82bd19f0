//! Multipart photo upload.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use uuid::Uuid;
use vitrine_core::{Photo, UploadPhoto};

use crate::{AppError, AppResult, AppState};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Accepts a multipart form with a required `file` field plus optional
/// `album_id`, `title`, `width` and `height` fields.
pub async fn upload_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Photo>)> {
    let mut album_id = None;
    let mut title = None;
    let mut width = None;
    let mut height = None;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "album_id" => {
                let raw = field.text().await?;
                let id: Uuid = raw
                    .parse()
                    .map_err(|_| AppError::bad_request("album_id is not a valid uuid"))?;
                album_id = Some(id.into());
            }
            "title" => title = Some(field.text().await?),
            "width" => width = Some(parse_dimension("width", &field.text().await?)?),
            "height" => height = Some(parse_dimension("height", &field.text().await?)?),
            "file" => {
                let filename = field
                    .file_name()
                    .unwrap_or("upload")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                file = Some((filename, content_type, field.bytes().await?.to_vec()));
            }
            other => {
                tracing::debug!(field = %other, "ignoring unknown multipart field");
            }
        }
    }

    let Some((filename, content_type, bytes)) = file else {
        return Err(AppError::bad_request("multipart field 'file' is required"));
    };

    let photo = state
        .gallery
        .upload_photo(UploadPhoto {
            album_id,
            filename,
            content_type,
            bytes,
            width,
            height,
            title,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(photo)))
}

fn parse_dimension(name: &str, raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::bad_request(format!("{name} is not a valid integer")))
}
