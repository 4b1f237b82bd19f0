//! Domain types for albums and photos.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AlbumId, PhotoId};

/// A named, ordered collection of photos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub event_date: Option<NaiveDate>,
    /// Only published albums appear in the public listings.
    pub published: bool,
    /// Display position among all albums; ties broken by id.
    pub sort_index: i32,
    pub created_at: DateTime<Utc>,
}

/// An image record referencing blob storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    /// `None` marks an orphan photo not yet attached to an album.
    pub album_id: Option<AlbumId>,
    /// Blob storage location; immutable once set.
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub title: Option<String>,
    pub published: bool,
    /// Display position within the owning album (or the orphan scope).
    pub sort_index: i32,
    pub created_at: DateTime<Utc>,
}

/// Public listing entry: album annotated with the url of its first
/// published photo and the count of its published photos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub id: AlbumId,
    pub title: String,
    pub event_date: Option<NaiveDate>,
    pub sort_index: i32,
    pub cover_url: Option<String>,
    pub photo_count: i64,
}

/// Album row to insert; `sort_index` is assigned by the store (append).
#[derive(Debug, Clone)]
pub struct NewAlbum {
    pub id: AlbumId,
    pub title: String,
    pub event_date: Option<NaiveDate>,
}

/// Photo row to insert; `sort_index` is assigned by the store (append
/// within the `album_id` scope).
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub id: PhotoId,
    pub album_id: Option<AlbumId>,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub title: Option<String>,
}

/// Partial album update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumChanges {
    pub title: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub published: Option<bool>,
}

/// Register a photo whose bytes are already in blob storage.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhotoRequest {
    pub album_id: Option<AlbumId>,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub title: Option<String>,
}

/// Upload a photo: write the bytes to blob storage, then insert the row.
#[derive(Debug, Clone)]
pub struct UploadPhoto {
    pub album_id: Option<AlbumId>,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub title: Option<String>,
}

/// Direction for the single-step move operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}
