//! Ordering & publication service.
//!
//! Single owner of every mutation touching `sort_index` and `published`,
//! for albums and photos alike. Handlers call in here; the stores execute
//! the statements (transactionally where more than one row moves).

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use tracing::warn;

use crate::blob::BlobStore;
use crate::error::{GalleryError, Result};
use crate::ids::{AlbumId, PhotoId};
use crate::store::{AlbumStore, PhotoStore};
use crate::types::{
    Album, AlbumChanges, AlbumSummary, CreatePhotoRequest, MoveDirection, NewAlbum, NewPhoto,
    Photo, UploadPhoto,
};

pub struct GalleryService {
    albums: Arc<dyn AlbumStore>,
    photos: Arc<dyn PhotoStore>,
    blobs: Arc<dyn BlobStore>,
}

impl fmt::Debug for GalleryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryService").finish_non_exhaustive()
    }
}

impl GalleryService {
    pub fn new(
        albums: Arc<dyn AlbumStore>,
        photos: Arc<dyn PhotoStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            albums,
            photos,
            blobs,
        }
    }

    // ========================================================================
    // Albums
    // ========================================================================

    pub async fn create_album(
        &self,
        title: &str,
        event_date: Option<chrono::NaiveDate>,
    ) -> Result<Album> {
        let title = title.trim();
        if title.is_empty() {
            return Err(GalleryError::validation("album title must not be empty"));
        }
        self.albums
            .insert_album(NewAlbum {
                id: AlbumId::new(),
                title: title.to_string(),
                event_date,
            })
            .await
    }

    pub async fn get_album(&self, id: AlbumId) -> Result<Album> {
        self.albums
            .get_album(id)
            .await?
            .ok_or_else(|| GalleryError::not_found(format!("album {id}")))
    }

    pub async fn list_albums(&self) -> Result<Vec<Album>> {
        self.albums.list_albums().await
    }

    pub async fn update_album(&self, id: AlbumId, mut changes: AlbumChanges) -> Result<Album> {
        if let Some(title) = changes.title.take() {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(GalleryError::validation("album title must not be empty"));
            }
            changes.title = Some(title);
        }
        self.albums
            .update_album(id, changes)
            .await?
            .ok_or_else(|| GalleryError::not_found(format!("album {id}")))
    }

    pub async fn set_album_published(&self, id: AlbumId, published: bool) -> Result<Album> {
        self.albums
            .set_published(id, published)
            .await?
            .ok_or_else(|| GalleryError::not_found(format!("album {id}")))
    }

    pub async fn reorder_albums(&self, ids: &[AlbumId]) -> Result<()> {
        if ids.is_empty() {
            return Err(GalleryError::validation("reorder requires at least one id"));
        }
        let updated = self.albums.reorder(ids).await?;
        if updated == 0 {
            return Err(GalleryError::validation("no albums matched the given ids"));
        }
        Ok(())
    }

    /// Swap with the adjacent album; silently a no-op at either boundary.
    pub async fn move_album(&self, id: AlbumId, direction: MoveDirection) -> Result<()> {
        let albums = self.albums.list_albums().await?;
        let Some(position) = albums.iter().position(|a| a.id == id) else {
            return Err(GalleryError::not_found(format!("album {id}")));
        };
        let Some(neighbor) = neighbor_position(position, albums.len(), direction) else {
            return Ok(());
        };
        self.albums.swap_sort_index(id, albums[neighbor].id).await
    }

    /// Delete the album and its photos, then best-effort delete their blobs.
    pub async fn delete_album(&self, id: AlbumId) -> Result<()> {
        let urls = self
            .albums
            .delete_album(id)
            .await?
            .ok_or_else(|| GalleryError::not_found(format!("album {id}")))?;
        for url in urls {
            self.delete_blob_best_effort(&url).await;
        }
        Ok(())
    }

    // ========================================================================
    // Photos
    // ========================================================================

    pub async fn create_photo(&self, request: CreatePhotoRequest) -> Result<Photo> {
        if request.url.trim().is_empty() {
            return Err(GalleryError::validation("photo url must not be empty"));
        }
        if let Some(album_id) = request.album_id {
            self.require_album(album_id).await?;
        }
        self.photos
            .insert_photo(NewPhoto {
                id: PhotoId::new(),
                album_id: request.album_id,
                url: request.url,
                width: request.width,
                height: request.height,
                title: request.title,
            })
            .await
    }

    /// Write the bytes to blob storage, then insert the row. The two writes
    /// are not atomic: an insert failure leaves the blob orphaned, which is
    /// logged and accepted.
    pub async fn upload_photo(&self, upload: UploadPhoto) -> Result<Photo> {
        if upload.bytes.is_empty() {
            return Err(GalleryError::validation("uploaded file is empty"));
        }
        if let Some(album_id) = upload.album_id {
            self.require_album(album_id).await?;
        }

        let key = blob_key(upload.album_id, &upload.filename);
        let url = self
            .blobs
            .put(&key, upload.bytes, &upload.content_type)
            .await?;

        let inserted = self
            .photos
            .insert_photo(NewPhoto {
                id: PhotoId::new(),
                album_id: upload.album_id,
                url: url.clone(),
                width: upload.width,
                height: upload.height,
                title: upload.title,
            })
            .await;

        if inserted.is_err() {
            warn!(%url, "photo insert failed after blob write; blob left orphaned");
        }
        inserted
    }

    pub async fn list_album_photos(&self, album_id: AlbumId) -> Result<Vec<Photo>> {
        self.get_album(album_id).await?;
        self.photos.list_scope(Some(album_id)).await
    }

    pub async fn list_orphan_photos(&self) -> Result<Vec<Photo>> {
        self.photos.list_scope(None).await
    }

    pub async fn set_photo_published(&self, id: PhotoId, published: bool) -> Result<Photo> {
        self.photos
            .set_published(id, published)
            .await?
            .ok_or_else(|| GalleryError::not_found(format!("photo {id}")))
    }

    pub async fn reorder_photos(&self, ids: &[PhotoId]) -> Result<()> {
        if ids.is_empty() {
            return Err(GalleryError::validation("reorder requires at least one id"));
        }
        let updated = self.photos.reorder(ids).await?;
        if updated == 0 {
            return Err(GalleryError::validation("no photos matched the given ids"));
        }
        Ok(())
    }

    /// Swap with the adjacent photo in the same scope; silently a no-op at
    /// either boundary.
    pub async fn move_photo(&self, id: PhotoId, direction: MoveDirection) -> Result<()> {
        let photo = self
            .photos
            .get_photo(id)
            .await?
            .ok_or_else(|| GalleryError::not_found(format!("photo {id}")))?;
        let scope = self.photos.list_scope(photo.album_id).await?;
        let Some(position) = scope.iter().position(|p| p.id == id) else {
            return Err(GalleryError::not_found(format!("photo {id}")));
        };
        let Some(neighbor) = neighbor_position(position, scope.len(), direction) else {
            return Ok(());
        };
        self.photos.swap_sort_index(id, scope[neighbor].id).await
    }

    /// Delete the photo row, then best-effort delete its blob.
    pub async fn delete_photo(&self, id: PhotoId) -> Result<()> {
        let url = self
            .photos
            .delete_photo(id)
            .await?
            .ok_or_else(|| GalleryError::not_found(format!("photo {id}")))?;
        self.delete_blob_best_effort(&url).await;
        Ok(())
    }

    /// Attach every orphan photo to the album, appending to its ordering.
    /// Returns the number of photos moved.
    pub async fn attach_orphans(&self, album_id: AlbumId) -> Result<u64> {
        self.require_album(album_id).await?;
        self.photos.attach_orphans(album_id).await
    }

    // ========================================================================
    // Public reads
    // ========================================================================

    pub async fn list_public_albums(&self) -> Result<Vec<AlbumSummary>> {
        self.albums.list_published_albums().await
    }

    pub async fn list_public_album_photos(&self, album_id: AlbumId) -> Result<Vec<Photo>> {
        let album = self
            .albums
            .get_album(album_id)
            .await?
            .filter(|a| a.published)
            .ok_or_else(|| GalleryError::not_found(format!("album {album_id}")))?;
        self.photos.list_published(album.id).await
    }

    // ========================================================================
    // Internals
    // ========================================================================

    async fn require_album(&self, album_id: AlbumId) -> Result<()> {
        match self.albums.get_album(album_id).await? {
            Some(_) => Ok(()),
            None => Err(GalleryError::validation(format!(
                "album {album_id} does not exist"
            ))),
        }
    }

    async fn delete_blob_best_effort(&self, url: &str) {
        if let Err(error) = self.blobs.delete(url).await {
            warn!(%url, %error, "blob cleanup failed; object left behind");
        }
    }
}

fn neighbor_position(position: usize, len: usize, direction: MoveDirection) -> Option<usize> {
    match direction {
        MoveDirection::Up => position.checked_sub(1),
        MoveDirection::Down => (position + 1 < len).then_some(position + 1),
    }
}

/// Namespaced, collision-resistant blob key: scope, millisecond timestamp,
/// random token, sanitized original filename.
fn blob_key(album_id: Option<AlbumId>, filename: &str) -> String {
    let scope = match album_id {
        Some(id) => format!("albums/{id}"),
        None => "orphans".to_string(),
    };
    let token: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!(
        "{scope}/{}-{token}-{}",
        Utc::now().timestamp_millis(),
        sanitize_filename(filename)
    )
}

fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
