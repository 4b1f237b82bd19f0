use async_trait::async_trait;

use crate::error::Result;
use crate::ids::AlbumId;
use crate::types::{Album, AlbumChanges, AlbumSummary, NewAlbum};

/// Storage port for album rows.
///
/// Multi-row mutations (`reorder`, `delete_album`) are atomic: a concurrent
/// reader never observes a partially applied batch.
#[async_trait]
pub trait AlbumStore: Send + Sync {
    /// Insert the album at the end of the ordering (`max(sort_index) + 1`,
    /// or 1 when there are no rows).
    async fn insert_album(&self, album: NewAlbum) -> Result<Album>;

    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>>;

    /// All albums, unpublished included, in `(sort_index, id)` order.
    async fn list_albums(&self) -> Result<Vec<Album>>;

    /// Published albums in display order, each annotated with its cover url
    /// and published photo count.
    async fn list_published_albums(&self) -> Result<Vec<AlbumSummary>>;

    /// Apply a partial update. Returns `None` when the album is missing.
    async fn update_album(&self, id: AlbumId, changes: AlbumChanges) -> Result<Option<Album>>;

    async fn set_published(&self, id: AlbumId, published: bool) -> Result<Option<Album>>;

    /// Assign `sort_index = position + 1` to each listed id, in one
    /// transaction. Ids absent from the list keep their prior index, so a
    /// partial list can interleave with later appends; callers wanting a
    /// dense ordering pass the complete set. Returns the rows updated.
    async fn reorder(&self, ids: &[AlbumId]) -> Result<u64>;

    /// Swap the sort indices of two albums.
    async fn swap_sort_index(&self, a: AlbumId, b: AlbumId) -> Result<()>;

    /// Delete the album and, through the cascade, all photos it owns.
    /// Returns the urls of the removed photos for blob cleanup, or `None`
    /// when the album is missing.
    async fn delete_album(&self, id: AlbumId) -> Result<Option<Vec<String>>>;
}
