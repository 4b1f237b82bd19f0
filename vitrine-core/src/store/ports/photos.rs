use async_trait::async_trait;

use crate::error::Result;
use crate::ids::{AlbumId, PhotoId};
use crate::types::{NewPhoto, Photo};

/// Storage port for photo rows.
///
/// A scope is the set of photos sharing one `album_id`, the orphan scope
/// (`None`) included. Multi-row mutations are atomic.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Insert the photo at the end of its scope's ordering.
    async fn insert_photo(&self, photo: NewPhoto) -> Result<Photo>;

    async fn get_photo(&self, id: PhotoId) -> Result<Option<Photo>>;

    /// All photos in the scope, unpublished included, in `(sort_index, id)`
    /// order.
    async fn list_scope(&self, album_id: Option<AlbumId>) -> Result<Vec<Photo>>;

    /// Published photos of the album in display order.
    async fn list_published(&self, album_id: AlbumId) -> Result<Vec<Photo>>;

    async fn set_published(&self, id: PhotoId, published: bool) -> Result<Option<Photo>>;

    /// Assign `sort_index = position + 1` to each listed id, in one
    /// transaction. Ids absent from the list keep their prior index (same
    /// partial-list caveat as album reorder). Returns the rows updated.
    async fn reorder(&self, ids: &[PhotoId]) -> Result<u64>;

    /// Swap the sort indices of two photos.
    async fn swap_sort_index(&self, a: PhotoId, b: PhotoId) -> Result<()>;

    /// Delete the photo row. Returns its blob url for cleanup, or `None`
    /// when the photo is missing.
    async fn delete_photo(&self, id: PhotoId) -> Result<Option<String>>;

    /// Move every orphan photo into the album, appending after its current
    /// maximum `sort_index` in ascending id order. Returns the number of
    /// photos moved.
    async fn attach_orphans(&self, album_id: AlbumId) -> Result<u64>;
}
