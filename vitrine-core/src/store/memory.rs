//! In-memory content store.
//!
//! Backs the test suites and local development without Postgres. Every
//! operation runs under one mutex, so multi-row mutations are atomic by
//! construction.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::Result;
use crate::ids::{AlbumId, PhotoId};
use crate::store::ports::{AlbumStore, PhotoStore};
use crate::types::{Album, AlbumChanges, AlbumSummary, NewAlbum, NewPhoto, Photo};

#[derive(Debug, Default)]
struct MemoryInner {
    albums: Vec<Album>,
    photos: Vec<Photo>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn display_order<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> K) {
    items.sort_by_key(key);
}

#[async_trait]
impl AlbumStore for MemoryStore {
    async fn insert_album(&self, album: NewAlbum) -> Result<Album> {
        let mut inner = self.lock();
        let sort_index = inner.albums.iter().map(|a| a.sort_index).max().unwrap_or(0) + 1;
        let album = Album {
            id: album.id,
            title: album.title,
            event_date: album.event_date,
            published: true,
            sort_index,
            created_at: Utc::now(),
        };
        inner.albums.push(album.clone());
        Ok(album)
    }

    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>> {
        Ok(self.lock().albums.iter().find(|a| a.id == id).cloned())
    }

    async fn list_albums(&self) -> Result<Vec<Album>> {
        let mut albums = self.lock().albums.clone();
        display_order(&mut albums, |a| (a.sort_index, a.id));
        Ok(albums)
    }

    async fn list_published_albums(&self) -> Result<Vec<AlbumSummary>> {
        let inner = self.lock();
        let mut albums: Vec<Album> =
            inner.albums.iter().filter(|a| a.published).cloned().collect();
        display_order(&mut albums, |a| (a.sort_index, a.id));

        let summaries = albums
            .into_iter()
            .map(|album| {
                let mut photos: Vec<&Photo> = inner
                    .photos
                    .iter()
                    .filter(|p| p.album_id == Some(album.id) && p.published)
                    .collect();
                display_order(&mut photos, |p| (p.sort_index, p.id));
                AlbumSummary {
                    id: album.id,
                    title: album.title,
                    event_date: album.event_date,
                    sort_index: album.sort_index,
                    cover_url: photos.first().map(|p| p.url.clone()),
                    photo_count: photos.len() as i64,
                }
            })
            .collect();

        Ok(summaries)
    }

    async fn update_album(&self, id: AlbumId, changes: AlbumChanges) -> Result<Option<Album>> {
        let mut inner = self.lock();
        let Some(album) = inner.albums.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            album.title = title;
        }
        if let Some(event_date) = changes.event_date {
            album.event_date = Some(event_date);
        }
        if let Some(published) = changes.published {
            album.published = published;
        }
        Ok(Some(album.clone()))
    }

    async fn set_published(&self, id: AlbumId, published: bool) -> Result<Option<Album>> {
        let mut inner = self.lock();
        let Some(album) = inner.albums.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        album.published = published;
        Ok(Some(album.clone()))
    }

    async fn reorder(&self, ids: &[AlbumId]) -> Result<u64> {
        let mut inner = self.lock();
        let mut updated = 0u64;
        for (position, id) in ids.iter().enumerate() {
            if let Some(album) = inner.albums.iter_mut().find(|a| a.id == *id) {
                album.sort_index = (position + 1) as i32;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn swap_sort_index(&self, a: AlbumId, b: AlbumId) -> Result<()> {
        let mut inner = self.lock();
        let first = inner.albums.iter().find(|x| x.id == a).map(|x| x.sort_index);
        let second = inner.albums.iter().find(|x| x.id == b).map(|x| x.sort_index);
        if let (Some(first), Some(second)) = (first, second) {
            for album in inner.albums.iter_mut() {
                if album.id == a {
                    album.sort_index = second;
                } else if album.id == b {
                    album.sort_index = first;
                }
            }
        }
        Ok(())
    }

    async fn delete_album(&self, id: AlbumId) -> Result<Option<Vec<String>>> {
        let mut inner = self.lock();
        let before = inner.albums.len();
        inner.albums.retain(|a| a.id != id);
        if inner.albums.len() == before {
            return Ok(None);
        }
        let mut urls = Vec::new();
        inner.photos.retain(|p| {
            if p.album_id == Some(id) {
                urls.push(p.url.clone());
                false
            } else {
                true
            }
        });
        Ok(Some(urls))
    }
}

#[async_trait]
impl PhotoStore for MemoryStore {
    async fn insert_photo(&self, photo: NewPhoto) -> Result<Photo> {
        let mut inner = self.lock();
        let sort_index = inner
            .photos
            .iter()
            .filter(|p| p.album_id == photo.album_id)
            .map(|p| p.sort_index)
            .max()
            .unwrap_or(0)
            + 1;
        let photo = Photo {
            id: photo.id,
            album_id: photo.album_id,
            url: photo.url,
            width: photo.width,
            height: photo.height,
            title: photo.title,
            published: true,
            sort_index,
            created_at: Utc::now(),
        };
        inner.photos.push(photo.clone());
        Ok(photo)
    }

    async fn get_photo(&self, id: PhotoId) -> Result<Option<Photo>> {
        Ok(self.lock().photos.iter().find(|p| p.id == id).cloned())
    }

    async fn list_scope(&self, album_id: Option<AlbumId>) -> Result<Vec<Photo>> {
        let mut photos: Vec<Photo> = self
            .lock()
            .photos
            .iter()
            .filter(|p| p.album_id == album_id)
            .cloned()
            .collect();
        display_order(&mut photos, |p| (p.sort_index, p.id));
        Ok(photos)
    }

    async fn list_published(&self, album_id: AlbumId) -> Result<Vec<Photo>> {
        let mut photos: Vec<Photo> = self
            .lock()
            .photos
            .iter()
            .filter(|p| p.album_id == Some(album_id) && p.published)
            .cloned()
            .collect();
        display_order(&mut photos, |p| (p.sort_index, p.id));
        Ok(photos)
    }

    async fn set_published(&self, id: PhotoId, published: bool) -> Result<Option<Photo>> {
        let mut inner = self.lock();
        let Some(photo) = inner.photos.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        photo.published = published;
        Ok(Some(photo.clone()))
    }

    async fn reorder(&self, ids: &[PhotoId]) -> Result<u64> {
        let mut inner = self.lock();
        let mut updated = 0u64;
        for (position, id) in ids.iter().enumerate() {
            if let Some(photo) = inner.photos.iter_mut().find(|p| p.id == *id) {
                photo.sort_index = (position + 1) as i32;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn swap_sort_index(&self, a: PhotoId, b: PhotoId) -> Result<()> {
        let mut inner = self.lock();
        let first = inner.photos.iter().find(|x| x.id == a).map(|x| x.sort_index);
        let second = inner.photos.iter().find(|x| x.id == b).map(|x| x.sort_index);
        if let (Some(first), Some(second)) = (first, second) {
            for photo in inner.photos.iter_mut() {
                if photo.id == a {
                    photo.sort_index = second;
                } else if photo.id == b {
                    photo.sort_index = first;
                }
            }
        }
        Ok(())
    }

    async fn delete_photo(&self, id: PhotoId) -> Result<Option<String>> {
        let mut inner = self.lock();
        let mut url = None;
        inner.photos.retain(|p| {
            if p.id == id {
                url = Some(p.url.clone());
                false
            } else {
                true
            }
        });
        Ok(url)
    }

    async fn attach_orphans(&self, album_id: AlbumId) -> Result<u64> {
        let mut inner = self.lock();
        let base = inner
            .photos
            .iter()
            .filter(|p| p.album_id == Some(album_id))
            .map(|p| p.sort_index)
            .max()
            .unwrap_or(0);

        let mut orphan_ids: Vec<PhotoId> = inner
            .photos
            .iter()
            .filter(|p| p.album_id.is_none())
            .map(|p| p.id)
            .collect();
        orphan_ids.sort();

        for (offset, id) in orphan_ids.iter().enumerate() {
            if let Some(photo) = inner.photos.iter_mut().find(|p| p.id == *id) {
                photo.album_id = Some(album_id);
                photo.sort_index = base + (offset + 1) as i32;
            }
        }

        Ok(orphan_ids.len() as u64)
    }
}
