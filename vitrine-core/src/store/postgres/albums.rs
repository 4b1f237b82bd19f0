use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{GalleryError, Result};
use crate::ids::AlbumId;
use crate::store::ports::AlbumStore;
use crate::types::{Album, AlbumChanges, AlbumSummary, NewAlbum};

#[derive(Clone, Debug)]
pub struct PostgresAlbumStore {
    pool: PgPool,
}

impl PostgresAlbumStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct AlbumRow {
    id: Uuid,
    title: String,
    event_date: Option<NaiveDate>,
    published: bool,
    sort_index: i32,
    created_at: DateTime<Utc>,
}

impl From<AlbumRow> for Album {
    fn from(row: AlbumRow) -> Self {
        Album {
            id: AlbumId(row.id),
            title: row.title,
            event_date: row.event_date,
            published: row.published,
            sort_index: row.sort_index,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AlbumSummaryRow {
    id: Uuid,
    title: String,
    event_date: Option<NaiveDate>,
    sort_index: i32,
    cover_url: Option<String>,
    photo_count: i64,
}

impl From<AlbumSummaryRow> for AlbumSummary {
    fn from(row: AlbumSummaryRow) -> Self {
        AlbumSummary {
            id: AlbumId(row.id),
            title: row.title,
            event_date: row.event_date,
            sort_index: row.sort_index,
            cover_url: row.cover_url,
            photo_count: row.photo_count,
        }
    }
}

#[async_trait]
impl AlbumStore for PostgresAlbumStore {
    async fn insert_album(&self, album: NewAlbum) -> Result<Album> {
        let row = sqlx::query_as::<_, AlbumRow>(
            r#"
            INSERT INTO albums (id, title, event_date, published, sort_index)
            VALUES ($1, $2, $3, TRUE,
                    (SELECT COALESCE(MAX(sort_index), 0) + 1 FROM albums))
            RETURNING id, title, event_date, published, sort_index, created_at
            "#,
        )
        .bind(album.id.to_uuid())
        .bind(&album.title)
        .bind(album.event_date)
        .fetch_one(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to insert album: {e}")))?;

        Ok(row.into())
    }

    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>> {
        let row = sqlx::query_as::<_, AlbumRow>(
            r#"
            SELECT id, title, event_date, published, sort_index, created_at
            FROM albums
            WHERE id = $1
            "#,
        )
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to load album: {e}")))?;

        Ok(row.map(Album::from))
    }

    async fn list_albums(&self) -> Result<Vec<Album>> {
        let rows = sqlx::query_as::<_, AlbumRow>(
            r#"
            SELECT id, title, event_date, published, sort_index, created_at
            FROM albums
            ORDER BY sort_index, id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to list albums: {e}")))?;

        Ok(rows.into_iter().map(Album::from).collect())
    }

    async fn list_published_albums(&self) -> Result<Vec<AlbumSummary>> {
        let rows = sqlx::query_as::<_, AlbumSummaryRow>(
            r#"
            SELECT
                a.id,
                a.title,
                a.event_date,
                a.sort_index,
                (SELECT p.url FROM photos p
                 WHERE p.album_id = a.id AND p.published
                 ORDER BY p.sort_index, p.id
                 LIMIT 1) AS cover_url,
                (SELECT COUNT(*) FROM photos p
                 WHERE p.album_id = a.id AND p.published) AS photo_count
            FROM albums a
            WHERE a.published
            ORDER BY a.sort_index, a.id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to list published albums: {e}")))?;

        Ok(rows.into_iter().map(AlbumSummary::from).collect())
    }

    async fn update_album(&self, id: AlbumId, changes: AlbumChanges) -> Result<Option<Album>> {
        let row = sqlx::query_as::<_, AlbumRow>(
            r#"
            UPDATE albums
            SET title = COALESCE($2, title),
                event_date = COALESCE($3, event_date),
                published = COALESCE($4, published)
            WHERE id = $1
            RETURNING id, title, event_date, published, sort_index, created_at
            "#,
        )
        .bind(id.to_uuid())
        .bind(changes.title)
        .bind(changes.event_date)
        .bind(changes.published)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to update album: {e}")))?;

        Ok(row.map(Album::from))
    }

    async fn set_published(&self, id: AlbumId, published: bool) -> Result<Option<Album>> {
        let row = sqlx::query_as::<_, AlbumRow>(
            r#"
            UPDATE albums
            SET published = $2
            WHERE id = $1
            RETURNING id, title, event_date, published, sort_index, created_at
            "#,
        )
        .bind(id.to_uuid())
        .bind(published)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to update album visibility: {e}")))?;

        Ok(row.map(Album::from))
    }

    async fn reorder(&self, ids: &[AlbumId]) -> Result<u64> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| GalleryError::Store(format!("failed to start transaction: {e}")))?;

        let mut updated = 0u64;
        for (position, id) in ids.iter().enumerate() {
            let result = sqlx::query("UPDATE albums SET sort_index = $1 WHERE id = $2")
                .bind((position + 1) as i32)
                .bind(id.to_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| GalleryError::Store(format!("failed to reorder albums: {e}")))?;
            updated += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| GalleryError::Store(format!("failed to commit reorder: {e}")))?;

        Ok(updated)
    }

    async fn swap_sort_index(&self, a: AlbumId, b: AlbumId) -> Result<()> {
        // Subselects read the snapshot taken at statement start, so both
        // assignments see the pre-swap values.
        sqlx::query(
            r#"
            UPDATE albums
            SET sort_index = CASE id
                WHEN $1 THEN (SELECT sort_index FROM albums WHERE id = $2)
                WHEN $2 THEN (SELECT sort_index FROM albums WHERE id = $1)
            END
            WHERE id IN ($1, $2)
            "#,
        )
        .bind(a.to_uuid())
        .bind(b.to_uuid())
        .execute(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to swap album order: {e}")))?;

        Ok(())
    }

    async fn delete_album(&self, id: AlbumId) -> Result<Option<Vec<String>>> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| GalleryError::Store(format!("failed to start transaction: {e}")))?;

        let urls: Vec<String> = sqlx::query_scalar("SELECT url FROM photos WHERE album_id = $1")
            .bind(id.to_uuid())
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| GalleryError::Store(format!("failed to collect photo urls: {e}")))?;

        // Photo rows go with the album via the FK cascade.
        let result = sqlx::query("DELETE FROM albums WHERE id = $1")
            .bind(id.to_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| GalleryError::Store(format!("failed to delete album: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        tx.commit()
            .await
            .map_err(|e| GalleryError::Store(format!("failed to commit album delete: {e}")))?;

        Ok(Some(urls))
    }
}
