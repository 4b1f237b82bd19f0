use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{GalleryError, Result};
use crate::ids::{AlbumId, PhotoId};
use crate::store::ports::PhotoStore;
use crate::types::{NewPhoto, Photo};

#[derive(Clone, Debug)]
pub struct PostgresPhotoStore {
    pool: PgPool,
}

impl PostgresPhotoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct PhotoRow {
    id: Uuid,
    album_id: Option<Uuid>,
    url: String,
    width: Option<i32>,
    height: Option<i32>,
    title: Option<String>,
    published: bool,
    sort_index: i32,
    created_at: DateTime<Utc>,
}

impl From<PhotoRow> for Photo {
    fn from(row: PhotoRow) -> Self {
        Photo {
            id: PhotoId(row.id),
            album_id: row.album_id.map(AlbumId),
            url: row.url,
            width: row.width,
            height: row.height,
            title: row.title,
            published: row.published,
            sort_index: row.sort_index,
            created_at: row.created_at,
        }
    }
}

const PHOTO_COLUMNS: &str =
    "id, album_id, url, width, height, title, published, sort_index, created_at";

#[async_trait]
impl PhotoStore for PostgresPhotoStore {
    async fn insert_photo(&self, photo: NewPhoto) -> Result<Photo> {
        // IS NOT DISTINCT FROM keeps the append semantics working for the
        // orphan scope, where album_id is NULL.
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            r#"
            INSERT INTO photos (id, album_id, url, width, height, title, published, sort_index)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE,
                    (SELECT COALESCE(MAX(sort_index), 0) + 1 FROM photos
                     WHERE album_id IS NOT DISTINCT FROM $2))
            RETURNING {PHOTO_COLUMNS}
            "#
        ))
        .bind(photo.id.to_uuid())
        .bind(photo.album_id.map(|id| id.to_uuid()))
        .bind(&photo.url)
        .bind(photo.width)
        .bind(photo.height)
        .bind(photo.title)
        .fetch_one(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to insert photo: {e}")))?;

        Ok(row.into())
    }

    async fn get_photo(&self, id: PhotoId) -> Result<Option<Photo>> {
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            "SELECT {PHOTO_COLUMNS} FROM photos WHERE id = $1"
        ))
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to load photo: {e}")))?;

        Ok(row.map(Photo::from))
    }

    async fn list_scope(&self, album_id: Option<AlbumId>) -> Result<Vec<Photo>> {
        let rows = sqlx::query_as::<_, PhotoRow>(&format!(
            r#"
            SELECT {PHOTO_COLUMNS} FROM photos
            WHERE album_id IS NOT DISTINCT FROM $1
            ORDER BY sort_index, id
            "#
        ))
        .bind(album_id.map(|id| id.to_uuid()))
        .fetch_all(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to list photos: {e}")))?;

        Ok(rows.into_iter().map(Photo::from).collect())
    }

    async fn list_published(&self, album_id: AlbumId) -> Result<Vec<Photo>> {
        let rows = sqlx::query_as::<_, PhotoRow>(&format!(
            r#"
            SELECT {PHOTO_COLUMNS} FROM photos
            WHERE album_id = $1 AND published
            ORDER BY sort_index, id
            "#
        ))
        .bind(album_id.to_uuid())
        .fetch_all(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to list published photos: {e}")))?;

        Ok(rows.into_iter().map(Photo::from).collect())
    }

    async fn set_published(&self, id: PhotoId, published: bool) -> Result<Option<Photo>> {
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            r#"
            UPDATE photos SET published = $2
            WHERE id = $1
            RETURNING {PHOTO_COLUMNS}
            "#
        ))
        .bind(id.to_uuid())
        .bind(published)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to update photo visibility: {e}")))?;

        Ok(row.map(Photo::from))
    }

    async fn reorder(&self, ids: &[PhotoId]) -> Result<u64> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| GalleryError::Store(format!("failed to start transaction: {e}")))?;

        let mut updated = 0u64;
        for (position, id) in ids.iter().enumerate() {
            let result = sqlx::query("UPDATE photos SET sort_index = $1 WHERE id = $2")
                .bind((position + 1) as i32)
                .bind(id.to_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| GalleryError::Store(format!("failed to reorder photos: {e}")))?;
            updated += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| GalleryError::Store(format!("failed to commit reorder: {e}")))?;

        Ok(updated)
    }

    async fn swap_sort_index(&self, a: PhotoId, b: PhotoId) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE photos
            SET sort_index = CASE id
                WHEN $1 THEN (SELECT sort_index FROM photos WHERE id = $2)
                WHEN $2 THEN (SELECT sort_index FROM photos WHERE id = $1)
            END
            WHERE id IN ($1, $2)
            "#,
        )
        .bind(a.to_uuid())
        .bind(b.to_uuid())
        .execute(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to swap photo order: {e}")))?;

        Ok(())
    }

    async fn delete_photo(&self, id: PhotoId) -> Result<Option<String>> {
        let url: Option<String> =
            sqlx::query_scalar("DELETE FROM photos WHERE id = $1 RETURNING url")
                .bind(id.to_uuid())
                .fetch_optional(self.pool())
                .await
                .map_err(|e| GalleryError::Store(format!("failed to delete photo: {e}")))?;

        Ok(url)
    }

    async fn attach_orphans(&self, album_id: AlbumId) -> Result<u64> {
        // Single statement: ranks the orphans by id (UUIDv7, so creation
        // order) and appends them after the album's current maximum.
        let result = sqlx::query(
            r#"
            WITH orphans AS (
                SELECT id, ROW_NUMBER() OVER (ORDER BY id) AS position
                FROM photos
                WHERE album_id IS NULL
            ),
            base AS (
                SELECT COALESCE(MAX(sort_index), 0) AS max_sort
                FROM photos
                WHERE album_id = $1
            )
            UPDATE photos
            SET album_id = $1,
                sort_index = base.max_sort + orphans.position
            FROM orphans, base
            WHERE photos.id = orphans.id
            "#,
        )
        .bind(album_id.to_uuid())
        .execute(self.pool())
        .await
        .map_err(|e| GalleryError::Store(format!("failed to attach orphans: {e}")))?;

        Ok(result.rows_affected())
    }
}
