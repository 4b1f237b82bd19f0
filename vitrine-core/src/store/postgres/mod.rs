//! Postgres backend for the content store.

mod albums;
mod photos;

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::{GalleryError, Result};

pub use albums::PostgresAlbumStore;
pub use photos::PostgresPhotoStore;

/// Connection pool wrapper; hands out per-entity repositories.
#[derive(Clone, Debug)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .map_err(|e| GalleryError::Store(format!("failed to connect to postgres: {e}")))?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run the embedded migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| GalleryError::Store(format!("migration failed: {e}")))?;

        Ok(())
    }

    pub fn album_store(&self) -> PostgresAlbumStore {
        PostgresAlbumStore::new(self.pool.clone())
    }

    pub fn photo_store(&self) -> PostgresPhotoStore {
        PostgresPhotoStore::new(self.pool.clone())
    }
}
