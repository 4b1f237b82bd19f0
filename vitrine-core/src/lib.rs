//! Core domain for the vitrine gallery: albums, photos, display ordering,
//! and publication state.
//!
//! The [`GalleryService`] owns every read-modify-write sequence over the
//! `sort_index` columns, so the dense-ordering invariant lives in one place.
//! Rows are persisted through the [`store`] ports (Postgres in production,
//! in-memory for tests); image bytes live behind the [`blob`] port.

pub mod blob;
pub mod error;
pub mod ids;
pub mod service;
pub mod store;
pub mod types;

pub use error::{GalleryError, Result};
pub use ids::{AlbumId, PhotoId};
pub use service::GalleryService;
pub use types::{
    Album, AlbumChanges, AlbumSummary, CreatePhotoRequest, MoveDirection, NewAlbum, NewPhoto,
    Photo, UploadPhoto,
};
