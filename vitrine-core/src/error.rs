use thiserror::Error;

/// Errors surfaced by the gallery service and its storage backends.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// Bad or missing input; the caller's fault, no retry.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The operation targets an id that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The content or blob store call failed; retriable.
    #[error("store error: {0}")]
    Store(String),
}

impl GalleryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
