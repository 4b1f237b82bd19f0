//! Blob store: port and backends for raw image bytes.

mod memory;
mod s3;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;

/// Object storage addressed by url.
///
/// The content store references blobs by url but does not own them; deletes
/// issued after a row removal are best-effort at the service level.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the bytes under `key` and return the public url.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;

    /// Remove the object addressed by `url`.
    async fn delete(&self, url: &str) -> Result<()>;
}
