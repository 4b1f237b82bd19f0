use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use crate::blob::BlobStore;
use crate::error::{GalleryError, Result};

/// S3-backed blob store.
///
/// Works against AWS or any S3-compatible service; a custom endpoint
/// switches the client to path-style addressing.
#[derive(Clone, Debug)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3BlobStore {
    pub fn new(client: Client, bucket: impl Into<String>, public_base_url: &str) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from the ambient AWS configuration.
    pub async fn connect(
        bucket: &str,
        endpoint_url: Option<&str>,
        public_base_url: &str,
    ) -> Self {
        let shared = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        Self::new(Client::from_conf(builder.build()), bucket, public_base_url)
    }

    fn key_for<'a>(&self, url: &'a str) -> Result<&'a str> {
        url.strip_prefix(&self.public_base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| {
                GalleryError::Validation(format!("url is not under the blob store base: {url}"))
            })
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| GalleryError::Store(format!("s3 put failed for {key}: {e}")))?;

        Ok(format!("{}/{}", self.public_base_url, key))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        let key = self.key_for(url)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| GalleryError::Store(format!("s3 delete failed for {key}: {e}")))?;

        Ok(())
    }
}
