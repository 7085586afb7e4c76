//! S3 bucket client implementation

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, types::ObjectCannedAcl, Client as S3Client};
use tracing::debug;

use super::{ObjectAttributes, ObjectHandle, ObjectStore};
use crate::error::BucketResult;

/// Object store backed by an S3-compatible bucket
pub struct S3ObjectStore {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl S3ObjectStore {
    /// Creates a new S3 object store
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - Bucket uploads are written to
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }

    /// Bucket uploads are written to
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        key: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> BucketResult<ObjectHandle> {
        debug!(
            "Writing object {} ({} bytes) to bucket {}",
            key,
            payload.len(),
            self.bucket_name
        );

        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(payload))
            .send()
            .await?;

        Ok(ObjectHandle {
            bucket: self.bucket_name.clone(),
            key: key.to_string(),
        })
    }

    async fn set_public_read(&self, handle: &ObjectHandle) -> BucketResult<()> {
        debug!("Granting public read on {}/{}", handle.bucket, handle.key);

        self.s3_client
            .put_object_acl()
            .bucket(&handle.bucket)
            .key(&handle.key)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await?;

        Ok(())
    }

    async fn object_attributes(&self, handle: &ObjectHandle) -> BucketResult<ObjectAttributes> {
        let head = self
            .s3_client
            .head_object()
            .bucket(&handle.bucket)
            .key(&handle.key)
            .send()
            .await?;

        Ok(ObjectAttributes {
            bucket: handle.bucket.clone(),
            name: handle.key.clone(),
            size: head.content_length().unwrap_or_default(),
            content_type: head.content_type().map(ToString::to_string),
        })
    }
}
