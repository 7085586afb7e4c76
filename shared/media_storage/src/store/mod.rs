//! Object storage backends
//!
//! [`ObjectStore`] is the seam between the upload pipeline and the network.
//! [`S3ObjectStore`] talks to any S3-compatible service; [`InMemoryObjectStore`]
//! keeps objects in process and can inject latency and failures.

mod memory;
mod s3;

use async_trait::async_trait;

use crate::error::BucketResult;

pub use memory::InMemoryObjectStore;
pub use s3::S3ObjectStore;

/// Reference to an object written by [`ObjectStore::put_object`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHandle {
    /// Bucket holding the object
    pub bucket: String,
    /// Object key
    pub key: String,
}

/// Storage attributes read back after an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectAttributes {
    /// Bucket holding the object
    pub bucket: String,
    /// Object name
    pub name: String,
    /// Stored size in bytes
    pub size: i64,
    /// Stored content type, if the backend reports one
    pub content_type: Option<String>,
}

/// Per-object storage operations used by the uploader
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Writes `payload` under `key`
    ///
    /// # Errors
    ///
    /// Returns `BucketError` if the write fails
    async fn put_object(
        &self,
        key: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> BucketResult<ObjectHandle>;

    /// Grants anonymous read access to the object
    ///
    /// # Errors
    ///
    /// Returns `BucketError` if the access policy cannot be set
    async fn set_public_read(&self, handle: &ObjectHandle) -> BucketResult<()>;

    /// Reads the object's storage attributes
    ///
    /// # Errors
    ///
    /// Returns `BucketError::NotFound` if the object does not exist
    /// Returns `BucketError` for other storage failures
    async fn object_attributes(&self, handle: &ObjectHandle) -> BucketResult<ObjectAttributes>;
}
