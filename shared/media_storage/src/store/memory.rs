//! In-process object store

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{ObjectAttributes, ObjectHandle, ObjectStore};
use crate::error::{BucketError, BucketResult};

#[derive(Debug, Clone)]
struct StoredObject {
    payload: Vec<u8>,
    content_type: String,
    public: bool,
}

/// Object store that keeps objects in memory.
///
/// Writes can be delayed or made to fail per key, and the store counts the writes
/// it receives and how many overlap.
#[derive(Debug)]
pub struct InMemoryObjectStore {
    bucket_name: String,
    objects: Mutex<HashMap<String, StoredObject>>,
    failing_keys: HashSet<String>,
    latencies: HashMap<String, Duration>,
    default_latency: Option<Duration>,
    put_calls: AtomicUsize,
    completed_puts: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl InMemoryObjectStore {
    /// Creates an empty store for `bucket_name`
    #[must_use]
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            objects: Mutex::new(HashMap::new()),
            failing_keys: HashSet::new(),
            latencies: HashMap::new(),
            default_latency: None,
            put_calls: AtomicUsize::new(0),
            completed_puts: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Makes writes to `key` fail with an upstream error
    #[must_use]
    pub fn with_failure(mut self, key: impl Into<String>) -> Self {
        self.failing_keys.insert(key.into());
        self
    }

    /// Delays writes to `key`
    #[must_use]
    pub fn with_latency(mut self, key: impl Into<String>, latency: Duration) -> Self {
        self.latencies.insert(key.into(), latency);
        self
    }

    /// Delays writes to every key without its own latency
    #[must_use]
    pub fn with_default_latency(mut self, latency: Duration) -> Self {
        self.default_latency = Some(latency);
        self
    }

    /// Bucket name reported in handles and attributes
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Number of writes started
    #[must_use]
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    /// Number of writes that ran to completion, failed or not
    #[must_use]
    pub fn completed_puts(&self) -> usize {
        self.completed_puts.load(Ordering::SeqCst)
    }

    /// Highest number of writes observed in progress at once
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Stored bytes of `key`
    pub async fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .await
            .get(key)
            .map(|object| object.payload.clone())
    }

    /// Whether `key` exists and is publicly readable
    pub async fn is_public(&self, key: &str) -> bool {
        self.objects
            .lock()
            .await
            .get(key)
            .is_some_and(|object| object.public)
    }

    /// Keys of all stored objects
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn handle(&self, key: &str) -> ObjectHandle {
        ObjectHandle {
            bucket: self.bucket_name.clone(),
            key: key.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put_object(
        &self,
        key: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> BucketResult<ObjectHandle> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        let latency = self.latencies.get(key).copied().or(self.default_latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed_puts.fetch_add(1, Ordering::SeqCst);

        if self.failing_keys.contains(key) {
            debug!("Injected write failure for {}", key);
            return Err(BucketError::UpstreamError(format!(
                "injected failure for {key}"
            )));
        }

        self.objects.lock().await.insert(
            key.to_string(),
            StoredObject {
                payload,
                content_type: content_type.to_string(),
                public: false,
            },
        );

        Ok(self.handle(key))
    }

    async fn set_public_read(&self, handle: &ObjectHandle) -> BucketResult<()> {
        let mut objects = self.objects.lock().await;
        let object = objects
            .get_mut(&handle.key)
            .ok_or_else(|| BucketError::NotFound(handle.key.clone()))?;
        object.public = true;
        Ok(())
    }

    async fn object_attributes(&self, handle: &ObjectHandle) -> BucketResult<ObjectAttributes> {
        let objects = self.objects.lock().await;
        let object = objects
            .get(&handle.key)
            .ok_or_else(|| BucketError::NotFound(handle.key.clone()))?;

        Ok(ObjectAttributes {
            bucket: self.bucket_name.clone(),
            name: handle.key.clone(),
            size: i64::try_from(object.payload.len()).unwrap_or(i64::MAX),
            content_type: Some(object.content_type.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_read_attributes() {
        let store = InMemoryObjectStore::new("media");
        let handle = store
            .put_object("a.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();
        assert_eq!(handle.bucket, "media");
        assert!(!store.is_public("a.png").await);

        store.set_public_read(&handle).await.unwrap();
        assert!(store.is_public("a.png").await);

        let attributes = store.object_attributes(&handle).await.unwrap();
        assert_eq!(attributes.name, "a.png");
        assert_eq!(attributes.size, 3);
        assert_eq!(attributes.content_type.as_deref(), Some("image/png"));
        assert_eq!(store.put_calls(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = InMemoryObjectStore::new("media").with_failure("bad.png");
        let err = store
            .put_object("bad.png", vec![0], "image/png")
            .await
            .unwrap_err();
        assert!(err.is_upstream_error());
        assert!(store.object("bad.png").await.is_none());
        assert_eq!(store.completed_puts(), 1);
    }

    #[tokio::test]
    async fn test_missing_object_attributes() {
        let store = InMemoryObjectStore::new("media");
        let handle = ObjectHandle {
            bucket: "media".to_string(),
            key: "ghost.png".to_string(),
        };
        assert!(matches!(
            store.object_attributes(&handle).await,
            Err(BucketError::NotFound(_))
        ));
        assert!(matches!(
            store.set_public_read(&handle).await,
            Err(BucketError::NotFound(_))
        ));
    }
}
