//! End-to-end image upload: prepare, then upload as one batch

use std::sync::Arc;

use tracing::info;

use crate::batch::BatchUploader;
use crate::encoder::ArtifactEncoder;
use crate::error::MediaResult;
use crate::link::LinkFormatter;
use crate::prepare::ArtifactPreparer;
use crate::storage::MediaStorage;
use crate::store::ObjectStore;
use crate::types::{SortedLinks, SourceImage};

/// Uploads originals and thumbnails of a set of images
pub struct MediaUploader<S, E> {
    preparer: ArtifactPreparer<E>,
    batch: BatchUploader<S>,
}

impl<S: ObjectStore, E: ArtifactEncoder> MediaUploader<S, E> {
    /// Creates an uploader writing to `store` with links on `links`' host
    #[must_use]
    pub fn new(store: Arc<S>, encoder: E, links: LinkFormatter) -> Self {
        Self {
            preparer: ArtifactPreparer::new(encoder),
            batch: BatchUploader::new(Arc::new(MediaStorage::new(store, links))),
        }
    }

    /// Batch uploader used after preparation
    #[must_use]
    pub const fn batch(&self) -> &BatchUploader<S> {
        &self.batch
    }

    /// Uploads both renderings of every image
    ///
    /// # Errors
    ///
    /// Returns `MediaError::UnsupportedFormat` or `MediaError::Encoding` before any
    /// upload starts
    /// Returns the first upload error of the batch otherwise
    pub async fn upload_images(&self, images: &[SourceImage]) -> MediaResult<SortedLinks> {
        info!("Preparing {} images for upload", images.len());
        let tasks = self.preparer.prepare(images)?;
        self.batch.upload_batch(tasks).await
    }
}
