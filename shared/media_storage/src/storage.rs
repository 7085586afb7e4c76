//! Single-object uploads with public links

use std::sync::Arc;

use tracing::{debug, error};

use crate::error::BucketResult;
use crate::link::LinkFormatter;
use crate::store::ObjectStore;

/// Uploads objects and turns them into public links
pub struct MediaStorage<S> {
    store: Arc<S>,
    links: LinkFormatter,
}

impl<S: ObjectStore> MediaStorage<S> {
    /// Creates a new media storage client
    ///
    /// # Arguments
    ///
    /// * `store` - Backend objects are written to
    /// * `links` - Formatter for the public links returned by [`Self::upload`]
    #[must_use]
    pub const fn new(store: Arc<S>, links: LinkFormatter) -> Self {
        Self { store, links }
    }

    /// Backend objects are written to
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Link formatter in use
    #[must_use]
    pub const fn links(&self) -> &LinkFormatter {
        &self.links
    }

    /// Writes `payload` to `name`, makes it publicly readable and returns its link
    ///
    /// # Arguments
    ///
    /// * `payload` - Object bytes
    /// * `name` - Destination object name
    /// * `content_type` - MIME type stored with the object
    ///
    /// # Errors
    ///
    /// Returns `BucketError` from whichever of the write, access-policy or
    /// attribute read steps fails first
    pub async fn upload(
        &self,
        payload: Vec<u8>,
        name: &str,
        content_type: &str,
    ) -> BucketResult<String> {
        let handle = self
            .store
            .put_object(name, payload, content_type)
            .await
            .inspect_err(|e| error!("Failed to write object {}: {}", name, e))?;

        self.store
            .set_public_read(&handle)
            .await
            .inspect_err(|e| error!("Failed to make object {} public: {}", name, e))?;

        let attributes = self
            .store
            .object_attributes(&handle)
            .await
            .inspect_err(|e| error!("Failed to read attributes of {}: {}", name, e))?;

        let link = self.links.object_link(&attributes);
        debug!("Uploaded {} ({} bytes) to {}", name, attributes.size, link);

        Ok(link)
    }
}
