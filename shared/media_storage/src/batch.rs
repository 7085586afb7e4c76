//! Concurrent, fail-fast batch uploads
//!
//! Every task of a batch is uploaded on its own tokio task. Outcomes flow back
//! over a channel sized to the batch, so no sender ever waits on the collector.
//! The first failure cancels a shared [`CancellationToken`]; tasks that have not
//! reached the network yet see it and skip their upload, while requests already
//! issued are left to finish in the background. The collector returns the first
//! error it receives and never merges another link after it.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::{MediaError, MediaResult};
use crate::storage::MediaStorage;
use crate::store::ObjectStore;
use crate::types::{SortedLinks, UploadResult, UploadTask};

type Outcome = MediaResult<UploadResult>;

/// Uploads a batch of tasks concurrently as one all-or-nothing unit
pub struct BatchUploader<S> {
    storage: Arc<MediaStorage<S>>,
}

impl<S> Clone for BatchUploader<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: ObjectStore> BatchUploader<S> {
    /// Creates a new batch uploader
    #[must_use]
    pub const fn new(storage: Arc<MediaStorage<S>>) -> Self {
        Self { storage }
    }

    /// Per-object uploader used for each task
    #[must_use]
    pub const fn storage(&self) -> &Arc<MediaStorage<S>> {
        &self.storage
    }

    /// Uploads every task and partitions the resulting links by size class
    ///
    /// Link order follows completion order.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Upload` for the first failed upload observed; links of
    /// tasks that succeeded are discarded
    /// Returns `MediaError::MissingOutcome` if an upload task ended without
    /// reporting
    pub async fn upload_batch(&self, tasks: Vec<UploadTask>) -> MediaResult<SortedLinks> {
        info!("Uploading batch of {} objects", tasks.len());

        let cancel = CancellationToken::new();
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<Outcome>(tasks.len().max(1));

        let mut dispatched = 0;
        for task in tasks {
            if cancel.is_cancelled() {
                warn!("Batch failed, not dispatching {}", task.name());
                break;
            }

            tokio::spawn(Self::run_task(
                Arc::clone(&self.storage),
                task,
                cancel.clone(),
                outcome_tx.clone(),
            ));
            dispatched += 1;
        }
        // the channel closes once every dispatched task has reported or been dropped
        drop(outcome_tx);

        let mut links = SortedLinks::default();
        let mut received = 0;
        while let Some(outcome) = outcome_rx.recv().await {
            received += 1;
            match outcome {
                Ok(result) => links.push(result),
                Err(e) => {
                    cancel.cancel();
                    error!(
                        "Upload batch failed after {} of {} outcomes: {}",
                        received, dispatched, e
                    );
                    return Err(e);
                }
            }
        }

        // A skipped task only exists after a failure, and that failure is queued
        // before the channel can close. Any shortfall here is a task that died.
        if received < dispatched {
            error!(
                "Upload batch lost outcomes: expected {}, received {}",
                dispatched, received
            );
            return Err(MediaError::MissingOutcome {
                expected: dispatched,
                received,
            });
        }

        match serde_json::to_string(&links) {
            Ok(json) => info!("All files uploaded successfully {}", json),
            Err(e) => warn!("Failed to serialize uploaded links: {}", e),
        }

        Ok(links)
    }

    async fn run_task(
        storage: Arc<MediaStorage<S>>,
        task: UploadTask,
        cancel: CancellationToken,
        outcome_tx: mpsc::Sender<Outcome>,
    ) {
        if cancel.is_cancelled() {
            debug!("Skipping upload of {}: batch already failed", task.name());
            return;
        }

        let (name, size_class, format, payload) = task.into_parts();
        let content_type = format.mime();
        let outcome = match storage
            .upload(payload, &name, content_type.essence_str())
            .await
        {
            Ok(link) => Ok(UploadResult { size_class, link }),
            Err(source) => {
                cancel.cancel();
                Err(MediaError::Upload { name, source })
            }
        };

        // the collector is gone once the batch outcome has been decided
        if outcome_tx.send(outcome).await.is_err() {
            debug!("Upload outcome arrived after the batch was decided");
        }
    }
}
