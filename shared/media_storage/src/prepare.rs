//! Turning source images into upload tasks

use std::collections::HashSet;
use std::path::Path;

use image::DynamicImage;
use tracing::{debug, error};

use crate::encoder::ArtifactEncoder;
use crate::error::{MediaError, MediaResult};
use crate::format::MediaFormat;
use crate::stamp::{stamp_thumbnail_with, stamp_with, timestamp_token, with_counter};
use crate::types::{SizeClass, SourceImage, UploadTask};

/// Encodes both renderings of each image and names them for upload
pub struct ArtifactPreparer<E> {
    encoder: E,
}

impl<E: ArtifactEncoder> ArtifactPreparer<E> {
    /// Creates a preparer using `encoder`
    #[must_use]
    pub const fn new(encoder: E) -> Self {
        Self { encoder }
    }

    /// Prepares a batch stamped with the current time
    ///
    /// Yields an Original then a Thumbnail task per image, in input order.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::UnsupportedFormat` if any image declares an unknown
    /// format; nothing is encoded in that case
    /// Returns `MediaError::Encoding` as soon as one rendering fails to encode
    pub fn prepare(&self, images: &[SourceImage]) -> MediaResult<Vec<UploadTask>> {
        self.prepare_with_token(images, &timestamp_token())
    }

    /// Prepares a batch with every name stamped with `token`
    ///
    /// Names that would collide within the batch get a `_<n>` counter.
    ///
    /// # Errors
    ///
    /// Same as [`Self::prepare`]
    pub fn prepare_with_token(
        &self,
        images: &[SourceImage],
        token: &str,
    ) -> MediaResult<Vec<UploadTask>> {
        let formats = images
            .iter()
            .map(|image| {
                image.mime.parse::<MediaFormat>().inspect_err(|_| {
                    error!("Unsupported format {} for {}", image.mime, image.name);
                })
            })
            .collect::<MediaResult<Vec<_>>>()?;

        let mut used_names = HashSet::new();
        let mut tasks = Vec::with_capacity(images.len() * 2);

        for (image, format) in images.iter().zip(formats) {
            let base_name = base_name(&image.name);

            let original_name = claim_name(&mut used_names, stamp_with(base_name, token));
            tasks.push(self.encode_task(
                &image.original,
                original_name,
                SizeClass::Original,
                format,
            )?);

            let thumbnail_name =
                claim_name(&mut used_names, stamp_thumbnail_with(base_name, token));
            tasks.push(self.encode_task(
                &image.thumbnail,
                thumbnail_name,
                SizeClass::Thumbnail,
                format,
            )?);
        }

        debug!("Prepared {} upload tasks from {} images", tasks.len(), images.len());
        Ok(tasks)
    }

    fn encode_task(
        &self,
        image: &DynamicImage,
        name: String,
        size_class: SizeClass,
        format: MediaFormat,
    ) -> MediaResult<UploadTask> {
        match self
            .encoder
            .encode(image, format, format.setting_for(size_class))
        {
            Ok(payload) => {
                debug!("Encoded {} {} as {} ({} bytes)", size_class, name, format, payload.len());
                Ok(UploadTask::new(name, size_class, format, payload))
            }
            Err(source) => {
                error!("Failed to encode {}: {}", name, source);
                Err(MediaError::Encoding { name, source })
            }
        }
    }
}

fn base_name(name: &str) -> &str {
    Path::new(name)
        .file_name()
        .and_then(|file_name| file_name.to_str())
        .unwrap_or(name)
}

fn claim_name(used: &mut HashSet<String>, candidate: String) -> String {
    if used.insert(candidate.clone()) {
        return candidate;
    }

    let mut counter = 1;
    loop {
        let alternative = with_counter(&candidate, counter);
        if used.insert(alternative.clone()) {
            return alternative;
        }
        counter += 1;
    }
}
