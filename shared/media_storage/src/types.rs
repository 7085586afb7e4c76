//! Data carried between the preparer, the batch uploader and the caller

use std::fmt;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::format::MediaFormat;

/// Which rendering of a logical image an artifact is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    /// Full-size rendering
    Original,
    /// Reduced rendering
    Thumbnail,
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str("original"),
            Self::Thumbnail => f.write_str("thumbnail"),
        }
    }
}

/// A logical image supplied by the caller
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// File name; directory components are ignored
    pub name: String,
    /// Declared MIME type, e.g. `image/png`
    pub mime: String,
    /// Full-size rendering
    pub original: DynamicImage,
    /// Reduced rendering
    pub thumbnail: DynamicImage,
}

/// One object to upload. Immutable once built and consumed by exactly one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    name: String,
    size_class: SizeClass,
    format: MediaFormat,
    payload: Vec<u8>,
}

impl UploadTask {
    /// Creates a new upload task
    #[must_use]
    pub const fn new(
        name: String,
        size_class: SizeClass,
        format: MediaFormat,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            name,
            size_class,
            format,
            payload,
        }
    }

    /// Destination object name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rendering this task carries
    #[must_use]
    pub const fn size_class(&self) -> SizeClass {
        self.size_class
    }

    /// Encoding of the payload
    #[must_use]
    pub const fn format(&self) -> MediaFormat {
        self.format
    }

    /// Encoded bytes
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Splits the task into name, size class, format and payload
    #[must_use]
    pub fn into_parts(self) -> (String, SizeClass, MediaFormat, Vec<u8>) {
        (self.name, self.size_class, self.format, self.payload)
    }
}

/// Link produced by one successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Rendering the link points at
    pub size_class: SizeClass,
    /// Public link
    pub link: String,
}

/// Public links of a batch, partitioned by size class.
///
/// Sequence order follows upload completion, not submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortedLinks {
    /// Links to thumbnails
    pub thumbnails: Vec<String>,
    /// Links to originals
    pub originals: Vec<String>,
}

impl SortedLinks {
    /// Files a link under its size class
    pub fn push(&mut self, result: UploadResult) {
        match result.size_class {
            SizeClass::Original => self.originals.push(result.link),
            SizeClass::Thumbnail => self.thumbnails.push(result.link),
        }
    }

    /// Total number of links
    #[must_use]
    pub fn len(&self) -> usize {
        self.originals.len() + self.thumbnails.len()
    }

    /// Whether the set holds no links
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_sorted_links_partition_by_size_class() {
        let mut links = SortedLinks::default();
        links.push(UploadResult {
            size_class: SizeClass::Thumbnail,
            link: "t1".to_string(),
        });
        links.push(UploadResult {
            size_class: SizeClass::Original,
            link: "o1".to_string(),
        });
        links.push(UploadResult {
            size_class: SizeClass::Thumbnail,
            link: "t2".to_string(),
        });

        assert_eq!(links.originals, vec!["o1"]);
        assert_eq!(links.thumbnails, vec!["t1", "t2"]);
        assert_eq!(links.len(), 3);
        assert!(!links.is_empty());
    }

    #[test]
    fn test_sorted_links_serialized_shape() {
        let links = SortedLinks {
            thumbnails: vec!["https://host/b/a_thumbnail.png".to_string()],
            originals: vec!["https://host/b/a.png".to_string()],
        };

        assert_eq!(
            serde_json::to_value(&links).unwrap(),
            json!({
                "thumbnails": ["https://host/b/a_thumbnail.png"],
                "originals": ["https://host/b/a.png"],
            })
        );
    }

    #[test]
    fn test_size_class_serialization() {
        assert_eq!(
            serde_json::to_value(SizeClass::Thumbnail).unwrap(),
            json!("thumbnail")
        );
        assert_eq!(SizeClass::Original.to_string(), "original");
    }
}
