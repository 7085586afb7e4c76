//! Media storage for image uploads
//!
//! Prepares originals and thumbnails of images, uploads them concurrently to an
//! object store and returns their public links grouped by size.

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod encoder;
pub mod error;
pub mod format;
pub mod link;
pub mod prepare;
pub mod stamp;
pub mod storage;
pub mod store;
pub mod types;
pub mod uploader;

pub use batch::BatchUploader;
pub use encoder::{ArtifactEncoder, RasterEncoder};
pub use error::{BucketError, BucketResult, EncodingError, MediaError, MediaResult};
pub use format::{EncodeSetting, MediaFormat};
pub use link::{LinkFormatter, DEFAULT_PUBLIC_HOST};
pub use prepare::ArtifactPreparer;
pub use storage::MediaStorage;
pub use store::{InMemoryObjectStore, ObjectAttributes, ObjectHandle, ObjectStore, S3ObjectStore};
pub use types::{SizeClass, SortedLinks, SourceImage, UploadResult, UploadTask};
pub use uploader::MediaUploader;
