//! Error types for media storage operations

use aws_sdk_s3::{
    error::{DisplayErrorContext, SdkError},
    operation::{
        head_object::HeadObjectError, put_object::PutObjectError,
        put_object_acl::PutObjectAclError,
    },
};
use thiserror::Error;

use crate::format::MediaFormat;

/// Result type for bucket operations
pub type BucketResult<T> = Result<T, BucketError>;

/// Result type for batch media operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during bucket operations
#[derive(Error, Debug)]
pub enum BucketError {
    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// Object does not exist in bucket
    #[error("Object not found: {0}")]
    NotFound(String),

    /// AWS SDK error (dispatch, timeout, response parsing)
    #[error("AWS SDK error: {0}")]
    AwsError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),
}

impl BucketError {
    /// Checks if this error represents an upstream (5xx) error
    #[must_use]
    pub const fn is_upstream_error(&self) -> bool {
        matches!(self, Self::UpstreamError(_))
    }

    fn from_sdk_error<E>(error: SdkError<E>) -> Self
    where
        E: std::error::Error + 'static,
    {
        match error {
            SdkError::ServiceError(service_err) => {
                if service_err.raw().status().as_u16() >= 500 {
                    Self::UpstreamError(service_err.err().to_string())
                } else {
                    Self::S3Error(service_err.err().to_string())
                }
            }
            other => Self::AwsError(DisplayErrorContext(&other).to_string()),
        }
    }
}

impl From<aws_sdk_s3::Error> for BucketError {
    fn from(error: aws_sdk_s3::Error) -> Self {
        Self::S3Error(error.to_string())
    }
}

impl From<SdkError<PutObjectError>> for BucketError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        Self::from_sdk_error(error)
    }
}

impl From<SdkError<PutObjectAclError>> for BucketError {
    fn from(error: SdkError<PutObjectAclError>) -> Self {
        Self::from_sdk_error(error)
    }
}

impl From<SdkError<HeadObjectError>> for BucketError {
    fn from(error: SdkError<HeadObjectError>) -> Self {
        if let SdkError::ServiceError(ref service_err) = error {
            if matches!(service_err.err(), HeadObjectError::NotFound(_)) {
                return Self::NotFound("Object not found".to_string());
            }
        }
        Self::from_sdk_error(error)
    }
}

/// Errors raised while serializing an image into bytes
#[derive(Error, Debug)]
pub enum EncodingError {
    /// The image codec failed
    #[error("Failed to encode {format} image: {source}")]
    Codec {
        /// Target format
        format: MediaFormat,
        /// Codec error
        #[source]
        source: image::ImageError,
    },

    /// The encoder refused the image for a reason other than a codec failure
    #[error("Encoder rejected image: {0}")]
    Rejected(String),
}

/// Errors surfaced to the caller of a batch
#[derive(Error, Debug)]
pub enum MediaError {
    /// The declared MIME type is not one of the supported encodings
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// One rendering of an image could not be encoded
    #[error("Failed to encode {name}: {source}")]
    Encoding {
        /// Destination name of the rendering that failed
        name: String,
        /// Encoder error
        #[source]
        source: EncodingError,
    },

    /// Uploading one object failed, which fails the whole batch
    #[error("Failed to upload {name}: {source}")]
    Upload {
        /// Destination name of the object that failed
        name: String,
        /// Storage error
        #[source]
        source: BucketError,
    },

    /// A dispatched upload ended without reporting an outcome
    #[error("Upload batch lost outcomes: expected {expected}, received {received}")]
    MissingOutcome {
        /// Number of dispatched uploads
        expected: usize,
        /// Number of outcomes collected
        received: usize,
    },
}

impl MediaError {
    /// Name of the object the error relates to, when there is one
    #[must_use]
    pub fn object_name(&self) -> Option<&str> {
        match self {
            Self::Encoding { name, .. } | Self::Upload { name, .. } => Some(name),
            Self::UnsupportedFormat(_) | Self::MissingOutcome { .. } => None,
        }
    }
}
