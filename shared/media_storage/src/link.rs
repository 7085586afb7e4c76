//! Public object links

use crate::store::ObjectAttributes;

/// Public host used when none is configured
pub const DEFAULT_PUBLIC_HOST: &str = "s3.amazonaws.com";

/// Builds `https://<host>/<bucket>/<object>` links.
///
/// Object names are joined as-is; characters that are not URL-safe are not escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFormatter {
    public_host: String,
}

impl LinkFormatter {
    /// Creates a formatter for the given public host (`host` or `host:port`)
    #[must_use]
    pub fn new(public_host: impl Into<String>) -> Self {
        Self {
            public_host: public_host.into(),
        }
    }

    /// Host links point at
    #[must_use]
    pub fn public_host(&self) -> &str {
        &self.public_host
    }

    /// Public link for an object
    #[must_use]
    pub fn format_link(&self, bucket: &str, object_name: &str) -> String {
        format!("https://{}/{bucket}/{object_name}", self.public_host)
    }

    /// Public link built from attributes read back from the store
    #[must_use]
    pub fn object_link(&self, attributes: &ObjectAttributes) -> String {
        self.format_link(&attributes.bucket, &attributes.name)
    }
}

impl Default for LinkFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_HOST)
    }
}
